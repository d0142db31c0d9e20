// tests/common/memory_store.rs
//! Repository implementation backed by plain vectors so the HTTP stack can be
//! exercised without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use league_backend::db::{
    GoalRepository, MatchRepository, PlayerRepository, RepositoryError, RepositoryResult, TeamRepository,
    UserRepository,
};
use league_backend::models::common::PageRequest;
use league_backend::models::league::{Goal, GoalDetail, Match, MatchDetails, MatchStatus, Player, Team};
use league_backend::models::report::TopScorerResult;
use league_backend::models::user::User;

#[derive(Default)]
struct State {
    users: Vec<User>,
    teams: Vec<Team>,
    players: Vec<Player>,
    matches: Vec<Match>,
    goals: Vec<Goal>,
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
    fail_top_scorers: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent top scorer query fail.
    pub fn fail_top_scorers(&self) {
        self.fail_top_scorers.store(true, Ordering::SeqCst);
    }

    pub fn match_by_id(&self, id: Uuid) -> Option<Match> {
        self.lock().matches.iter().find(|m| m.id == id).cloned()
    }

    pub fn goal_count(&self) -> usize {
        self.lock().goals.iter().filter(|g| g.deleted_at.is_none()).count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("in-memory store mutex poisoned")
    }
}

impl State {
    fn team(&self, id: Uuid) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    fn goal_details(&self, match_id: Uuid) -> Vec<GoalDetail> {
        let mut goals: Vec<GoalDetail> = self
            .goals
            .iter()
            .filter(|g| g.match_id == match_id && g.deleted_at.is_none())
            .map(|g| GoalDetail {
                id: g.id,
                match_id: g.match_id,
                player_id: g.player_id,
                player_name: self
                    .players
                    .iter()
                    .find(|p| p.id == g.player_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                team_id: g.team_id,
                team_name: self.team(g.team_id).map(|t| t.name.clone()).unwrap_or_default(),
                minute: g.minute,
                is_own_goal: g.is_own_goal,
            })
            .collect();
        goals.sort_by_key(|g| g.minute);
        goals
    }

    fn details(&self, fixture: &Match) -> RepositoryResult<MatchDetails> {
        let lookup = |id: Uuid| {
            self.team(id)
                .cloned()
                .ok_or_else(|| RepositoryError::Decode(format!("match references missing team {}", id)))
        };
        Ok(MatchDetails {
            fixture: fixture.clone(),
            home_team: lookup(fixture.home_team_id)?,
            away_team: lookup(fixture.away_team_id)?,
            goals: self.goal_details(fixture.id),
        })
    }

    fn live_matches_newest_first(&self) -> Vec<Match> {
        let mut matches: Vec<Match> = self.matches.iter().filter(|m| m.deleted_at.is_none()).cloned().collect();
        matches.sort_by(|a, b| {
            b.match_date
                .cmp(&a.match_date)
                .then_with(|| b.match_time.cmp(&a.match_time))
        });
        matches
    }
}

fn page_of<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
    items
        .iter()
        .skip(page.offset() as usize)
        .take(page.per_page as usize)
        .cloned()
        .collect()
}

impl UserRepository for InMemoryStore {
    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let state = self.lock();
        Ok(state
            .users
            .iter()
            .find(|u| u.email == email && u.deleted_at.is_none())
            .cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let state = self.lock();
        Ok(state.users.iter().find(|u| u.id == id && u.deleted_at.is_none()).cloned())
    }

    async fn create_user(&self, user: &User) -> RepositoryResult<()> {
        let mut state = self.lock();
        if state.users.iter().any(|u| u.email == user.email && u.deleted_at.is_none()) {
            return Err(RepositoryError::Conflict("users_email_key".to_string()));
        }
        state.users.push(user.clone());
        Ok(())
    }
}

impl TeamRepository for InMemoryStore {
    async fn create_team(&self, team: &Team) -> RepositoryResult<()> {
        self.lock().teams.push(team.clone());
        Ok(())
    }

    async fn find_team(&self, id: Uuid) -> RepositoryResult<Option<Team>> {
        let state = self.lock();
        Ok(state.teams.iter().find(|t| t.id == id && t.deleted_at.is_none()).cloned())
    }

    async fn list_teams(&self, page: PageRequest) -> RepositoryResult<(Vec<Team>, i64)> {
        let state = self.lock();
        let mut teams: Vec<Team> = state.teams.iter().filter(|t| t.deleted_at.is_none()).cloned().collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        Ok((page_of(&teams, page), teams.len() as i64))
    }

    async fn update_team(&self, team: &Team) -> RepositoryResult<bool> {
        let mut state = self.lock();
        match state.teams.iter_mut().find(|t| t.id == team.id && t.deleted_at.is_none()) {
            Some(existing) => {
                *existing = team.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn soft_delete_team(&self, id: Uuid) -> RepositoryResult<bool> {
        let mut state = self.lock();
        match state.teams.iter_mut().find(|t| t.id == id && t.deleted_at.is_none()) {
            Some(team) => {
                team.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl PlayerRepository for InMemoryStore {
    async fn create_player(&self, player: &Player) -> RepositoryResult<()> {
        let mut state = self.lock();
        let taken = state.players.iter().any(|p| {
            p.team_id == player.team_id && p.jersey_number == player.jersey_number && p.deleted_at.is_none()
        });
        if taken {
            return Err(RepositoryError::Conflict("players_team_jersey_unique".to_string()));
        }
        state.players.push(player.clone());
        Ok(())
    }

    async fn find_player(&self, id: Uuid) -> RepositoryResult<Option<Player>> {
        let state = self.lock();
        Ok(state.players.iter().find(|p| p.id == id && p.deleted_at.is_none()).cloned())
    }

    async fn players_for_team(&self, team_id: Uuid) -> RepositoryResult<Vec<Player>> {
        let state = self.lock();
        let mut players: Vec<Player> = state
            .players
            .iter()
            .filter(|p| p.team_id == team_id && p.deleted_at.is_none())
            .cloned()
            .collect();
        players.sort_by_key(|p| p.jersey_number);
        Ok(players)
    }
}

impl MatchRepository for InMemoryStore {
    async fn create_match(&self, fixture: &Match) -> RepositoryResult<()> {
        self.lock().matches.push(fixture.clone());
        Ok(())
    }

    async fn find_match(&self, id: Uuid) -> RepositoryResult<Option<Match>> {
        let state = self.lock();
        Ok(state.matches.iter().find(|m| m.id == id && m.deleted_at.is_none()).cloned())
    }

    async fn list_matches(&self, page: PageRequest) -> RepositoryResult<(Vec<Match>, i64)> {
        let state = self.lock();
        let matches = state.live_matches_newest_first();
        Ok((page_of(&matches, page), matches.len() as i64))
    }

    async fn find_match_with_details(&self, id: Uuid) -> RepositoryResult<Option<MatchDetails>> {
        let state = self.lock();
        match state.matches.iter().find(|m| m.id == id && m.deleted_at.is_none()) {
            Some(fixture) => Ok(Some(state.details(fixture)?)),
            None => Ok(None),
        }
    }

    async fn team_win_count(&self, team_id: Uuid, is_home: bool) -> RepositoryResult<i64> {
        let state = self.lock();
        let wins = state
            .matches
            .iter()
            .filter(|m| m.status == MatchStatus::Completed && m.deleted_at.is_none())
            .filter(|m| {
                let (home, away) = (m.home_score.unwrap_or(0), m.away_score.unwrap_or(0));
                if is_home {
                    m.home_team_id == team_id && home > away
                } else {
                    m.away_team_id == team_id && away > home
                }
            })
            .count();
        Ok(wins as i64)
    }

    async fn completed_matches(&self, page: PageRequest) -> RepositoryResult<(Vec<MatchDetails>, i64)> {
        let state = self.lock();
        let completed: Vec<Match> = state
            .live_matches_newest_first()
            .into_iter()
            .filter(|m| m.status == MatchStatus::Completed)
            .collect();
        let details = page_of(&completed, page)
            .iter()
            .map(|m| state.details(m))
            .collect::<RepositoryResult<Vec<_>>>()?;
        Ok((details, completed.len() as i64))
    }

    async fn record_match_result(
        &self,
        match_id: Uuid,
        home_score: i32,
        away_score: i32,
        goals: &[Goal],
    ) -> RepositoryResult<bool> {
        let mut state = self.lock();
        let open = state.matches.iter_mut().find(|m| {
            m.id == match_id
                && m.deleted_at.is_none()
                && matches!(m.status, MatchStatus::Scheduled | MatchStatus::InProgress)
        });
        let Some(fixture) = open else {
            return Ok(false);
        };
        fixture.home_score = Some(home_score);
        fixture.away_score = Some(away_score);
        fixture.status = MatchStatus::Completed;
        fixture.updated_at = Utc::now();
        state.goals.extend_from_slice(goals);
        Ok(true)
    }
}

impl GoalRepository for InMemoryStore {
    async fn create_goals(&self, goals: &[Goal]) -> RepositoryResult<()> {
        self.lock().goals.extend_from_slice(goals);
        Ok(())
    }

    async fn goals_for_match(&self, match_id: Uuid) -> RepositoryResult<Vec<GoalDetail>> {
        Ok(self.lock().goal_details(match_id))
    }

    async fn top_scorers(&self, limit: i64) -> RepositoryResult<Vec<TopScorerResult>> {
        if self.fail_top_scorers.load(Ordering::SeqCst) {
            return Err(RepositoryError::Decode("injected top scorer failure".to_string()));
        }

        let state = self.lock();
        let mut order: Vec<Uuid> = Vec::new();
        let mut counts: HashMap<Uuid, i64> = HashMap::new();
        for goal in state.goals.iter().filter(|g| g.deleted_at.is_none() && !g.is_own_goal) {
            let count = counts.entry(goal.player_id).or_insert_with(|| {
                order.push(goal.player_id);
                0
            });
            *count += 1;
        }

        let mut scorers: Vec<TopScorerResult> = order
            .into_iter()
            .filter_map(|player_id| {
                let player = state.players.iter().find(|p| p.id == player_id && p.deleted_at.is_none())?;
                let team = state.teams.iter().find(|t| t.id == player.team_id && t.deleted_at.is_none())?;
                Some(TopScorerResult {
                    player_id,
                    player_name: player.name.clone(),
                    team_id: team.id,
                    team_name: team.name.clone(),
                    goal_count: counts[&player_id],
                })
            })
            .collect();
        scorers.sort_by(|a, b| b.goal_count.cmp(&a.goal_count));
        scorers.truncate(limit.max(0) as usize);
        Ok(scorers)
    }
}
