use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::db::{GoalRepository, MatchRepository, PlayerRepository, RepositoryError, TeamRepository};
use crate::error::AppError;
use crate::models::common::PageRequest;
use crate::models::league::{
    CreateMatchRequest, Goal, GoalDetail, GoalRequest, Match, MatchResultRequest, MatchStatus, Player,
    PlayerRequest, Team, TeamRequest,
};

#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("team not found")]
    TeamNotFound,

    #[error("player not found")]
    PlayerNotFound,

    #[error("match not found")]
    MatchNotFound,

    /// A well-formed request that contradicts stored state.
    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<LeagueError> for AppError {
    fn from(error: LeagueError) -> Self {
        match error {
            LeagueError::TeamNotFound => AppError::NotFound("Team not found".to_string()),
            LeagueError::PlayerNotFound => AppError::NotFound("Player not found".to_string()),
            LeagueError::MatchNotFound => AppError::NotFound("Match not found".to_string()),
            LeagueError::Invalid(message) => AppError::validation(message),
            LeagueError::AlreadyExists(message) => AppError::Conflict(message),
            LeagueError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}

/// Teams, squads, fixtures and results.
pub struct LeagueService<S> {
    store: Arc<S>,
}

impl<S> LeagueService<S>
where
    S: TeamRepository + PlayerRepository + MatchRepository + GoalRepository + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    // Teams

    pub async fn create_team(&self, request: TeamRequest) -> Result<Team, LeagueError> {
        let now = Utc::now();
        let team = Team {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            logo_url: request.logo_url,
            founded_year: request.founded_year,
            stadium: request.stadium,
            city: request.city,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.store.create_team(&team).await?;
        tracing::info!(team_id = %team.id, "Created team {}", team.name);
        Ok(team)
    }

    pub async fn get_team(&self, id: Uuid) -> Result<Team, LeagueError> {
        self.store.find_team(id).await?.ok_or(LeagueError::TeamNotFound)
    }

    pub async fn list_teams(&self, page: PageRequest) -> Result<(Vec<Team>, i64), LeagueError> {
        Ok(self.store.list_teams(page).await?)
    }

    pub async fn update_team(&self, id: Uuid, request: TeamRequest) -> Result<Team, LeagueError> {
        let existing = self.get_team(id).await?;
        let team = Team {
            name: request.name.trim().to_string(),
            logo_url: request.logo_url,
            founded_year: request.founded_year,
            stadium: request.stadium,
            city: request.city,
            updated_at: Utc::now(),
            ..existing
        };

        if !self.store.update_team(&team).await? {
            return Err(LeagueError::TeamNotFound);
        }
        Ok(team)
    }

    pub async fn delete_team(&self, id: Uuid) -> Result<(), LeagueError> {
        if !self.store.soft_delete_team(id).await? {
            return Err(LeagueError::TeamNotFound);
        }
        tracing::info!(team_id = %id, "Soft deleted team");
        Ok(())
    }

    // Players

    pub async fn add_player(&self, team_id: Uuid, request: PlayerRequest) -> Result<Player, LeagueError> {
        self.get_team(team_id).await?;

        let now = Utc::now();
        let player = Player {
            id: Uuid::new_v4(),
            team_id,
            name: request.name.trim().to_string(),
            height: request.height,
            weight: request.weight,
            position: request.position,
            jersey_number: request.jersey_number,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        match self.store.create_player(&player).await {
            Ok(()) => Ok(player),
            Err(RepositoryError::Conflict(_)) => Err(LeagueError::AlreadyExists(format!(
                "Jersey number {} is already taken in this team",
                player.jersey_number
            ))),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn team_players(&self, team_id: Uuid) -> Result<Vec<Player>, LeagueError> {
        self.get_team(team_id).await?;
        Ok(self.store.players_for_team(team_id).await?)
    }

    // Matches

    pub async fn create_match(&self, request: CreateMatchRequest) -> Result<Match, LeagueError> {
        if request.home_team_id == request.away_team_id {
            return Err(LeagueError::Invalid("home and away team must be different".to_string()));
        }
        self.get_team(request.home_team_id).await?;
        self.get_team(request.away_team_id).await?;

        let now = Utc::now();
        let fixture = Match {
            id: Uuid::new_v4(),
            home_team_id: request.home_team_id,
            away_team_id: request.away_team_id,
            match_date: request.match_date,
            match_time: request.match_time,
            status: MatchStatus::Scheduled,
            home_score: None,
            away_score: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.store.create_match(&fixture).await?;
        tracing::info!(match_id = %fixture.id, "Scheduled match");
        Ok(fixture)
    }

    pub async fn get_match(&self, id: Uuid) -> Result<Match, LeagueError> {
        self.store.find_match(id).await?.ok_or(LeagueError::MatchNotFound)
    }

    pub async fn list_matches(&self, page: PageRequest) -> Result<(Vec<Match>, i64), LeagueError> {
        Ok(self.store.list_matches(page).await?)
    }

    pub async fn match_goals(&self, match_id: Uuid) -> Result<Vec<GoalDetail>, LeagueError> {
        self.get_match(match_id).await?;
        Ok(self.store.goals_for_match(match_id).await?)
    }

    /// Set the final score and store the goals in one transaction. The match
    /// ends up `completed`.
    #[tracing::instrument(name = "Record match result", skip(self, request))]
    pub async fn record_result(&self, match_id: Uuid, request: MatchResultRequest) -> Result<Match, LeagueError> {
        let fixture = self.get_match(match_id).await?;
        match fixture.status {
            MatchStatus::Cancelled => {
                return Err(LeagueError::Invalid("cannot record a result for a cancelled match".to_string()))
            }
            MatchStatus::Completed => {
                return Err(LeagueError::Invalid("match result has already been recorded".to_string()))
            }
            MatchStatus::Scheduled | MatchStatus::InProgress => {}
        }

        let goals = self.build_goals(&fixture, &request.goals).await?;
        let (existing_home, existing_away) = self.stored_goal_counts(&fixture).await?;
        check_goal_totals(
            &fixture,
            request.home_score,
            request.away_score,
            &goals,
            existing_home,
            existing_away,
        )?;

        let recorded = self
            .store
            .record_match_result(fixture.id, request.home_score, request.away_score, &goals)
            .await?;
        if !recorded {
            // Someone else completed, cancelled or deleted the match meanwhile
            return match self.store.find_match(fixture.id).await? {
                None => Err(LeagueError::MatchNotFound),
                Some(_) => Err(LeagueError::Invalid("match result has already been recorded".to_string())),
            };
        }

        Ok(Match {
            home_score: Some(request.home_score),
            away_score: Some(request.away_score),
            status: MatchStatus::Completed,
            updated_at: Utc::now(),
            ..fixture
        })
    }

    /// Append goals to a match as one batch.
    #[tracing::instrument(name = "Add goals", skip(self, requests), fields(count = requests.len()))]
    pub async fn add_goals(&self, match_id: Uuid, requests: &[GoalRequest]) -> Result<Vec<Goal>, LeagueError> {
        let fixture = self.get_match(match_id).await?;
        if fixture.status == MatchStatus::Cancelled {
            return Err(LeagueError::Invalid("cannot add goals to a cancelled match".to_string()));
        }

        let goals = self.build_goals(&fixture, requests).await?;

        if let (Some(home_score), Some(away_score)) = (fixture.home_score, fixture.away_score) {
            let (existing_home, existing_away) = self.stored_goal_counts(&fixture).await?;
            check_goal_totals(&fixture, home_score, away_score, &goals, existing_home, existing_away)?;
        }

        self.store.create_goals(&goals).await?;
        Ok(goals)
    }

    /// Live goals already stored for the match, counted per credited side.
    async fn stored_goal_counts(&self, fixture: &Match) -> Result<(usize, usize), LeagueError> {
        let existing = self.store.goals_for_match(fixture.id).await?;
        let home = existing.iter().filter(|g| g.team_id == fixture.home_team_id).count();
        Ok((home, existing.len() - home))
    }

    /// Resolve each goal against the fixture: the credited side must play in
    /// the match and the scorer must belong to it, or to the other side for an
    /// own goal.
    async fn build_goals(&self, fixture: &Match, requests: &[GoalRequest]) -> Result<Vec<Goal>, LeagueError> {
        let now = Utc::now();
        let mut goals = Vec::with_capacity(requests.len());

        for request in requests {
            let opponent = if request.team_id == fixture.home_team_id {
                fixture.away_team_id
            } else if request.team_id == fixture.away_team_id {
                fixture.home_team_id
            } else {
                return Err(LeagueError::Invalid("goal team must be one of the match teams".to_string()));
            };

            let player = self
                .store
                .find_player(request.player_id)
                .await?
                .ok_or(LeagueError::PlayerNotFound)?;

            let scorer_side = if request.is_own_goal { opponent } else { request.team_id };
            if player.team_id != scorer_side {
                return Err(LeagueError::Invalid(format!(
                    "player {} does not play for the scoring side of this goal",
                    player.id
                )));
            }

            goals.push(Goal {
                id: Uuid::new_v4(),
                match_id: fixture.id,
                player_id: player.id,
                team_id: request.team_id,
                minute: request.minute,
                is_own_goal: request.is_own_goal,
                created_at: now,
                updated_at: now,
                deleted_at: None,
            });
        }

        Ok(goals)
    }
}

fn check_goal_totals(
    fixture: &Match,
    home_score: i32,
    away_score: i32,
    goals: &[Goal],
    existing_home: usize,
    existing_away: usize,
) -> Result<(), LeagueError> {
    let home = existing_home + goals.iter().filter(|g| g.team_id == fixture.home_team_id).count();
    let away = existing_away + goals.iter().filter(|g| g.team_id == fixture.away_team_id).count();

    if home as i64 > i64::from(home_score) || away as i64 > i64::from(away_score) {
        return Err(LeagueError::Invalid(
            "more goals recorded for a side than its final score".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixture() -> Match {
        Match {
            id: Uuid::new_v4(),
            home_team_id: Uuid::new_v4(),
            away_team_id: Uuid::new_v4(),
            match_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            match_time: "15:30".to_string(),
            status: MatchStatus::Scheduled,
            home_score: None,
            away_score: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    fn goal_for(fixture: &Match, team_id: Uuid) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            match_id: fixture.id,
            player_id: Uuid::new_v4(),
            team_id,
            minute: 10,
            is_own_goal: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn goal_totals_may_trail_the_score() {
        let fixture = fixture();
        let goals = vec![goal_for(&fixture, fixture.home_team_id)];
        assert!(check_goal_totals(&fixture, 2, 0, &goals, 0, 0).is_ok());
    }

    #[test]
    fn goal_totals_cannot_exceed_the_score() {
        let fixture = fixture();
        let goals = vec![goal_for(&fixture, fixture.away_team_id)];
        assert!(check_goal_totals(&fixture, 3, 0, &goals, 0, 0).is_err());
        assert!(check_goal_totals(&fixture, 0, 1, &goals, 0, 1).is_err());
    }

    #[test]
    fn invalid_maps_to_bad_request() {
        use actix_web::ResponseError;
        let error: AppError = LeagueError::Invalid("nope".into()).into();
        assert_eq!(error.status_code(), actix_web::http::StatusCode::BAD_REQUEST);
        let error: AppError = LeagueError::AlreadyExists("taken".into()).into();
        assert_eq!(error.status_code(), actix_web::http::StatusCode::CONFLICT);
    }
}
