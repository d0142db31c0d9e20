//! Repository traits consumed by the services.
//!
//! Method names are unique across traits so a single store type can
//! implement all of them without call-site ambiguity.

use uuid::Uuid;

use crate::db::RepositoryResult;
use crate::models::common::PageRequest;
use crate::models::league::{Goal, GoalDetail, Match, MatchDetails, Player, Team};
use crate::models::report::TopScorerResult;
use crate::models::user::User;

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    async fn find_user_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;

    /// Fails with `Conflict` when the email is already taken.
    async fn create_user(&self, user: &User) -> RepositoryResult<()>;
}

#[trait_variant::make(TeamRepository: Send)]
pub trait LocalTeamRepository {
    async fn create_team(&self, team: &Team) -> RepositoryResult<()>;

    async fn find_team(&self, id: Uuid) -> RepositoryResult<Option<Team>>;

    /// Teams ordered by name, with the total count of live teams.
    async fn list_teams(&self, page: PageRequest) -> RepositoryResult<(Vec<Team>, i64)>;

    /// Returns false when no live team has that id.
    async fn update_team(&self, team: &Team) -> RepositoryResult<bool>;

    /// Returns false when no live team has that id.
    async fn soft_delete_team(&self, id: Uuid) -> RepositoryResult<bool>;
}

#[trait_variant::make(PlayerRepository: Send)]
pub trait LocalPlayerRepository {
    /// Fails with `Conflict` when the jersey number is taken in the team.
    async fn create_player(&self, player: &Player) -> RepositoryResult<()>;

    async fn find_player(&self, id: Uuid) -> RepositoryResult<Option<Player>>;

    /// Live players of a team ordered by jersey number.
    async fn players_for_team(&self, team_id: Uuid) -> RepositoryResult<Vec<Player>>;
}

#[trait_variant::make(MatchRepository: Send)]
pub trait LocalMatchRepository {
    async fn create_match(&self, fixture: &Match) -> RepositoryResult<()>;

    async fn find_match(&self, id: Uuid) -> RepositoryResult<Option<Match>>;

    /// Matches newest first, with the total count of live matches.
    async fn list_matches(&self, page: PageRequest) -> RepositoryResult<(Vec<Match>, i64)>;

    /// The match with both teams and its live goals.
    async fn find_match_with_details(&self, id: Uuid) -> RepositoryResult<Option<MatchDetails>>;

    /// Completed matches the team won while playing at home (`is_home`) or
    /// away (`!is_home`).
    async fn team_win_count(&self, team_id: Uuid, is_home: bool) -> RepositoryResult<i64>;

    /// Completed matches ordered by date and kick-off time, newest first,
    /// with the total count of completed matches.
    async fn completed_matches(&self, page: PageRequest) -> RepositoryResult<(Vec<MatchDetails>, i64)>;

    /// Sets the final score, marks the match completed and inserts the goals,
    /// all in one transaction. Returns false, writing nothing, when no live
    /// match with that id is still open (scheduled or in progress).
    async fn record_match_result(
        &self,
        match_id: Uuid,
        home_score: i32,
        away_score: i32,
        goals: &[Goal],
    ) -> RepositoryResult<bool>;
}

#[trait_variant::make(GoalRepository: Send)]
pub trait LocalGoalRepository {
    /// Inserts all goals atomically; an empty slice is a no-op.
    async fn create_goals(&self, goals: &[Goal]) -> RepositoryResult<()>;

    /// Live goals of a match ordered by minute.
    async fn goals_for_match(&self, match_id: Uuid) -> RepositoryResult<Vec<GoalDetail>>;

    /// Players ranked by non-own goals, highest first. Ties keep whatever
    /// order the storage produces.
    async fn top_scorers(&self, limit: i64) -> RepositoryResult<Vec<TopScorerResult>>;
}
