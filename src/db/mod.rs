//! Persistence contracts and their PostgreSQL implementation.
//!
//! Every query filters `deleted_at IS NULL` itself; nothing relies on an
//! implicit soft-delete filter.

use sqlx::PgPool;

pub mod repository;
mod goal_queries;
mod match_queries;
mod player_queries;
mod team_queries;
mod user_queries;

pub use repository::{
    GoalRepository, MatchRepository, PlayerRepository, TeamRepository, UserRepository,
};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A unique constraint rejected the write.
    #[error("duplicate value violates unique constraint {0}")]
    Conflict(String),

    /// A stored value could not be mapped onto the domain type.
    #[error("corrupt row: {0}")]
    Decode(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    pub(crate) fn from_write(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                RepositoryError::Conflict(db_error.constraint().unwrap_or("unknown").to_string())
            }
            _ => RepositoryError::Database(error),
        }
    }
}

/// Everything the HTTP layer needs from storage.
pub trait LeagueStore:
    UserRepository + TeamRepository + PlayerRepository + MatchRepository + GoalRepository + Send + Sync + 'static
{
}

impl<T> LeagueStore for T where
    T: UserRepository + TeamRepository + PlayerRepository + MatchRepository + GoalRepository + Send + Sync + 'static
{
}

/// PostgreSQL-backed store. Cheap to clone; the pool is shared.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
