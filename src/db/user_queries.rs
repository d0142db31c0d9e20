use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::{PgStore, RepositoryError, RepositoryResult, UserRepository};
use crate::models::user::User;

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            email: row.email,
            name: row.name,
            password_hash: SecretString::new(row.password_hash.into_boxed_str()),
            role: row.role.parse().map_err(RepositoryError::Decode)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

const USER_COLUMNS: &str =
    "id, email, name, password_hash, role, created_at, updated_at, deleted_at";

impl UserRepository for PgStore {
    #[tracing::instrument(name = "Fetch user by email", skip(self))]
    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(self.pool())
        .await?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Fetch user by id", skip(self))]
    async fn find_user_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Insert user", skip(self, user), fields(email = %user.email))]
    async fn create_user(&self, user: &User) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.password_hash.expose_secret())
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.pool())
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute user insert query: {:?}", e);
            RepositoryError::from_write(e)
        })?;

        Ok(())
    }
}
