use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::{PgStore, RepositoryError, RepositoryResult, TeamRepository};
use crate::models::common::PageRequest;
use crate::models::league::Team;

#[derive(Debug, FromRow)]
struct TeamRow {
    id: Uuid,
    name: String,
    logo_url: Option<String>,
    founded_year: Option<i32>,
    stadium: Option<String>,
    city: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Team {
            id: row.id,
            name: row.name,
            logo_url: row.logo_url,
            founded_year: row.founded_year,
            stadium: row.stadium,
            city: row.city,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

const TEAM_COLUMNS: &str =
    "id, name, logo_url, founded_year, stadium, city, created_at, updated_at, deleted_at";

/// Teams by id, including soft-deleted ones, for rendering historic matches.
pub(crate) async fn teams_by_ids(
    store: &PgStore,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, Team>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, TeamRow>(&format!(
        "SELECT {} FROM teams WHERE id = ANY($1)",
        TEAM_COLUMNS
    ))
    .bind(ids)
    .fetch_all(store.pool())
    .await?;

    Ok(rows.into_iter().map(|row| (row.id, Team::from(row))).collect())
}

impl TeamRepository for PgStore {
    #[tracing::instrument(name = "Insert team", skip(self, team), fields(team_name = %team.name))]
    async fn create_team(&self, team: &Team) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, name, logo_url, founded_year, stadium, city, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(team.id)
        .bind(&team.name)
        .bind(&team.logo_url)
        .bind(team.founded_year)
        .bind(&team.stadium)
        .bind(&team.city)
        .bind(team.created_at)
        .bind(team.updated_at)
        .execute(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(())
    }

    async fn find_team(&self, id: Uuid) -> RepositoryResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(&format!(
            "SELECT {} FROM teams WHERE id = $1 AND deleted_at IS NULL",
            TEAM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Team::from))
    }

    async fn list_teams(&self, page: PageRequest) -> RepositoryResult<(Vec<Team>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teams WHERE deleted_at IS NULL")
            .fetch_one(self.pool())
            .await?;

        let rows = sqlx::query_as::<_, TeamRow>(&format!(
            "SELECT {} FROM teams WHERE deleted_at IS NULL ORDER BY name ASC LIMIT $1 OFFSET $2",
            TEAM_COLUMNS
        ))
        .bind(page.per_page)
        .bind(page.offset())
        .fetch_all(self.pool())
        .await?;

        Ok((rows.into_iter().map(Team::from).collect(), total))
    }

    #[tracing::instrument(name = "Update team", skip(self, team), fields(team_id = %team.id))]
    async fn update_team(&self, team: &Team) -> RepositoryResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE teams
            SET name = $2, logo_url = $3, founded_year = $4, stadium = $5, city = $6, updated_at = $7
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(team.id)
        .bind(&team.name)
        .bind(&team.logo_url)
        .bind(team.founded_year)
        .bind(&team.stadium)
        .bind(&team.city)
        .bind(team.updated_at)
        .execute(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(name = "Soft delete team", skip(self))]
    async fn soft_delete_team(&self, id: Uuid) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE teams SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
