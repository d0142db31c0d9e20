use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::{PgStore, PlayerRepository, RepositoryError, RepositoryResult};
use crate::models::league::Player;

#[derive(Debug, FromRow)]
struct PlayerRow {
    id: Uuid,
    team_id: Uuid,
    name: String,
    height: Option<i32>,
    weight: Option<i32>,
    position: String,
    jersey_number: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<PlayerRow> for Player {
    type Error = RepositoryError;

    fn try_from(row: PlayerRow) -> Result<Self, Self::Error> {
        Ok(Player {
            id: row.id,
            team_id: row.team_id,
            name: row.name,
            height: row.height,
            weight: row.weight,
            position: row.position.parse().map_err(RepositoryError::Decode)?,
            jersey_number: row.jersey_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

const PLAYER_COLUMNS: &str =
    "id, team_id, name, height, weight, position, jersey_number, created_at, updated_at, deleted_at";

impl PlayerRepository for PgStore {
    #[tracing::instrument(name = "Insert player", skip(self, player), fields(team_id = %player.team_id))]
    async fn create_player(&self, player: &Player) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO players (id, team_id, name, height, weight, position, jersey_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(player.id)
        .bind(player.team_id)
        .bind(&player.name)
        .bind(player.height)
        .bind(player.weight)
        .bind(player.position.as_str())
        .bind(player.jersey_number)
        .bind(player.created_at)
        .bind(player.updated_at)
        .execute(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(())
    }

    async fn find_player(&self, id: Uuid) -> RepositoryResult<Option<Player>> {
        let row = sqlx::query_as::<_, PlayerRow>(&format!(
            "SELECT {} FROM players WHERE id = $1 AND deleted_at IS NULL",
            PLAYER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(Player::try_from).transpose()
    }

    async fn players_for_team(&self, team_id: Uuid) -> RepositoryResult<Vec<Player>> {
        let rows = sqlx::query_as::<_, PlayerRow>(&format!(
            "SELECT {} FROM players WHERE team_id = $1 AND deleted_at IS NULL ORDER BY jersey_number ASC",
            PLAYER_COLUMNS
        ))
        .bind(team_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(Player::try_from).collect()
    }
}
