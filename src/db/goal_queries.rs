use sqlx::{FromRow, PgConnection, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::db::{GoalRepository, PgStore, RepositoryError, RepositoryResult};
use crate::models::league::{Goal, GoalDetail};
use crate::models::report::TopScorerResult;

#[derive(Debug, FromRow)]
struct GoalDetailRow {
    id: Uuid,
    match_id: Uuid,
    player_id: Uuid,
    player_name: String,
    team_id: Uuid,
    team_name: String,
    minute: i32,
    is_own_goal: bool,
}

impl From<GoalDetailRow> for GoalDetail {
    fn from(row: GoalDetailRow) -> Self {
        GoalDetail {
            id: row.id,
            match_id: row.match_id,
            player_id: row.player_id,
            player_name: row.player_name,
            team_id: row.team_id,
            team_name: row.team_name,
            minute: row.minute,
            is_own_goal: row.is_own_goal,
        }
    }
}

#[derive(Debug, FromRow)]
struct TopScorerRow {
    player_id: Uuid,
    player_name: String,
    team_id: Uuid,
    team_name: String,
    goal_count: i64,
}

// Player and team rows are joined regardless of their own soft-delete state
// so that historical goals keep their names.
const GOAL_DETAIL_SELECT: &str = r#"
    SELECT g.id, g.match_id, g.player_id, p.name AS player_name,
           g.team_id, t.name AS team_name, g.minute, g.is_own_goal
    FROM goals g
    JOIN players p ON p.id = g.player_id
    JOIN teams t ON t.id = g.team_id
"#;

/// Single multi-row INSERT on the caller's connection or transaction.
pub(crate) async fn insert_goals(conn: &mut PgConnection, goals: &[Goal]) -> Result<(), sqlx::Error> {
    if goals.is_empty() {
        return Ok(());
    }

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO goals (id, match_id, player_id, team_id, minute, is_own_goal, created_at, updated_at) ",
    );
    builder.push_values(goals, |mut row, goal| {
        row.push_bind(goal.id)
            .push_bind(goal.match_id)
            .push_bind(goal.player_id)
            .push_bind(goal.team_id)
            .push_bind(goal.minute)
            .push_bind(goal.is_own_goal)
            .push_bind(goal.created_at)
            .push_bind(goal.updated_at);
    });
    builder.build().execute(conn).await?;

    Ok(())
}

/// Live goals for a set of matches, ordered by match then minute.
pub(crate) async fn goals_for_matches(
    store: &PgStore,
    match_ids: &[Uuid],
) -> Result<Vec<GoalDetail>, sqlx::Error> {
    if match_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, GoalDetailRow>(&format!(
        "{} WHERE g.match_id = ANY($1) AND g.deleted_at IS NULL ORDER BY g.match_id, g.minute ASC",
        GOAL_DETAIL_SELECT
    ))
    .bind(match_ids)
    .fetch_all(store.pool())
    .await?;

    Ok(rows.into_iter().map(GoalDetail::from).collect())
}

impl GoalRepository for PgStore {
    #[tracing::instrument(name = "Insert goal batch", skip(self, goals), fields(count = goals.len()))]
    async fn create_goals(&self, goals: &[Goal]) -> RepositoryResult<()> {
        if goals.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool().begin().await?;
        insert_goals(&mut tx, goals)
            .await
            .map_err(RepositoryError::from_write)?;
        tx.commit().await?;

        Ok(())
    }

    async fn goals_for_match(&self, match_id: Uuid) -> RepositoryResult<Vec<GoalDetail>> {
        Ok(goals_for_matches(self, &[match_id]).await?)
    }

    #[tracing::instrument(name = "Rank top scorers", skip(self))]
    async fn top_scorers(&self, limit: i64) -> RepositoryResult<Vec<TopScorerResult>> {
        let rows = sqlx::query_as::<_, TopScorerRow>(
            r#"
            SELECT g.player_id, p.name AS player_name, p.team_id, t.name AS team_name,
                   COUNT(g.id) AS goal_count
            FROM goals g
            JOIN players p ON p.id = g.player_id AND p.deleted_at IS NULL
            JOIN teams t ON t.id = p.team_id AND t.deleted_at IS NULL
            WHERE g.deleted_at IS NULL AND g.is_own_goal = FALSE
            GROUP BY g.player_id, p.name, p.team_id, t.name
            ORDER BY goal_count DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| TopScorerResult {
                player_id: row.player_id,
                player_name: row.player_name,
                team_id: row.team_id,
                team_name: row.team_name,
                goal_count: row.goal_count,
            })
            .collect())
    }
}
