use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::goal_queries::{goals_for_matches, insert_goals};
use crate::db::team_queries::teams_by_ids;
use crate::db::{MatchRepository, PgStore, RepositoryError, RepositoryResult};
use crate::models::common::PageRequest;
use crate::models::league::{Goal, GoalDetail, Match, MatchDetails, MatchStatus, Team};

#[derive(Debug, FromRow)]
struct MatchRow {
    id: Uuid,
    home_team_id: Uuid,
    away_team_id: Uuid,
    match_date: NaiveDate,
    match_time: String,
    status: String,
    home_score: Option<i32>,
    away_score: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<MatchRow> for Match {
    type Error = RepositoryError;

    fn try_from(row: MatchRow) -> Result<Self, Self::Error> {
        Ok(Match {
            id: row.id,
            home_team_id: row.home_team_id,
            away_team_id: row.away_team_id,
            match_date: row.match_date,
            match_time: row.match_time,
            status: row.status.parse().map_err(RepositoryError::Decode)?,
            home_score: row.home_score,
            away_score: row.away_score,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

const MATCH_COLUMNS: &str = "id, home_team_id, away_team_id, match_date, match_time, status, \
     home_score, away_score, created_at, updated_at, deleted_at";

impl PgStore {
    /// Attach teams and goals to a page of matches with two extra queries.
    async fn with_details(&self, fixtures: Vec<Match>) -> RepositoryResult<Vec<MatchDetails>> {
        let team_ids: Vec<Uuid> = fixtures
            .iter()
            .flat_map(|m| [m.home_team_id, m.away_team_id])
            .collect();
        let match_ids: Vec<Uuid> = fixtures.iter().map(|m| m.id).collect();

        let teams = teams_by_ids(self, &team_ids).await?;
        let mut goals_by_match: HashMap<Uuid, Vec<GoalDetail>> = HashMap::new();
        for goal in goals_for_matches(self, &match_ids).await? {
            goals_by_match.entry(goal.match_id).or_default().push(goal);
        }

        fixtures
            .into_iter()
            .map(|fixture| {
                let home_team = lookup_team(&teams, fixture.home_team_id)?;
                let away_team = lookup_team(&teams, fixture.away_team_id)?;
                let goals = goals_by_match.remove(&fixture.id).unwrap_or_default();
                Ok(MatchDetails { fixture, home_team, away_team, goals })
            })
            .collect()
    }
}

fn lookup_team(teams: &HashMap<Uuid, Team>, id: Uuid) -> RepositoryResult<Team> {
    teams
        .get(&id)
        .cloned()
        .ok_or_else(|| RepositoryError::Decode(format!("match references missing team {}", id)))
}

impl MatchRepository for PgStore {
    #[tracing::instrument(name = "Insert match", skip(self, fixture), fields(match_id = %fixture.id))]
    async fn create_match(&self, fixture: &Match) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO matches (id, home_team_id, away_team_id, match_date, match_time, status,
                                 home_score, away_score, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(fixture.id)
        .bind(fixture.home_team_id)
        .bind(fixture.away_team_id)
        .bind(fixture.match_date)
        .bind(&fixture.match_time)
        .bind(fixture.status.as_str())
        .bind(fixture.home_score)
        .bind(fixture.away_score)
        .bind(fixture.created_at)
        .bind(fixture.updated_at)
        .execute(self.pool())
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(())
    }

    async fn find_match(&self, id: Uuid) -> RepositoryResult<Option<Match>> {
        let row = sqlx::query_as::<_, MatchRow>(&format!(
            "SELECT {} FROM matches WHERE id = $1 AND deleted_at IS NULL",
            MATCH_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(Match::try_from).transpose()
    }

    async fn list_matches(&self, page: PageRequest) -> RepositoryResult<(Vec<Match>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM matches WHERE deleted_at IS NULL")
            .fetch_one(self.pool())
            .await?;

        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            "SELECT {} FROM matches WHERE deleted_at IS NULL \
             ORDER BY match_date DESC, match_time DESC LIMIT $1 OFFSET $2",
            MATCH_COLUMNS
        ))
        .bind(page.per_page)
        .bind(page.offset())
        .fetch_all(self.pool())
        .await?;

        let fixtures = rows
            .into_iter()
            .map(Match::try_from)
            .collect::<RepositoryResult<Vec<_>>>()?;
        Ok((fixtures, total))
    }

    #[tracing::instrument(name = "Fetch match with details", skip(self))]
    async fn find_match_with_details(&self, id: Uuid) -> RepositoryResult<Option<MatchDetails>> {
        let Some(fixture) = self.find_match(id).await? else {
            return Ok(None);
        };

        Ok(self.with_details(vec![fixture]).await?.pop())
    }

    async fn team_win_count(&self, team_id: Uuid, is_home: bool) -> RepositoryResult<i64> {
        let query = if is_home {
            "SELECT COUNT(*) FROM matches \
             WHERE home_team_id = $1 AND status = $2 AND home_score > away_score AND deleted_at IS NULL"
        } else {
            "SELECT COUNT(*) FROM matches \
             WHERE away_team_id = $1 AND status = $2 AND away_score > home_score AND deleted_at IS NULL"
        };

        let count: i64 = sqlx::query_scalar(query)
            .bind(team_id)
            .bind(MatchStatus::Completed.as_str())
            .fetch_one(self.pool())
            .await?;

        Ok(count)
    }

    #[tracing::instrument(name = "Fetch completed matches", skip(self))]
    async fn completed_matches(&self, page: PageRequest) -> RepositoryResult<(Vec<MatchDetails>, i64)> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM matches WHERE status = $1 AND deleted_at IS NULL",
        )
        .bind(MatchStatus::Completed.as_str())
        .fetch_one(self.pool())
        .await?;

        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            "SELECT {} FROM matches WHERE status = $1 AND deleted_at IS NULL \
             ORDER BY match_date DESC, match_time DESC LIMIT $2 OFFSET $3",
            MATCH_COLUMNS
        ))
        .bind(MatchStatus::Completed.as_str())
        .bind(page.per_page)
        .bind(page.offset())
        .fetch_all(self.pool())
        .await?;

        let fixtures = rows
            .into_iter()
            .map(Match::try_from)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((self.with_details(fixtures).await?, total))
    }

    #[tracing::instrument(
        name = "Record match result",
        skip(self, goals),
        fields(goal_count = goals.len())
    )]
    async fn record_match_result(
        &self,
        match_id: Uuid,
        home_score: i32,
        away_score: i32,
        goals: &[Goal],
    ) -> RepositoryResult<bool> {
        let mut tx = self.pool().begin().await?;

        // The row lock taken by the UPDATE serialises concurrent recordings;
        // the loser sees the new status and matches nothing.
        let updated = sqlx::query(
            r#"
            UPDATE matches
            SET home_score = $2, away_score = $3, status = $4, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL AND status IN ($5, $6)
            "#,
        )
        .bind(match_id)
        .bind(home_score)
        .bind(away_score)
        .bind(MatchStatus::Completed.as_str())
        .bind(MatchStatus::Scheduled.as_str())
        .bind(MatchStatus::InProgress.as_str())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            tracing::warn!("Match {} is not open for a result", match_id);
            return Ok(false);
        }

        insert_goals(&mut tx, goals)
            .await
            .map_err(RepositoryError::from_write)?;

        tx.commit().await?;
        tracing::info!("Recorded result {}-{} for match {}", home_score, away_score, match_id);

        Ok(true)
    }
}
