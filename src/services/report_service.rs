use std::sync::Arc;

use uuid::Uuid;

use crate::db::{GoalRepository, MatchRepository, RepositoryError};
use crate::error::AppError;
use crate::models::common::PageRequest;
use crate::models::league::MatchDetails;
use crate::models::report::{MatchReport, MatchResult, TeamSummary, TopScorerResult};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("match not found")]
    MatchNotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ReportError> for AppError {
    fn from(error: ReportError) -> Self {
        match error {
            ReportError::MatchNotFound => AppError::NotFound("Match not found".to_string()),
            ReportError::Repository(e) => AppError::Internal(e.to_string()),
        }
    }
}

/// Read-only statistics over recorded matches.
pub struct ReportService<S> {
    store: Arc<S>,
}

impl<S> ReportService<S>
where
    S: MatchRepository + GoalRepository + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Completed wins at home plus completed wins away.
    pub async fn team_win_count(&self, team_id: Uuid) -> Result<i64, ReportError> {
        let home = self.store.team_win_count(team_id, true).await?;
        let away = self.store.team_win_count(team_id, false).await?;
        Ok(home + away)
    }

    pub async fn top_scorers(&self, limit: i64) -> Result<Vec<TopScorerResult>, ReportError> {
        Ok(self.store.top_scorers(limit).await?)
    }

    #[tracing::instrument(name = "Build match report", skip(self))]
    pub async fn match_report(&self, match_id: Uuid) -> Result<MatchReport, ReportError> {
        let details = self
            .store
            .find_match_with_details(match_id)
            .await?
            .ok_or(ReportError::MatchNotFound)?;

        // League-wide leader, not the leader of this match.
        let top_scorer = self.store.top_scorers(1).await?.into_iter().next();
        let home_wins = self.team_win_count(details.home_team.id).await?;
        let away_wins = self.team_win_count(details.away_team.id).await?;

        Ok(assemble_report(details, top_scorer, home_wins, away_wins))
    }

    /// Reports for a page of completed matches, newest first, plus the total
    /// number of completed matches. Only the first report on the page carries
    /// the league top scorer.
    #[tracing::instrument(name = "List match reports", skip(self))]
    pub async fn list_match_reports(&self, page: PageRequest) -> Result<(Vec<MatchReport>, i64), ReportError> {
        let (matches, total) = self.store.completed_matches(page).await?;

        let mut reports = Vec::with_capacity(matches.len());
        for (index, details) in matches.into_iter().enumerate() {
            let top_scorer = if index == 0 {
                self.store.top_scorers(1).await?.into_iter().next()
            } else {
                None
            };
            let home_wins = self.team_win_count(details.home_team.id).await?;
            let away_wins = self.team_win_count(details.away_team.id).await?;
            reports.push(assemble_report(details, top_scorer, home_wins, away_wins));
        }

        Ok((reports, total))
    }
}

/// Pure part of report building: scores default to zero and goals are put in
/// minute order.
pub fn assemble_report(
    details: MatchDetails,
    top_scorer: Option<TopScorerResult>,
    home_team_total_wins: i64,
    away_team_total_wins: i64,
) -> MatchReport {
    let MatchDetails { fixture, home_team, away_team, mut goals } = details;

    let home_score = fixture.home_score.unwrap_or(0);
    let away_score = fixture.away_score.unwrap_or(0);
    let match_result = MatchResult::from_scores(home_score, away_score);
    let match_result_display = match_result.display(&home_team.name, &away_team.name);

    // Stable, so goals in the same minute keep their stored order.
    goals.sort_by_key(|goal| goal.minute);

    MatchReport {
        fixture,
        home_team: TeamSummary::from(&home_team),
        away_team: TeamSummary::from(&away_team),
        home_score,
        away_score,
        match_result,
        match_result_display,
        goals,
        top_scorer,
        home_team_total_wins,
        away_team_total_wins,
    }
}
