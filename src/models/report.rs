use serde::{Deserialize, Serialize};
use uuid::Uuid;
use std::fmt::Display;

use crate::models::league::{GoalDetail, Match, Team};

/// Outcome of a match from the fixture's point of view.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    HomeWin,
    AwayWin,
    Draw,
}

impl MatchResult {
    pub fn from_scores(home_score: i32, away_score: i32) -> Self {
        if home_score > away_score {
            MatchResult::HomeWin
        } else if away_score > home_score {
            MatchResult::AwayWin
        } else {
            MatchResult::Draw
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchResult::HomeWin => "home_win",
            MatchResult::AwayWin => "away_win",
            MatchResult::Draw => "draw",
        }
    }

    /// Human readable line, e.g. "Persija wins".
    pub fn display(&self, home_team: &str, away_team: &str) -> String {
        match self {
            MatchResult::HomeWin => format!("{} wins", home_team),
            MatchResult::AwayWin => format!("{} wins", away_team),
            MatchResult::Draw => "Draw".to_string(),
        }
    }
}

impl Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TopScorerResult {
    pub player_id: Uuid,
    pub player_name: String,
    pub team_id: Uuid,
    pub team_name: String,
    pub goal_count: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TeamSummary {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
}

impl From<&Team> for TeamSummary {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            logo_url: team.logo_url.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MatchReport {
    #[serde(rename = "match")]
    pub fixture: Match,
    pub home_team: TeamSummary,
    pub away_team: TeamSummary,
    pub home_score: i32,
    pub away_score: i32,
    pub match_result: MatchResult,
    pub match_result_display: String,
    pub goals: Vec<GoalDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_scorer: Option<TopScorerResult>,
    pub home_team_total_wins: i64,
    pub away_team_total_wins: i64,
}
