// src/models/league.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use std::fmt;
use std::str::FromStr;

use crate::utils::validation::validate_name;

pub const MAX_GOAL_MINUTE: i32 = 120;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub logo_url: Option<String>,
    pub founded_year: Option<i32>,
    pub stadium: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlayerPosition {
    Forward,
    Midfielder,
    Defender,
    Goalkeeper,
}

impl PlayerPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerPosition::Forward => "forward",
            PlayerPosition::Midfielder => "midfielder",
            PlayerPosition::Defender => "defender",
            PlayerPosition::Goalkeeper => "goalkeeper",
        }
    }
}

impl FromStr for PlayerPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" => Ok(PlayerPosition::Forward),
            "midfielder" => Ok(PlayerPosition::Midfielder),
            "defender" => Ok(PlayerPosition::Defender),
            "goalkeeper" => Ok(PlayerPosition::Goalkeeper),
            other => Err(format!("unknown player position: {}", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    pub height: Option<i32>,
    pub weight: Option<i32>,
    pub position: PlayerPosition,
    pub jersey_number: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Completed => "completed",
            MatchStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(MatchStatus::Scheduled),
            "in_progress" => Ok(MatchStatus::InProgress),
            "completed" => Ok(MatchStatus::Completed),
            "cancelled" => Ok(MatchStatus::Cancelled),
            other => Err(format!("unknown match status: {}", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub match_date: NaiveDate,
    pub match_time: String,
    pub status: MatchStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Goal {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    /// Side credited with the goal. For own goals this is the opponent of
    /// the player's own team.
    pub team_id: Uuid,
    pub minute: i32,
    pub is_own_goal: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A goal joined with the names needed to render it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GoalDetail {
    pub id: Uuid,
    pub match_id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub team_id: Uuid,
    pub team_name: String,
    pub minute: i32,
    pub is_own_goal: bool,
}

/// A match together with both sides and its recorded goals.
#[derive(Debug, Clone)]
pub struct MatchDetails {
    pub fixture: Match,
    pub home_team: Team,
    pub away_team: Team,
    pub goals: Vec<GoalDetail>,
}

// Request DTOs

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamRequest {
    pub name: String,
    pub logo_url: Option<String>,
    pub founded_year: Option<i32>,
    pub stadium: Option<String>,
    pub city: Option<String>,
}

impl TeamRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name("name", &self.name, 255)?;
        if let Some(year) = self.founded_year {
            if !(1800..=2100).contains(&year) {
                return Err("founded_year must be between 1800 and 2100".to_string());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayerRequest {
    pub name: String,
    pub height: Option<i32>,
    pub weight: Option<i32>,
    pub position: PlayerPosition,
    pub jersey_number: i32,
}

impl PlayerRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_name("name", &self.name, 255)?;
        if !(1..=99).contains(&self.jersey_number) {
            return Err("jersey_number must be between 1 and 99".to_string());
        }
        if matches!(self.height, Some(h) if h <= 0) || matches!(self.weight, Some(w) if w <= 0) {
            return Err("height and weight must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateMatchRequest {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub match_date: NaiveDate,
    pub match_time: String,
}

impl CreateMatchRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.home_team_id == self.away_team_id {
            return Err("home and away team must be different".to_string());
        }
        validate_match_time(&self.match_time)
    }
}

/// `HH:MM`, 24-hour clock.
pub fn validate_match_time(value: &str) -> Result<(), String> {
    let invalid = || Err("match_time must use the HH:MM format".to_string());
    let Some((hours, minutes)) = value.split_once(':') else {
        return invalid();
    };
    if hours.len() != 2 || minutes.len() != 2 {
        return invalid();
    }
    match (hours.parse::<u32>(), minutes.parse::<u32>()) {
        (Ok(h), Ok(m)) if h < 24 && m < 60 => Ok(()),
        _ => invalid(),
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GoalRequest {
    pub player_id: Uuid,
    pub team_id: Uuid,
    pub minute: i32,
    #[serde(default)]
    pub is_own_goal: bool,
}

impl GoalRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=MAX_GOAL_MINUTE).contains(&self.minute) {
            return Err(format!("minute must be between 1 and {}", MAX_GOAL_MINUTE));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchResultRequest {
    pub home_score: i32,
    pub away_score: i32,
    #[serde(default)]
    pub goals: Vec<GoalRequest>,
}

impl MatchResultRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.home_score < 0 || self.away_score < 0 {
            return Err("scores cannot be negative".to_string());
        }
        self.goals.iter().try_for_each(GoalRequest::validate)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AddGoalsRequest {
    pub goals: Vec<GoalRequest>,
}

impl AddGoalsRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.goals.is_empty() {
            return Err("at least one goal is required".to_string());
        }
        self.goals.iter().try_for_each(GoalRequest::validate)
    }
}
