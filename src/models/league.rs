// src/models/league.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Match {
    pub id: Uuid,
    pub date: NaiveDate,
    /// Absolute kickoff instant, derived from the submitted local date and
    /// time-of-day. Absent when no kickoff time was given.
    pub kickoff_at: Option<DateTime<Utc>>,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub season_id: Uuid,
    pub age_group_id: Uuid,
    pub match_type_id: Uuid,
    pub division_id: Option<Uuid>,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Completed,
    Postponed,
    Cancelled,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Completed => "completed",
            MatchStatus::Postponed => "postponed",
            MatchStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(MatchStatus::Scheduled),
            "completed" => Ok(MatchStatus::Completed),
            "postponed" => Ok(MatchStatus::Postponed),
            "cancelled" => Ok(MatchStatus::Cancelled),
            other => Err(format!("unknown match status: {}", other)),
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the caller is trying to do with a submission. Scheduling records a
/// fixture ahead of time; scoring records a final result, whether or not
/// the fixture was scheduled first.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchIntent {
    Schedule,
    Score,
}

/// Caller-supplied match fields, validated before any write.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchDraft {
    pub date: NaiveDate,
    pub kickoff_time: Option<NaiveTime>,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub season_id: Option<Uuid>,
    pub age_group_id: Option<Uuid>,
    pub match_type_id: Option<Uuid>,
    pub division_id: Option<Uuid>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

// Request/Response DTOs

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitMatchRequest {
    pub intent: MatchIntent,
    #[serde(flatten)]
    pub draft: MatchDraft,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateMatchStatusRequest {
    pub status: MatchStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExistingMatchQuery {
    pub date: NaiveDate,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
}

impl fmt::Display for ExistingMatchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "date: {}, home: {}, away: {}",
            self.date, self.home_team_id, self.away_team_id
        )
    }
}

/// Result of the duplicate lookup. `exists: false` also covers lookup
/// failures; the check is a soft guard and fails open.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateCheck {
    pub exists: bool,
    pub match_id: Option<Uuid>,
}

impl DuplicateCheck {
    pub fn not_found() -> Self {
        Self { exists: false, match_id: None }
    }

    pub fn found(match_id: Uuid) -> Self {
        Self { exists: true, match_id: Some(match_id) }
    }
}
