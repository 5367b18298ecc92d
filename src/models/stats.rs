// src/models/stats.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-player record for one match. `goals`/`assists` are derived from the
/// live event log and rewritten on every reconciliation; `minutes_played`
/// is entered by hand and only an explicit save may change it.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PlayerMatchStat {
    pub match_id: Uuid,
    pub team_id: Uuid,
    pub player_id: Uuid,
    pub goals: i32,
    pub assists: i32,
    pub minutes_played: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

/// Derived goal/assist tally for one player, as produced by the projector.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatLine {
    pub goals: i32,
    pub assists: i32,
}

/// One row of a manual stats save. Only override fields appear here; the
/// derived tallies cannot be written through this path.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StatOverride {
    pub player_id: Uuid,
    pub minutes_played: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SavePlayerStatsRequest {
    pub entries: Vec<StatOverride>,
}
