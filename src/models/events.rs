// src/models/events.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry in the append-only match-event log. Events are never
/// hard-deleted or edited; removal flips `is_deleted` and the event drops
/// out of every projection while staying around for audit.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchEvent {
    pub id: Uuid,
    pub match_id: Uuid,
    pub team_id: Uuid,
    pub minute: Option<i32>,
    #[serde(flatten)]
    pub payload: MatchEventPayload,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum MatchEventPayload {
    Goal {
        scorer_id: Uuid,
        assist_id: Option<Uuid>,
    },
    Substitution {
        player_off_id: Uuid,
        player_on_id: Uuid,
    },
}

impl MatchEventPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            MatchEventPayload::Goal { .. } => "goal",
            MatchEventPayload::Substitution { .. } => "substitution",
        }
    }

    pub fn is_goal(&self) -> bool {
        matches!(self, MatchEventPayload::Goal { .. })
    }
}

impl MatchEvent {
    pub fn is_live(&self) -> bool {
        !self.is_deleted
    }
}

// Request DTOs

#[derive(Debug, Serialize, Deserialize)]
pub struct AddEventRequest {
    pub team_id: Uuid,
    pub minute: Option<i32>,
    #[serde(flatten)]
    pub payload: MatchEventPayload,
}
