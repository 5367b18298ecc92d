// src/errors.rs
//
// Closed error taxonomy for the match core. Validation failures are
// detected before any write; storage failures are surfaced to the caller
// (no internal retry) except where a component explicitly fails open.
use thiserror::Error;
use uuid::Uuid;

/// Storage-boundary failures as seen by the core.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("transient storage failure: {0}")]
    Transient(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Transient(other.to_string()),
        }
    }
}

/// Failures of a schedule/score submission.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("home and away team must differ")]
    TeamConflict,
    #[error("season, age group and match type are required")]
    MissingReferenceData,
    #[error("a division is required for league matches")]
    DivisionRequired,
    #[error("invalid score: {0}")]
    InvalidScore(String),
    #[error("a match for this date and team pair already exists")]
    DuplicateMatch { existing_id: Option<Uuid> },
    #[error("match not found")]
    NotFound,
    #[error("a completed match cannot be {0}; resubmit the result instead")]
    CompletedIsFinal(&'static str),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Failures of an event-log or stats mutation.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("not allowed to edit this team's match data")]
    Unauthorized,
    #[error("match not found")]
    MatchNotFound,
    #[error("event not found")]
    EventNotFound,
    #[error("team does not play in this match")]
    TeamNotInMatch,
    #[error(transparent)]
    Storage(#[from] StoreError),
}
