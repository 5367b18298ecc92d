// src/league/validation.rs
use crate::errors::SubmissionError;
use crate::models::league::{MatchDraft, MatchIntent};
use crate::models::reference::MatchTypeKind;

const MAX_REASONABLE_SCORE: i32 = 50;

/// Pre-write validation for match submissions. Everything here runs before
/// any storage effect, so a rejected draft leaves no partial state.
pub struct MatchValidator;

impl MatchValidator {
    pub fn new() -> Self {
        Self
    }

    /// Checks in contract order: team conflict, then reference data, then
    /// (for score submissions) the scores themselves.
    pub fn validate_draft(
        &self,
        intent: MatchIntent,
        draft: &MatchDraft,
    ) -> Result<(), SubmissionError> {
        if draft.home_team_id == draft.away_team_id {
            return Err(SubmissionError::TeamConflict);
        }

        if draft.season_id.is_none()
            || draft.age_group_id.is_none()
            || draft.match_type_id.is_none()
        {
            return Err(SubmissionError::MissingReferenceData);
        }

        if intent == MatchIntent::Score {
            let (home, away) = match (draft.home_score, draft.away_score) {
                (Some(h), Some(a)) => (h, a),
                _ => {
                    return Err(SubmissionError::InvalidScore(
                        "both scores are required to record a result".into(),
                    ))
                }
            };
            self.validate_scores(home, away)?;
        }

        Ok(())
    }

    pub fn validate_scores(&self, home_score: i32, away_score: i32) -> Result<(), SubmissionError> {
        if home_score < 0 || away_score < 0 {
            return Err(SubmissionError::InvalidScore(format!(
                "scores cannot be negative: {} - {}",
                home_score, away_score
            )));
        }

        // Upper bound catches obvious entry mistakes
        if home_score > MAX_REASONABLE_SCORE || away_score > MAX_REASONABLE_SCORE {
            return Err(SubmissionError::InvalidScore(format!(
                "score too high: {} - {} (max {})",
                home_score, away_score, MAX_REASONABLE_SCORE
            )));
        }

        Ok(())
    }

    /// Division presence is tied exactly to the match type: league matches
    /// must carry one, anything else must not (the caller clears it).
    pub fn validate_division_rule(
        &self,
        kind: MatchTypeKind,
        division_id: Option<uuid::Uuid>,
    ) -> Result<(), SubmissionError> {
        if kind.requires_division() && division_id.is_none() {
            return Err(SubmissionError::DivisionRequired);
        }
        Ok(())
    }
}

impl Default for MatchValidator {
    fn default() -> Self {
        Self::new()
    }
}
