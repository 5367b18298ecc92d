// src/league/lifecycle.rs
use std::sync::Arc;

use chrono::FixedOffset;
use uuid::Uuid;

use crate::auth::actor::ActorContext;
use crate::db::{MatchStore, NewMatch, ReferenceDataProvider};
use crate::errors::SubmissionError;
use crate::league::duplicates::DuplicateMatchResolver;
use crate::league::kickoff::kickoff_instant;
use crate::league::validation::MatchValidator;
use crate::models::league::{Match, MatchDraft, MatchIntent, MatchStatus};

/// Owns the match entity's state transitions and the schedule-vs-score
/// submission policy.
pub struct MatchLifecycleManager {
    matches: Arc<dyn MatchStore>,
    reference: Arc<dyn ReferenceDataProvider>,
    duplicates: DuplicateMatchResolver,
    validator: MatchValidator,
    reference_offset: FixedOffset,
}

impl MatchLifecycleManager {
    pub fn new(
        matches: Arc<dyn MatchStore>,
        reference: Arc<dyn ReferenceDataProvider>,
        duplicates: DuplicateMatchResolver,
        reference_offset: FixedOffset,
    ) -> Self {
        Self {
            matches,
            reference,
            duplicates,
            validator: MatchValidator::new(),
            reference_offset,
        }
    }

    /// Submit a match, either scheduling a fixture or recording a result.
    ///
    /// Scoring a fixture that was previously scheduled for the same date
    /// and team pair updates that record in place instead of inserting a
    /// second row; scheduling onto an existing fixture is rejected.
    pub async fn submit(
        &self,
        actor: &ActorContext,
        intent: MatchIntent,
        draft: MatchDraft,
    ) -> Result<Match, SubmissionError> {
        self.validator.validate_draft(intent, &draft)?;

        let match_type_id = draft
            .match_type_id
            .ok_or(SubmissionError::MissingReferenceData)?;
        let match_type = self
            .reference
            .match_type(match_type_id)
            .await?
            .ok_or(SubmissionError::MissingReferenceData)?;
        self.validator
            .validate_division_rule(match_type.kind, draft.division_id)?;

        // The presence invariant cuts both ways: non-league submissions
        // never carry a division, whatever the client sent.
        let division_id = if match_type.kind.requires_division() {
            draft.division_id
        } else {
            if draft.division_id.is_some() {
                tracing::debug!("Dropping division from non-league submission");
            }
            None
        };

        let duplicate = self
            .duplicates
            .find_existing(draft.date, draft.home_team_id, draft.away_team_id)
            .await;

        let record = NewMatch {
            date: draft.date,
            kickoff_at: kickoff_instant(draft.date, draft.kickoff_time, self.reference_offset),
            home_team_id: draft.home_team_id,
            away_team_id: draft.away_team_id,
            home_score: None,
            away_score: None,
            season_id: draft.season_id.ok_or(SubmissionError::MissingReferenceData)?,
            age_group_id: draft
                .age_group_id
                .ok_or(SubmissionError::MissingReferenceData)?,
            match_type_id,
            division_id,
            status: MatchStatus::Scheduled,
        };

        match intent {
            MatchIntent::Schedule => {
                if duplicate.exists {
                    tracing::info!(
                        "Rejecting schedule submission by {}: match already exists for {} ({} vs {})",
                        actor.user_id,
                        draft.date,
                        draft.home_team_id,
                        draft.away_team_id
                    );
                    return Err(SubmissionError::DuplicateMatch {
                        existing_id: duplicate.match_id,
                    });
                }

                let created = self.matches.insert(record).await?;
                tracing::info!("Scheduled match {} on {}", created.id, created.date);
                Ok(created)
            }
            MatchIntent::Score => {
                let record = NewMatch {
                    home_score: draft.home_score,
                    away_score: draft.away_score,
                    status: MatchStatus::Completed,
                    ..record
                };

                match duplicate.match_id {
                    // Scoring a known fixture completes it in place; a
                    // second row for the same pairing must never appear.
                    Some(existing_id) => {
                        let updated = self.matches.update(existing_id, record).await?;
                        tracing::info!(
                            "Recorded result {}:{} on existing match {}",
                            updated.home_score.unwrap_or(0),
                            updated.away_score.unwrap_or(0),
                            updated.id
                        );
                        Ok(updated)
                    }
                    // Results for games that were never scheduled get a
                    // fresh completed record.
                    None => {
                        let created = self.matches.insert(record).await?;
                        tracing::info!("Recorded result on new match {}", created.id);
                        Ok(created)
                    }
                }
            }
        }
    }

    /// Direct status change for postponements and cancellations (and
    /// putting a postponed fixture back on the calendar).
    pub async fn update_status(
        &self,
        actor: &ActorContext,
        match_id: Uuid,
        status: MatchStatus,
    ) -> Result<Match, SubmissionError> {
        if status == MatchStatus::Completed {
            return Err(SubmissionError::InvalidScore(
                "a result must be recorded through a score submission".into(),
            ));
        }

        let existing = self
            .matches
            .find(match_id)
            .await?
            .ok_or(SubmissionError::NotFound)?;

        if existing.status == MatchStatus::Completed {
            return Err(SubmissionError::CompletedIsFinal(status.as_str()));
        }

        let updated = self.matches.set_status(match_id, status).await?;
        tracing::info!(
            "Match {} moved to {} by {}",
            match_id,
            status,
            actor.user_id
        );
        Ok(updated)
    }

    pub async fn get_match(&self, match_id: Uuid) -> Result<Option<Match>, SubmissionError> {
        Ok(self.matches.find(match_id).await?)
    }

    /// Duplicate pre-check exposed to clients that want to warn before
    /// submitting.
    pub async fn check_existing(
        &self,
        date: chrono::NaiveDate,
        home_team_id: Uuid,
        away_team_id: Uuid,
    ) -> crate::models::league::DuplicateCheck {
        self.duplicates
            .find_existing(date, home_team_id, away_team_id)
            .await
    }
}
