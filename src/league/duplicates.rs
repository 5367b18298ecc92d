// src/league/duplicates.rs
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::MatchStore;
use crate::models::league::DuplicateCheck;

/// Looks for an existing match on the same date between the same (unordered)
/// team pair.
///
/// The check is a soft guard against double entry, not a correctness
/// guarantee: a storage failure or a lookup that outlives the timeout is
/// reported as "no match found" so a transient outage never blocks a
/// legitimate submission. Do not tighten this into fail-closed.
pub struct DuplicateMatchResolver {
    store: Arc<dyn MatchStore>,
    timeout: Duration,
}

impl DuplicateMatchResolver {
    pub fn new(store: Arc<dyn MatchStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn find_existing(
        &self,
        date: NaiveDate,
        home_team_id: Uuid,
        away_team_id: Uuid,
    ) -> DuplicateCheck {
        let lookup = self
            .store
            .find_by_date_and_teams(date, home_team_id, away_team_id);

        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(Some(existing))) => DuplicateCheck::found(existing.id),
            Ok(Ok(None)) => DuplicateCheck::not_found(),
            Ok(Err(e)) => {
                tracing::warn!("Duplicate check failed, treating as no match: {}", e);
                DuplicateCheck::not_found()
            }
            Err(_) => {
                tracing::warn!(
                    "Duplicate check timed out after {:?}, treating as no match",
                    self.timeout
                );
                DuplicateCheck::not_found()
            }
        }
    }
}
