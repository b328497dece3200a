//! Once-per-day reveal gate.
//!
//! A per-day boolean latch: the scratch reveal can complete at most once
//! per calendar day. The only persisted state is the date key of the last
//! completed reveal; a key from a prior day reads as `Available`, so the
//! gate resets itself at midnight with no migration step.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::storage::KvStore;

/// Key holding the date of the last completed reveal.
pub const LAST_SCRATCH_KEY: &str = "last_scratch_date";

/// Gate state for the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GateStatus {
    /// Today's reveal has not been completed yet.
    Available,
    /// Today's reveal is done; the only way out is the passage of time.
    Completed,
}

/// Date key used for all per-day storage entries.
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The once-per-day reveal gate over a key/value store.
pub struct RevealGate<'a, S: KvStore> {
    store: &'a S,
}

impl<'a, S: KvStore> RevealGate<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Side-effect-free query of today's gate state.
    ///
    /// A stored key that doesn't match today (stale completion from a
    /// prior day) reads as `Available`. Storage read failures degrade to
    /// `Available` with a logged warning.
    pub fn status(&self, today: NaiveDate) -> GateStatus {
        match self.store.get(LAST_SCRATCH_KEY) {
            Ok(Some(stored)) if stored == day_key(today) => GateStatus::Completed,
            Ok(_) => GateStatus::Available,
            Err(e) => {
                log::warn!("reveal gate read failed, treating as available: {e}");
                GateStatus::Available
            }
        }
    }

    /// Transition `Available -> Completed` for today.
    ///
    /// The caller invokes this exactly once, from the scratch engine's
    /// reveal-completion callback. Repeat calls on the same day rewrite
    /// the same key and are harmless.
    pub fn complete(&self, today: NaiveDate) -> Result<()> {
        self.store.set(LAST_SCRATCH_KEY, &day_key(today))
    }
}
