//! Daily reading-goal counter.
//!
//! Counts "quotes explored" per calendar day: reveals, favorite toggles,
//! exports and collection adds each bump the counter. Entries are
//! namespaced by date so yesterday's progress never leaks into today.

use chrono::NaiveDate;
use serde::Serialize;

use super::gate::day_key;
use crate::error::Result;
use crate::storage::KvStore;

/// Daily goal progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    pub current: u32,
    pub target: u32,
}

/// Tracks the per-day reading goal over a key/value store.
pub struct GoalTracker<'a, S: KvStore> {
    store: &'a S,
    target: u32,
}

impl<'a, S: KvStore> GoalTracker<'a, S> {
    pub fn new(store: &'a S, target: u32) -> Self {
        Self { store, target }
    }

    fn key(date: NaiveDate) -> String {
        format!("daily_goal_{}", day_key(date))
    }

    /// Today's progress. Missing or unparsable entries read as zero.
    pub fn progress(&self, today: NaiveDate) -> GoalProgress {
        let current = match self.store.get(&Self::key(today)) {
            Ok(Some(raw)) => raw.parse::<u32>().unwrap_or(0),
            Ok(None) => 0,
            Err(e) => {
                log::warn!("goal counter read failed, treating as zero: {e}");
                0
            }
        };
        GoalProgress {
            current,
            target: self.target,
        }
    }

    /// Increment today's counter, capped at the target.
    ///
    /// Returns the progress after the increment. Once the target is
    /// reached further increments are no-ops.
    pub fn increment(&self, today: NaiveDate) -> Result<GoalProgress> {
        let progress = self.progress(today);
        if progress.current >= self.target {
            return Ok(progress);
        }
        let next = progress.current + 1;
        self.store.set(&Self::key(today), &next.to_string())?;
        Ok(GoalProgress {
            current: next,
            target: self.target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn starts_at_zero() {
        let store = MemoryStore::new();
        let goal = GoalTracker::new(&store, 15);
        assert_eq!(
            goal.progress(date(2024, 3, 15)),
            GoalProgress {
                current: 0,
                target: 15
            }
        );
    }

    #[test]
    fn increments_and_caps_at_target() {
        let store = MemoryStore::new();
        let goal = GoalTracker::new(&store, 3);
        let today = date(2024, 3, 15);

        assert_eq!(goal.increment(today).unwrap().current, 1);
        assert_eq!(goal.increment(today).unwrap().current, 2);
        assert_eq!(goal.increment(today).unwrap().current, 3);
        // Target reached: further increments are no-ops.
        assert_eq!(goal.increment(today).unwrap().current, 3);
    }

    #[test]
    fn counter_is_scoped_per_day() {
        let store = MemoryStore::new();
        let goal = GoalTracker::new(&store, 15);

        goal.increment(date(2024, 3, 14)).unwrap();
        assert_eq!(goal.progress(date(2024, 3, 15)).current, 0);
        assert_eq!(goal.progress(date(2024, 3, 14)).current, 1);
    }

    #[test]
    fn garbage_entry_reads_as_zero() {
        let store = MemoryStore::new();
        store.set("daily_goal_2024-03-15", "not a number").unwrap();
        let goal = GoalTracker::new(&store, 15);
        assert_eq!(goal.progress(date(2024, 3, 15)).current, 0);
    }
}
