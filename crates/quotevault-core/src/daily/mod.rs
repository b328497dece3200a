//! Daily engagement orchestration.
//!
//! Ties the pieces together the way the home screen does: pick the day's
//! featured quote, hand it to the widget bridge and the notification
//! scheduler, and wire the scratch reveal into the once-per-day gate and
//! the reading-goal counter.

pub mod gate;
pub mod goal;
pub mod selector;

pub use gate::{GateStatus, RevealGate, LAST_SCRATCH_KEY};
pub use goal::{GoalProgress, GoalTracker};
pub use selector::{date_key, quote_of_the_day_index};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::notify::{DailyQuoteScheduler, NotificationBackend, ScheduleOutcome};
use crate::quote::{Quote, QuoteSource};
use crate::storage::KvStore;
use crate::widget::WidgetDataBridge;

/// How the notification leg of a refresh went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Scheduled,
    PermissionDenied,
    Failed,
}

/// Summary of one daily refresh.
#[derive(Debug, Clone, Serialize)]
pub struct DailyRefresh {
    pub quote: Quote,
    /// False when the bridge write failed; the prior record stays visible.
    pub widget_published: bool,
    pub notification: NotificationStatus,
}

/// Fetch the featured quote for `today`.
///
/// # Errors
/// Propagates [`crate::error::CoreError::NotAvailable`] when the count or
/// the quote cannot be obtained; the caller must leave prior widget and
/// notification state untouched in that case.
pub fn featured_quote<Q: QuoteSource + ?Sized>(source: &Q, today: NaiveDate) -> Result<Quote> {
    let count = source.count()?;
    let index = quote_of_the_day_index(today, count)?;
    source.by_index(index)
}

/// Select today's quote, publish it to the widget bridge, and refresh
/// the daily notification.
///
/// The bridge and scheduler legs are independent of each other and both
/// non-fatal: a failed widget write or scheduling error degrades to "no
/// update today" with a logged warning, never an error to the caller.
pub fn refresh_daily<Q, B>(
    source: &Q,
    bridge: &WidgetDataBridge,
    scheduler: &mut DailyQuoteScheduler<B>,
    today: NaiveDate,
) -> Result<DailyRefresh>
where
    Q: QuoteSource + ?Sized,
    B: NotificationBackend,
{
    let quote = featured_quote(source, today)?;

    let widget_published = match bridge.publish(&quote) {
        Ok(_) => true,
        Err(e) => {
            log::warn!("widget update skipped: {e}");
            false
        }
    };

    let notification = match scheduler.schedule_daily(&quote) {
        Ok(ScheduleOutcome::Scheduled) => NotificationStatus::Scheduled,
        Ok(ScheduleOutcome::PermissionDenied) => NotificationStatus::PermissionDenied,
        Err(e) => {
            log::warn!("daily notification reschedule failed: {e}");
            NotificationStatus::Failed
        }
    };

    Ok(DailyRefresh {
        quote,
        widget_published,
        notification,
    })
}

/// Outcome of completing the daily reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevealSummary {
    /// False when the gate was already `Completed` today (nothing done).
    pub first_reveal_today: bool,
    pub goal: GoalProgress,
}

/// The scratch engine's reveal-completion callback: latch the gate for
/// today and bump the reading goal once.
///
/// Runs on the single UI thread, so check-then-transition cannot
/// interleave with another writer.
pub fn complete_reveal<S: KvStore>(
    store: &S,
    goal_target: u32,
    today: NaiveDate,
) -> Result<RevealSummary> {
    let gate = RevealGate::new(store);
    let goal = GoalTracker::new(store, goal_target);

    if gate.status(today) == GateStatus::Completed {
        return Ok(RevealSummary {
            first_reveal_today: false,
            goal: goal.progress(today),
        });
    }

    gate.complete(today)?;
    let progress = goal.increment(today)?;
    Ok(RevealSummary {
        first_reveal_today: true,
        goal: progress,
    })
}

/// Count one engagement action (favorite toggle, export, collection
/// add) toward today's goal, same counter the reveal bumps.
///
/// Goal bookkeeping never fails the action that triggered it: storage
/// failures degrade to unchanged progress with a logged warning.
pub fn record_engagement<S: KvStore>(
    store: &S,
    goal_target: u32,
    today: NaiveDate,
) -> GoalProgress {
    let goal = GoalTracker::new(store, goal_target);
    match goal.increment(today) {
        Ok(progress) => progress,
        Err(e) => {
            log::warn!("goal bump skipped: {e}");
            goal.progress(today)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::notify::MemoryBackend;
    use crate::quote::FixtureQuoteSource;
    use crate::storage::MemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn refresh_publishes_and_schedules_the_same_quote() {
        let source = FixtureQuoteSource::bundled();
        let dir = tempfile::tempdir().unwrap();
        let bridge = WidgetDataBridge::at(dir.path().join("widget_quote.json"));
        let mut scheduler = DailyQuoteScheduler::new(MemoryBackend::granted(), 9, 0);

        let today = date(2024, 3, 15);
        let refresh = refresh_daily(&source, &bridge, &mut scheduler, today).unwrap();

        assert!(refresh.widget_published);
        assert_eq!(refresh.notification, NotificationStatus::Scheduled);

        let record = bridge.read().unwrap();
        assert_eq!(record.id, refresh.quote.id);
        assert_eq!(scheduler.backend().scheduled[0].quote_id, refresh.quote.id);

        // Deterministic: a second refresh picks the same quote.
        let again = refresh_daily(&source, &bridge, &mut scheduler, today).unwrap();
        assert_eq!(again.quote.id, refresh.quote.id);
    }

    #[test]
    fn empty_catalog_leaves_prior_state_untouched() {
        let source = FixtureQuoteSource::bundled();
        let dir = tempfile::tempdir().unwrap();
        let bridge = WidgetDataBridge::at(dir.path().join("widget_quote.json"));
        let mut scheduler = DailyQuoteScheduler::new(MemoryBackend::granted(), 9, 0);

        let today = date(2024, 3, 15);
        refresh_daily(&source, &bridge, &mut scheduler, today).unwrap();
        let before = bridge.read().unwrap();

        let empty = FixtureQuoteSource::new(Vec::new(), Vec::new());
        assert!(refresh_daily(&empty, &bridge, &mut scheduler, today).is_err());

        // Prior record and schedule stay as they were.
        assert_eq!(bridge.read().unwrap(), before);
        assert_eq!(scheduler.backend().scheduled.len(), 1);
    }

    #[test]
    fn widget_failure_does_not_block_notification() {
        let source = FixtureQuoteSource::bundled();
        let bridge = WidgetDataBridge::at("/nonexistent-dir/widget_quote.json");
        let mut scheduler = DailyQuoteScheduler::new(MemoryBackend::granted(), 9, 0);

        let refresh =
            refresh_daily(&source, &bridge, &mut scheduler, date(2024, 3, 15)).unwrap();
        assert!(!refresh.widget_published);
        assert_eq!(refresh.notification, NotificationStatus::Scheduled);
    }

    #[test]
    fn denied_permission_still_updates_widget() {
        let source = FixtureQuoteSource::bundled();
        let dir = tempfile::tempdir().unwrap();
        let bridge = WidgetDataBridge::at(dir.path().join("widget_quote.json"));
        let mut scheduler = DailyQuoteScheduler::new(MemoryBackend::denied(), 9, 0);

        let refresh =
            refresh_daily(&source, &bridge, &mut scheduler, date(2024, 3, 15)).unwrap();
        assert!(refresh.widget_published);
        assert_eq!(refresh.notification, NotificationStatus::PermissionDenied);
    }

    #[test]
    fn first_reveal_latches_gate_and_bumps_goal() {
        let store = MemoryStore::new();
        let today = date(2024, 3, 15);

        let summary = complete_reveal(&store, 15, today).unwrap();
        assert!(summary.first_reveal_today);
        assert_eq!(summary.goal.current, 1);

        // Second completion attempt the same day is a no-op.
        let summary = complete_reveal(&store, 15, today).unwrap();
        assert!(!summary.first_reveal_today);
        assert_eq!(summary.goal.current, 1);

        // Next day the gate has reset.
        let summary = complete_reveal(&store, 15, date(2024, 3, 16)).unwrap();
        assert!(summary.first_reveal_today);
        assert_eq!(summary.goal.current, 1);
    }

    #[test]
    fn engagement_actions_share_the_reveal_counter() {
        let store = MemoryStore::new();
        let today = date(2024, 3, 15);

        assert_eq!(record_engagement(&store, 3, today).current, 1);
        assert_eq!(record_engagement(&store, 3, today).current, 2);

        // The reveal bumps the same counter.
        let summary = complete_reveal(&store, 3, today).unwrap();
        assert_eq!(summary.goal.current, 3);

        // Target reached: further engagements are no-ops.
        assert_eq!(record_engagement(&store, 3, today).current, 3);
    }

    struct FailingStore;

    impl KvStore for FailingStore {
        fn get(&self, _key: &str) -> crate::error::Result<Option<String>> {
            Err(CoreError::Persistence("store down".into()))
        }
        fn set(&self, _key: &str, _value: &str) -> crate::error::Result<()> {
            Err(CoreError::Persistence("store down".into()))
        }
        fn delete(&self, _key: &str) -> crate::error::Result<()> {
            Err(CoreError::Persistence("store down".into()))
        }
    }

    #[test]
    fn engagement_survives_storage_failure() {
        // The triggering action already succeeded; the bump degrades.
        let progress = record_engagement(&FailingStore, 15, date(2024, 3, 15));
        assert_eq!(progress.current, 0);
        assert_eq!(progress.target, 15);
    }
}
