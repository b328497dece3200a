//! Daily quote notification scheduling.
//!
//! The scheduled content is fixed at schedule time -- the OS does not
//! re-read the quote when the alert fires -- so the recurring alert must
//! be cancelled and rescheduled whenever the featured quote changes
//! (once per day, together with the daily selection). Cancel-first also
//! makes repeated scheduling idempotent: two calls never leave two
//! alerts behind.
//!
//! Denied notification permission is a valid steady state, not an
//! error: scheduling quietly does nothing.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::quote::Quote;
use crate::storage::data_dir;

/// OS-level notification permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Undetermined,
    Granted,
    Denied,
}

/// A notification request handed to the OS backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    /// Associated data for deep-link-on-tap.
    pub quote_id: String,
    /// Local-time hour of the daily trigger.
    pub hour: u32,
    pub minute: u32,
}

/// What a scheduling attempt amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleOutcome {
    /// The daily alert is (re)scheduled.
    Scheduled,
    /// Permission denied; nothing scheduled, nothing wrong.
    PermissionDenied,
}

/// Seam to the host OS notification facility.
pub trait NotificationBackend {
    fn permission_status(&self) -> PermissionStatus;

    /// Prompt the user. Only called when the status is `Undetermined`.
    fn request_permission(&mut self) -> Result<PermissionStatus>;

    /// Cancel every notification previously scheduled by this feature.
    fn cancel_all_scheduled(&mut self) -> Result<()>;

    /// Register a repeating daily alert.
    fn schedule_daily(&mut self, request: &NotificationRequest) -> Result<()>;

    /// Fire a notification immediately (test/preview path).
    fn fire_now(&mut self, request: &NotificationRequest) -> Result<()>;
}

/// Notification body: `"{content}" — {author}`.
pub fn notification_body(quote: &Quote) -> String {
    format!("\"{}\" — {}", quote.content, quote.author)
}

const NOTIFICATION_TITLE: &str = "Random Quote ✨";

/// Schedules the recurring daily quote alert through a backend.
pub struct DailyQuoteScheduler<B: NotificationBackend> {
    backend: B,
    hour: u32,
    minute: u32,
}

impl<B: NotificationBackend> DailyQuoteScheduler<B> {
    /// Scheduler firing daily at the given local hour/minute (the app
    /// default is 09:00).
    pub fn new(backend: B, hour: u32, minute: u32) -> Self {
        Self {
            backend,
            hour,
            minute,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn request_for(&self, quote: &Quote) -> NotificationRequest {
        NotificationRequest {
            title: NOTIFICATION_TITLE.to_string(),
            body: notification_body(quote),
            quote_id: quote.id.clone(),
            hour: self.hour,
            minute: self.minute,
        }
    }

    /// Check permission, requesting it if undetermined. `Denied` maps to
    /// `Ok(None)` -- a silent no-op, not an error.
    fn ensure_permission(&mut self) -> Result<Option<()>> {
        let status = match self.backend.permission_status() {
            PermissionStatus::Undetermined => self.backend.request_permission()?,
            status => status,
        };
        match status {
            PermissionStatus::Granted => Ok(Some(())),
            _ => Ok(None),
        }
    }

    /// Cancel any prior recurring alert and schedule today's quote.
    pub fn schedule_daily(&mut self, quote: &Quote) -> Result<ScheduleOutcome> {
        if self.ensure_permission()?.is_none() {
            return Ok(ScheduleOutcome::PermissionDenied);
        }
        // Cancel existing to avoid duplicates.
        self.backend.cancel_all_scheduled()?;
        let request = self.request_for(quote);
        self.backend.schedule_daily(&request)?;
        Ok(ScheduleOutcome::Scheduled)
    }

    /// Fire a one-off preview of the daily alert right now.
    pub fn send_test(&mut self, quote: &Quote) -> Result<ScheduleOutcome> {
        if self.ensure_permission()?.is_none() {
            return Ok(ScheduleOutcome::PermissionDenied);
        }
        let request = self.request_for(quote);
        self.backend.fire_now(&request)?;
        Ok(ScheduleOutcome::Scheduled)
    }
}

/// Persisted state of the [`HandoffBackend`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HandoffState {
    permission: PermissionStatus,
    /// The single pending recurring alert, if any.
    scheduled: Option<NotificationRequest>,
}

impl Default for HandoffState {
    fn default() -> Self {
        Self {
            permission: PermissionStatus::Undetermined,
            scheduled: None,
        }
    }
}

/// File-backed backend: persists the pending schedule under the data
/// directory for the host shell to pick up. Plays the role the OS
/// notification center plays on device.
pub struct HandoffBackend {
    path: std::path::PathBuf,
    state: HandoffState,
}

impl HandoffBackend {
    pub fn open_default() -> Result<Self> {
        Self::at(data_dir()?.join("notifications.json"))
    }

    pub fn at(path: impl Into<std::path::PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => HandoffState::default(),
        };
        Ok(Self { path, state })
    }

    /// The pending recurring alert, if one is scheduled.
    pub fn pending(&self) -> Option<&NotificationRequest> {
        self.state.scheduled.as_ref()
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.state)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json.as_bytes())
            .map_err(|e| CoreError::Persistence(format!("notification state write: {e}")))?;
        std::fs::rename(&tmp, &self.path)
            .map_err(|e| CoreError::Persistence(format!("notification state rename: {e}")))?;
        Ok(())
    }
}

impl NotificationBackend for HandoffBackend {
    fn permission_status(&self) -> PermissionStatus {
        self.state.permission
    }

    fn request_permission(&mut self) -> Result<PermissionStatus> {
        // The CLI host has no prompt to show; recording the grant mirrors
        // the user accepting the OS dialog.
        self.state.permission = PermissionStatus::Granted;
        self.persist()?;
        Ok(self.state.permission)
    }

    fn cancel_all_scheduled(&mut self) -> Result<()> {
        self.state.scheduled = None;
        self.persist()
    }

    fn schedule_daily(&mut self, request: &NotificationRequest) -> Result<()> {
        self.state.scheduled = Some(request.clone());
        self.persist()
    }

    fn fire_now(&mut self, request: &NotificationRequest) -> Result<()> {
        log::info!("{}: {}", request.title, request.body);
        Ok(())
    }
}

/// In-memory backend for tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    pub permission: Option<PermissionStatus>,
    /// What `request_permission` answers (defaults to granted).
    pub grant_on_request: bool,
    pub scheduled: Vec<NotificationRequest>,
    pub cancel_calls: u32,
    pub fired: Vec<NotificationRequest>,
}

impl MemoryBackend {
    pub fn granted() -> Self {
        Self {
            permission: Some(PermissionStatus::Granted),
            grant_on_request: true,
            ..Default::default()
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: Some(PermissionStatus::Denied),
            grant_on_request: false,
            ..Default::default()
        }
    }

    pub fn undetermined(grant_on_request: bool) -> Self {
        Self {
            permission: None,
            grant_on_request,
            ..Default::default()
        }
    }
}

impl NotificationBackend for MemoryBackend {
    fn permission_status(&self) -> PermissionStatus {
        self.permission.unwrap_or(PermissionStatus::Undetermined)
    }

    fn request_permission(&mut self) -> Result<PermissionStatus> {
        let status = if self.grant_on_request {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        self.permission = Some(status);
        Ok(status)
    }

    fn cancel_all_scheduled(&mut self) -> Result<()> {
        self.cancel_calls += 1;
        self.scheduled.clear();
        Ok(())
    }

    fn schedule_daily(&mut self, request: &NotificationRequest) -> Result<()> {
        self.scheduled.push(request.clone());
        Ok(())
    }

    fn fire_now(&mut self, request: &NotificationRequest) -> Result<()> {
        self.fired.push(request.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_quote() -> Quote {
        Quote {
            id: "q-7".into(),
            content: "Believe you can and you're halfway there.".into(),
            author: "Theodore Roosevelt".into(),
            category_id: None,
            category_name: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn body_is_quoted_content_em_dash_author() {
        assert_eq!(
            notification_body(&sample_quote()),
            "\"Believe you can and you're halfway there.\" — Theodore Roosevelt"
        );
    }

    #[test]
    fn schedules_at_configured_time_with_quote_payload() {
        let mut scheduler = DailyQuoteScheduler::new(MemoryBackend::granted(), 9, 0);
        let outcome = scheduler.schedule_daily(&sample_quote()).unwrap();
        assert_eq!(outcome, ScheduleOutcome::Scheduled);

        let backend = scheduler.backend();
        assert_eq!(backend.scheduled.len(), 1);
        let req = &backend.scheduled[0];
        assert_eq!((req.hour, req.minute), (9, 0));
        assert_eq!(req.quote_id, "q-7");
        assert_eq!(req.title, "Random Quote ✨");
    }

    #[test]
    fn rescheduling_cancels_first_no_duplicates() {
        let mut scheduler = DailyQuoteScheduler::new(MemoryBackend::granted(), 9, 0);
        scheduler.schedule_daily(&sample_quote()).unwrap();
        scheduler.schedule_daily(&sample_quote()).unwrap();

        let backend = scheduler.backend();
        assert_eq!(backend.cancel_calls, 2);
        // Cancel-first keeps exactly one pending alert.
        assert_eq!(backend.scheduled.len(), 1);
    }

    #[test]
    fn denied_permission_is_a_silent_noop() {
        let mut scheduler = DailyQuoteScheduler::new(MemoryBackend::denied(), 9, 0);
        let outcome = scheduler.schedule_daily(&sample_quote()).unwrap();
        assert_eq!(outcome, ScheduleOutcome::PermissionDenied);
        assert!(scheduler.backend().scheduled.is_empty());
        assert_eq!(scheduler.backend().cancel_calls, 0);
    }

    #[test]
    fn undetermined_permission_is_requested_once() {
        let mut scheduler = DailyQuoteScheduler::new(MemoryBackend::undetermined(true), 9, 0);
        let outcome = scheduler.schedule_daily(&sample_quote()).unwrap();
        assert_eq!(outcome, ScheduleOutcome::Scheduled);
        assert_eq!(
            scheduler.backend().permission,
            Some(PermissionStatus::Granted)
        );
    }

    #[test]
    fn undetermined_then_denied_schedules_nothing() {
        let mut scheduler = DailyQuoteScheduler::new(MemoryBackend::undetermined(false), 9, 0);
        let outcome = scheduler.schedule_daily(&sample_quote()).unwrap();
        assert_eq!(outcome, ScheduleOutcome::PermissionDenied);
        assert!(scheduler.backend().scheduled.is_empty());
    }

    #[test]
    fn send_test_fires_immediately() {
        let mut scheduler = DailyQuoteScheduler::new(MemoryBackend::granted(), 9, 0);
        scheduler.send_test(&sample_quote()).unwrap();
        assert_eq!(scheduler.backend().fired.len(), 1);
        assert!(scheduler.backend().scheduled.is_empty());
    }

    #[test]
    fn handoff_backend_persists_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notifications.json");

        {
            let backend = HandoffBackend::at(&path).unwrap();
            let mut scheduler = DailyQuoteScheduler::new(backend, 21, 30);
            scheduler.schedule_daily(&sample_quote()).unwrap();
        }

        // Reopen: the pending alert survives the process.
        let backend = HandoffBackend::at(&path).unwrap();
        assert_eq!(backend.permission_status(), PermissionStatus::Granted);
        let pending = backend.pending().unwrap();
        assert_eq!((pending.hour, pending.minute), (21, 30));
        assert_eq!(pending.quote_id, "q-7");
    }
}
