//! # QuoteVault Core Library
//!
//! Core business logic for the QuoteVault quote-browsing app. All
//! catalog persistence and querying is delegated to a hosted backend
//! through thin request wrappers; what lives here is the daily
//! engagement machinery:
//!
//! - **Daily selector**: deterministic quote-of-the-day from the
//!   calendar date and catalog size
//! - **Widget bridge**: atomic file hand-off to the out-of-process
//!   home-screen widget renderer
//! - **Notification scheduler**: cancel-then-reschedule daily alert at a
//!   fixed local time, gated on OS permission
//! - **Reveal gate & goal**: once-per-day scratch gating and the daily
//!   reading-goal counter, both over a local key/value store
//! - **Scratch engine**: the tile-coverage state machine behind the
//!   scratch-card reveal
//!
//! ## Key Components
//!
//! - [`ScratchCard`]: scratch reveal state machine
//! - [`WidgetDataBridge`]: widget file hand-off
//! - [`DailyQuoteScheduler`]: daily notification scheduling
//! - [`QuoteSource`]: catalog access contract
//! - [`Config`]: application configuration management

pub mod auth;
pub mod config;
pub mod daily;
pub mod error;
pub mod library;
pub mod notify;
pub mod quote;
pub mod scratch;
pub mod share;
pub mod storage;
pub mod widget;

pub use config::{Config, SettingsStore};
pub use daily::{
    complete_reveal, featured_quote, quote_of_the_day_index, record_engagement, refresh_daily,
    DailyRefresh, GateStatus, GoalProgress, GoalTracker, NotificationStatus, RevealGate,
    RevealSummary,
};
pub use error::{BackendError, ConfigError, CoreError, DatabaseError};
pub use library::{Collection, RemoteLibrary};
pub use notify::{
    DailyQuoteScheduler, HandoffBackend, NotificationBackend, NotificationRequest,
    PermissionStatus, ScheduleOutcome,
};
pub use quote::{remote::RemoteQuoteSource, Category, FixtureQuoteSource, Quote, QuoteSource};
pub use scratch::{CardState, Pulse, ScratchCard, ScratchOutcome, GRID_SIZE, TILE_COUNT};
pub use share::{share_card, ShareStyle};
pub use storage::{Database, KvStore, MemoryStore};
pub use widget::{FeaturedQuoteRecord, WidgetDataBridge, WidgetSnapshot};
