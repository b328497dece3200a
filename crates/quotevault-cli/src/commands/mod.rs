pub mod auth;
pub mod collection;
pub mod config;
pub mod daily;
pub mod favorite;
pub mod goal;
pub mod notify;
pub mod quote;
pub mod widget;

use quotevault_core::auth::{current_session, Session};
use quotevault_core::storage::Database;
use quotevault_core::{record_engagement, Config, FixtureQuoteSource, QuoteSource, RemoteQuoteSource};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Catalog handle: the hosted backend when one is configured, the
/// bundled fixture set otherwise.
pub fn open_catalog(config: &Config) -> Result<Box<dyn QuoteSource>, Box<dyn std::error::Error>> {
    if config.backend.base_url.is_empty() {
        return Ok(Box::new(FixtureQuoteSource::bundled()));
    }
    let token = current_session()?.map(|s| s.token);
    Ok(Box::new(RemoteQuoteSource::new(
        &config.backend.base_url,
        token,
    )?))
}

/// Session for commands that require a logged-in user.
pub fn require_session() -> Result<Session, Box<dyn std::error::Error>> {
    match current_session()? {
        Some(session) => Ok(session),
        None => Err("not logged in (run `auth login` first)".into()),
    }
}

/// Engagement actions (favorite toggles, exports, collection adds)
/// count toward the daily reading goal. Goal bookkeeping never fails
/// the action that triggered it.
pub fn bump_goal(config: &Config) {
    let today = chrono::Local::now().date_naive();
    match Database::open() {
        Ok(db) => {
            let progress = record_engagement(&db, config.goal.daily_target, today);
            log::debug!("daily goal at {}/{}", progress.current, progress.target);
        }
        Err(e) => log::warn!("goal bump skipped: {e}"),
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One-line quote rendering for list output.
pub fn format_quote(quote: &quotevault_core::Quote) -> String {
    format!("{}  \"{}\" — {}", quote.id, quote.content, quote.author)
}
