use clap::Subcommand;
use quotevault_core::{
    featured_quote, Config, DailyQuoteScheduler, HandoffBackend, NotificationBackend,
    ScheduleOutcome,
};

use super::{open_catalog, print_json, CliResult};

#[derive(Subcommand)]
pub enum NotifyAction {
    /// (Re)schedule the daily quote alert
    Schedule,
    /// Fire a one-off preview of the daily alert
    Test,
    /// Permission state and the pending alert
    Status,
}

fn scheduler(config: &Config) -> Result<DailyQuoteScheduler<HandoffBackend>, Box<dyn std::error::Error>> {
    let backend = HandoffBackend::open_default()?;
    Ok(DailyQuoteScheduler::new(
        backend,
        config.notifications.hour,
        config.notifications.minute,
    ))
}

fn report(outcome: ScheduleOutcome) {
    match outcome {
        ScheduleOutcome::Scheduled => println!("scheduled"),
        ScheduleOutcome::PermissionDenied => println!("permission denied, nothing scheduled"),
    }
}

pub fn run(action: NotifyAction) -> CliResult {
    let config = Config::load()?;

    match action {
        NotifyAction::Schedule => {
            let catalog = open_catalog(&config)?;
            let quote = featured_quote(catalog.as_ref(), chrono::Local::now().date_naive())?;
            let mut scheduler = scheduler(&config)?;
            report(scheduler.schedule_daily(&quote)?);
        }
        NotifyAction::Test => {
            let catalog = open_catalog(&config)?;
            let quote = featured_quote(catalog.as_ref(), chrono::Local::now().date_naive())?;
            let mut scheduler = scheduler(&config)?;
            report(scheduler.send_test(&quote)?);
        }
        NotifyAction::Status => {
            let backend = HandoffBackend::open_default()?;
            print_json(&serde_json::json!({
                "permission": backend.permission_status(),
                "pending": backend.pending(),
            }))?;
        }
    }
    Ok(())
}
