use clap::Subcommand;
use quotevault_core::storage::Database;
use quotevault_core::{
    complete_reveal, featured_quote, refresh_daily, CardState, Config, DailyQuoteScheduler,
    GateStatus, GoalTracker, HandoffBackend, RevealGate, ScratchCard, WidgetDataBridge,
    GRID_SIZE,
};

use super::{open_catalog, print_json, CliResult};

#[derive(Subcommand)]
pub enum DailyAction {
    /// Select today's quote, update the widget, reschedule the alert
    Refresh,
    /// Today's featured quote, gate state, and goal progress
    Status,
    /// Scratch today's card with a synthetic drag path
    Scratch,
}

pub fn run(action: DailyAction) -> CliResult {
    let config = Config::load()?;
    let today = chrono::Local::now().date_naive();

    match action {
        DailyAction::Refresh => {
            let catalog = open_catalog(&config)?;
            let bridge = WidgetDataBridge::open_default()?;

            if config.notifications.enabled {
                let backend = HandoffBackend::open_default()?;
                let mut scheduler = DailyQuoteScheduler::new(
                    backend,
                    config.notifications.hour,
                    config.notifications.minute,
                );
                let refresh = refresh_daily(catalog.as_ref(), &bridge, &mut scheduler, today)?;
                print_json(&refresh)?;
            } else {
                let quote = featured_quote(catalog.as_ref(), today)?;
                // Same non-fatal widget leg as the scheduling path.
                let widget_published = match bridge.publish(&quote) {
                    Ok(_) => true,
                    Err(e) => {
                        log::warn!("widget update skipped: {e}");
                        false
                    }
                };
                print_json(&serde_json::json!({
                    "quote": quote,
                    "widget_published": widget_published,
                    "notification": "disabled",
                }))?;
            }
        }
        DailyAction::Status => {
            let catalog = open_catalog(&config)?;
            let db = Database::open()?;
            let gate = RevealGate::new(&db);
            let goal = GoalTracker::new(&db, config.goal.daily_target);
            let quote = featured_quote(catalog.as_ref(), today)?;

            print_json(&serde_json::json!({
                "date": today.to_string(),
                "quote": quote,
                "gate": gate.status(today),
                "goal": goal.progress(today),
            }))?;
        }
        DailyAction::Scratch => {
            let db = Database::open()?;
            let gate = RevealGate::new(&db);
            if gate.status(today) == GateStatus::Completed {
                println!("already revealed today");
                return Ok(());
            }

            // Serpentine drag across tile centers until the threshold
            // latches the reveal.
            let mut card = ScratchCard::new(300.0, 300.0);
            let tile = 300.0 / GRID_SIZE as f64;
            'drag: for row in 0..GRID_SIZE {
                for col in 0..GRID_SIZE {
                    let col = if row % 2 == 0 { col } else { GRID_SIZE - 1 - col };
                    let x = (col as f64 + 0.5) * tile;
                    let y = (row as f64 + 0.5) * tile;
                    let outcome = card.scratch(x, y);
                    if let Some(pulse) = outcome.pulse {
                        log::debug!(
                            "tile {} uncovered, pulse {:?}, coverage {:.2}",
                            outcome.tile.unwrap_or_default(),
                            pulse,
                            card.coverage()
                        );
                    }
                    if outcome.just_revealed {
                        break 'drag;
                    }
                }
            }
            debug_assert_eq!(card.state(), CardState::Revealed);

            let summary = complete_reveal(&db, config.goal.daily_target, today)?;
            print_json(&summary)?;
        }
    }
    Ok(())
}
