use clap::Subcommand;
use quotevault_core::storage::Database;
use quotevault_core::{Config, GoalTracker};

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Today's progress toward the reading goal
    Status,
    /// Count one quote as read today
    Bump,
}

pub fn run(action: GoalAction) -> CliResult {
    let config = Config::load()?;
    let db = Database::open()?;
    let goal = GoalTracker::new(&db, config.goal.daily_target);
    let today = chrono::Local::now().date_naive();

    match action {
        GoalAction::Status => print_json(&goal.progress(today))?,
        GoalAction::Bump => print_json(&goal.increment(today)?)?,
    }
    Ok(())
}
