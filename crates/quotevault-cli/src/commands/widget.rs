use clap::Subcommand;
use quotevault_core::widget::deep_link_uri;
use quotevault_core::{featured_quote, Config, WidgetDataBridge, WidgetSnapshot};

use super::{open_catalog, print_json, CliResult};

#[derive(Subcommand)]
pub enum WidgetAction {
    /// Write the widget data file
    Publish {
        /// Quote id to publish (defaults to today's featured quote)
        #[arg(long)]
        id: Option<String>,
    },
    /// Render the widget data file the way the widget does
    Show,
    /// Remove the widget data file
    Clear,
}

pub fn run(action: WidgetAction) -> CliResult {
    let config = Config::load()?;
    let bridge = WidgetDataBridge::open_default()?;

    match action {
        WidgetAction::Publish { id } => {
            let catalog = open_catalog(&config)?;
            let quote = match id {
                Some(id) => catalog.by_id(&id)?,
                None => featured_quote(catalog.as_ref(), chrono::Local::now().date_naive())?,
            };
            let record = bridge.publish(&quote)?;
            print_json(&record)?;
        }
        WidgetAction::Show => {
            let snapshot = WidgetSnapshot::load(bridge.path());
            if snapshot.is_placeholder() {
                println!("Open the app to see today's quote");
                return Ok(());
            }
            if let Some(text) = snapshot.display_text() {
                println!("{text}");
            }
            if let Some(author) = snapshot.display_author() {
                println!("{author}");
            }
            if let Some(id) = &snapshot.quote_id {
                let uri = deep_link_uri(&config.widget.deep_link_scheme, id)?;
                println!("{uri}");
            }
        }
        WidgetAction::Clear => {
            bridge.clear()?;
            println!("widget data cleared");
        }
    }
    Ok(())
}
