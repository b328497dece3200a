use clap::Subcommand;
use quotevault_core::{Config, RemoteLibrary};

use super::{bump_goal, format_quote, require_session, CliResult};

#[derive(Subcommand)]
pub enum FavoriteAction {
    /// List favorited quotes
    List,
    /// Favorite a quote, or unfavorite it if already favorited
    Toggle {
        quote_id: String,
    },
}

pub fn run(action: FavoriteAction) -> CliResult {
    let config = Config::load()?;
    let session = require_session()?;
    let library = RemoteLibrary::new(&config.backend.base_url, Some(session.token))?;

    match action {
        FavoriteAction::List => {
            for quote in library.favorites(&session.user_id)? {
                println!("{}", format_quote(&quote));
            }
        }
        FavoriteAction::Toggle { quote_id } => {
            let favorites = library.favorites(&session.user_id)?;
            let currently = favorites.iter().any(|q| q.id == quote_id);
            let now = library.toggle_favorite(&session.user_id, &quote_id, currently)?;
            bump_goal(&config);
            println!("{}", if now { "favorited" } else { "unfavorited" });
        }
    }
    Ok(())
}
