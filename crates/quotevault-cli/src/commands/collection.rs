use clap::Subcommand;
use quotevault_core::{Config, RemoteLibrary};

use super::{bump_goal, print_json, require_session, CliResult};

#[derive(Subcommand)]
pub enum CollectionAction {
    /// List your collections
    List,
    /// Create a named collection
    Create {
        name: String,
    },
    /// Add a quote to a collection
    Add {
        collection_id: String,
        quote_id: String,
    },
    /// Remove a quote from a collection
    Remove {
        collection_id: String,
        quote_id: String,
    },
}

pub fn run(action: CollectionAction) -> CliResult {
    let config = Config::load()?;
    let session = require_session()?;
    let library = RemoteLibrary::new(&config.backend.base_url, Some(session.token))?;

    match action {
        CollectionAction::List => {
            print_json(&library.collections(&session.user_id)?)?;
        }
        CollectionAction::Create { name } => {
            print_json(&library.create_collection(&session.user_id, &name)?)?;
        }
        CollectionAction::Add {
            collection_id,
            quote_id,
        } => {
            library.add_to_collection(&collection_id, &quote_id)?;
            bump_goal(&config);
            println!("ok");
        }
        CollectionAction::Remove {
            collection_id,
            quote_id,
        } => {
            library.remove_from_collection(&collection_id, &quote_id)?;
            println!("ok");
        }
    }
    Ok(())
}
