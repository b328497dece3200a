use std::path::PathBuf;

use clap::Subcommand;
use quotevault_core::{featured_quote, share, share_card, Config, ShareStyle};

use super::{bump_goal, format_quote, open_catalog, print_json, CliResult};

#[derive(Subcommand)]
pub enum QuoteAction {
    /// Today's featured quote
    Today,
    /// One page of the catalog, newest first
    List {
        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: usize,
        /// Filter by category id
        #[arg(long)]
        category: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search content and author
    Search {
        term: String,
    },
    /// Show a quote by id
    Show {
        id: String,
    },
    /// A random quote
    Random,
    /// Most recently added quotes
    Recent {
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// List categories
    Categories,
    /// Export a quote as a shareable card file
    Export {
        id: String,
        /// Output file (defaults to quote_{id}.txt)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Card style
        #[arg(long, default_value = "minimal", value_parser = ["minimal", "vibrant", "classic"])]
        style: String,
    },
}

pub fn run(action: QuoteAction) -> CliResult {
    let config = Config::load()?;
    let catalog = open_catalog(&config)?;

    match action {
        QuoteAction::Today => {
            let today = chrono::Local::now().date_naive();
            let quote = featured_quote(catalog.as_ref(), today)?;
            print_json(&quote)?;
        }
        QuoteAction::List {
            page,
            category,
            json,
        } => {
            let page = page.max(1) - 1;
            let quotes = catalog.page(page, config.backend.page_size as usize, category.as_deref())?;
            if json {
                print_json(&quotes)?;
            } else {
                for quote in &quotes {
                    println!("{}", format_quote(quote));
                }
            }
        }
        QuoteAction::Search { term } => {
            let quotes = catalog.search(&term)?;
            for quote in &quotes {
                println!("{}", format_quote(quote));
            }
        }
        QuoteAction::Show { id } => {
            let quote = catalog.by_id(&id)?;
            print_json(&quote)?;
        }
        QuoteAction::Random => {
            let quote = catalog.random()?;
            print_json(&quote)?;
        }
        QuoteAction::Recent { limit } => {
            let quotes = catalog.recent(limit)?;
            for quote in &quotes {
                println!("{}", format_quote(quote));
            }
        }
        QuoteAction::Categories => {
            let categories = catalog.categories()?;
            print_json(&categories)?;
        }
        QuoteAction::Export { id, out, style } => {
            let style = match style.as_str() {
                "vibrant" => ShareStyle::Vibrant,
                "classic" => ShareStyle::Classic,
                _ => ShareStyle::Minimal,
            };
            let quote = catalog.by_id(&id)?;
            let card = share_card(&quote, style);
            let path = out.unwrap_or_else(|| PathBuf::from(share::default_file_name(&quote)));
            std::fs::write(&path, &card)?;
            bump_goal(&config);
            println!("{}", path.display());
        }
    }
    Ok(())
}
