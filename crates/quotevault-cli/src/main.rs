use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quotevault-cli", version, about = "QuoteVault CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the quote catalog
    Quote {
        #[command(subcommand)]
        action: commands::quote::QuoteAction,
    },
    /// Daily featured quote, scratch reveal, and refresh
    Daily {
        #[command(subcommand)]
        action: commands::daily::DailyAction,
    },
    /// Home-screen widget data file
    Widget {
        #[command(subcommand)]
        action: commands::widget::WidgetAction,
    },
    /// Daily quote notification
    Notify {
        #[command(subcommand)]
        action: commands::notify::NotifyAction,
    },
    /// Daily reading goal
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Favorite quotes
    Favorite {
        #[command(subcommand)]
        action: commands::favorite::FavoriteAction,
    },
    /// Quote collections
    Collection {
        #[command(subcommand)]
        action: commands::collection::CollectionAction,
    },
    /// Backend session management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Quote { action } => commands::quote::run(action),
        Commands::Daily { action } => commands::daily::run(action),
        Commands::Widget { action } => commands::widget::run(action),
        Commands::Notify { action } => commands::notify::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Favorite { action } => commands::favorite::run(action),
        Commands::Collection { action } => commands::collection::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
