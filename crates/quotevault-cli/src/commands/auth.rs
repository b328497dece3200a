use clap::Subcommand;
use quotevault_core::auth;
use quotevault_core::Config;

use super::CliResult;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Exchange credentials for a session token
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the stored session
    Logout,
    /// Show the logged-in user, if any
    Status,
}

pub fn run(action: AuthAction) -> CliResult {
    match action {
        AuthAction::Login { email, password } => {
            let config = Config::load()?;
            let session = auth::login(&config.backend.base_url, &email, &password)?;
            println!("logged in as {}", session.user_id);
        }
        AuthAction::Logout => {
            auth::logout()?;
            println!("logged out");
        }
        AuthAction::Status => match auth::current_session()? {
            Some(session) => println!("logged in as {}", session.user_id),
            None => println!("not logged in"),
        },
    }
    Ok(())
}
