use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_application::AppBootstrap;
use folio_core::session::LoginKind;
use folio_infrastructure::{ConfigService, FolioPaths};

mod commands;
mod console_notifier;
mod logging;

use console_notifier::ConsoleNotifier;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio - collect feedback and review it with AI", long_about = None)]
struct Cli {
    /// Keep config, secrets and storage under this directory
    #[arg(long, global = true, env = "FOLIO_HOME")]
    home: Option<PathBuf>,

    /// Log level for folio crates (overrides config.toml)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a session as USERNAME (no password; this is an identity claim)
    Login { username: String },
    /// Same as login, announced as a new account
    Signup { username: String },
    /// End the current session
    Logout,
    /// Print the current session's username
    Whoami,
    /// Submit feedback as the current user
    Add {
        /// Defaults to "General Feedback" when omitted
        #[arg(short, long, default_value = "")]
        title: String,
        content: String,
    },
    /// List the current user's feedback, newest first
    List,
    /// Delete a feedback item and its analysis
    Delete { id: String },
    /// Ask the AI reviewer for sentiment, summary and a suggested action
    Review { id: String },
    /// Show every stored analysis
    Analyses,
    /// Show where config, storage and secrets live
    Config {
        /// Write the current configuration to config.toml if it does not exist
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let paths = FolioPaths::new(cli.home.as_deref());
    let config_service = ConfigService::new(&paths).context("Failed to resolve config file")?;
    let config = config_service.load().context("Failed to load configuration")?;

    let logs_dir = paths.logs_dir().context("Failed to resolve logs directory")?;
    let _log_guard = logging::init(&config.logging, cli.log_level.as_deref(), &logs_dir);
    tracing::debug!("Folio v{} starting", env!("CARGO_PKG_VERSION"));

    let app = AppBootstrap::new(paths, config, Arc::new(ConsoleNotifier::default()))?;

    let store = &app.store;
    let ok = match cli.command {
        Commands::Login { username } => {
            commands::session::login(&mut *store.lock().await, &username, LoginKind::Login)
        }
        Commands::Signup { username } => {
            commands::session::login(&mut *store.lock().await, &username, LoginKind::Signup)
        }
        Commands::Logout => commands::session::logout(&mut *store.lock().await),
        Commands::Whoami => commands::session::whoami(&*store.lock().await),
        Commands::Add { title, content } => {
            commands::feedback::add(&mut *store.lock().await, &title, &content)
        }
        Commands::List => commands::feedback::list(&*store.lock().await),
        Commands::Delete { id } => commands::feedback::delete(&mut *store.lock().await, &id),
        Commands::Review { id } => commands::review::review(&app, &id).await?,
        Commands::Analyses => commands::feedback::analyses(&*store.lock().await),
        Commands::Config { init } => commands::config::show(&app, &config_service, init).await?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
