mod app;
mod commands;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::App;

#[derive(Parser)]
#[command(name = "studibot")]
#[command(about = "Your study calendar: local and Google events, with date reminders")]
struct Cli {
    /// Show debug logs (overrides STUDIBOT_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with Google
    Login,
    /// Sign out; local events stay
    Logout,
    /// Show the signed-in account
    Whoami,
    /// List events of a month
    List {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Add an event
    Add {
        /// Date (YYYY-MM-DD, DD.MM.YYYY, "today"/"heute" or "tomorrow"/"morgen")
        date: String,

        /// Event title
        text: String,
    },
    /// Remove an event by id
    Remove {
        id: String,

        /// Month the event is in (YYYY-MM), needed for Google events outside the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Change an event's title
    Update {
        id: String,

        /// New title
        text: String,

        /// Month the event is in (YYYY-MM), needed for Google events outside the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Send due reminders now
    Remind {
        /// Print reminders instead of showing desktop notifications
        #[arg(long)]
        no_desktop: bool,
    },
    /// Keep running and send reminders periodically
    Watch {
        /// Print reminders instead of showing desktop notifications
        #[arg(long)]
        no_desktop: bool,
    },
    /// Show or change reminder lead times
    Settings {
        /// Days before a task to remind
        #[arg(long)]
        task_days: Option<u32>,

        /// Days before an exam to remind
        #[arg(long)]
        exam_days: Option<u32>,
    },
    /// Show config and data paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Config = cli.command {
        return commands::config::run();
    }

    let app = App::load()?;

    match cli.command {
        Commands::Login => commands::login::run(&app).await,
        Commands::Logout => commands::logout::run(&app).await,
        Commands::Whoami => commands::whoami::run(&app).await,
        Commands::List { month } => commands::list::run(&app, month.as_deref()).await,
        Commands::Add { date, text } => commands::add::run(&app, &date, &text).await,
        Commands::Remove { id, month } => {
            commands::remove::run(&app, &id, month.as_deref()).await
        }
        Commands::Update { id, text, month } => {
            commands::update::run(&app, &id, &text, month.as_deref()).await
        }
        Commands::Remind { no_desktop } => commands::remind::run(&app, no_desktop).await,
        Commands::Watch { no_desktop } => commands::watch::run(&app, no_desktop).await,
        Commands::Settings {
            task_days,
            exam_days,
        } => commands::settings::run(&app, task_days, exam_days),
        Commands::Config => commands::config::run(),
    }
}

/// Logs go to stderr so they never mix with command output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("studibot=debug,studibot_core=debug")
    } else {
        EnvFilter::try_from_env("STUDIBOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
