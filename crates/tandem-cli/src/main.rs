use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tandem")]
#[command(about = "Tandem - schedule language exchange sessions and message partners", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/tandem/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for saved state (implies --persist)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Load state from and save state to the data directory
    #[arg(long, global = true)]
    persist: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upcoming and past practice sessions
    Sessions {
        #[command(subcommand)]
        action: SessionsAction,
    },
    /// Available language partners
    Partners {
        #[command(subcommand)]
        action: PartnersAction,
    },
    /// Conversations with partners
    Messages {
        #[command(subcommand)]
        action: MessagesAction,
    },
}

#[derive(Subcommand)]
enum SessionsAction {
    /// List upcoming and past sessions
    List,
    /// Show one session
    Show { id: String },
    /// Schedule a new session with a partner
    Schedule {
        /// Partner id (see `tandem partners list`)
        #[arg(long)]
        partner: String,
        /// Start time, RFC 3339 (e.g. 2030-06-01T18:00:00Z)
        #[arg(long, value_parser = parse_datetime)]
        at: DateTime<Utc>,
        /// Length in minutes
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand)]
enum PartnersAction {
    /// List partners, optionally filtered by name or language
    List {
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Subcommand)]
enum MessagesAction {
    /// List conversations, optionally filtered by participant name
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Open a conversation (marks it read)
    Show { id: String },
    /// Send a message to a conversation
    Send { id: String, text: String },
    /// Mark a conversation as read without opening it
    Read { id: String },
}

fn parse_datetime(value: &str) -> std::result::Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = commands::utils::load_config(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = Some(data_dir);
        config.storage.enabled = true;
    }
    if cli.persist {
        config.storage.enabled = true;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut app = commands::utils::open_app(&config).await?;

    match cli.command {
        Commands::Sessions { action } => match action {
            SessionsAction::List => commands::sessions::list(&app),
            SessionsAction::Show { id } => commands::sessions::show(&app, &id)?,
            SessionsAction::Schedule {
                partner,
                at,
                duration,
                topic,
                notes,
            } => {
                let request = tandem_application::ScheduleRequest {
                    partner_id: partner,
                    scheduled_at: Some(at),
                    duration_minutes: duration,
                    topic,
                    notes,
                };
                commands::sessions::schedule(&mut app, request).await?
            }
        },
        Commands::Partners { action } => match action {
            PartnersAction::List { search } => {
                commands::partners::list(&app, search.as_deref().unwrap_or(""))
            }
        },
        Commands::Messages { action } => match action {
            MessagesAction::List { search } => {
                commands::messages::list(&app, search.as_deref().unwrap_or(""))
            }
            MessagesAction::Show { id } => commands::messages::show(&mut app, &id).await?,
            MessagesAction::Send { id, text } => {
                commands::messages::send(&mut app, &id, &text).await?
            }
            MessagesAction::Read { id } => commands::messages::read(&mut app, &id).await?,
        },
    }

    Ok(())
}
