//! Crewlink CLI — the main entry point.
//!
//! Commands:
//! - `init`   — Write the default config file
//! - `send`   — Post a message to the team channel
//! - `recent` — Fetch the most recent messages
//! - `unread` — Fetch unread messages with optional filters
//! - `wait`   — Block until a matching message arrives
//! - `tools`  — List the registered tools
//! - `version` — Report the adapter version

use clap::{Parser, Subcommand};

mod commands;

use commands::{Overrides, Session};

#[derive(Parser)]
#[command(
    name = "crewlink",
    about = "Crewlink — team chat tools for coding agents",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Backend host:port (overrides config)
    #[arg(long, global = true)]
    backend_host: Option<String>,

    /// Team channel identifier (overrides config)
    #[arg(long, global = true)]
    team: Option<String>,

    /// Identity to act as (overrides config)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default config file
    Init,

    /// Post a message to the team channel
    Send {
        /// The message text
        message: String,

        /// Ensure this user is @-mentioned
        #[arg(short, long)]
        reply_to: Option<String>,
    },

    /// Fetch the most recent messages
    Recent {
        /// Maximum number of messages
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Fetch unread messages with optional filters
    Unread {
        /// Only messages after this message id
        #[arg(long)]
        since_id: Option<i64>,

        /// Only messages from this user
        #[arg(long)]
        sender: Option<String>,

        /// Maximum number of messages
        #[arg(short, long)]
        limit: Option<u32>,

        /// Only messages that @-mention you
        #[arg(long)]
        mention_only: bool,

        /// Only direct messages
        #[arg(long)]
        dm_only: bool,

        /// Only messages whose text matches this regex
        #[arg(long)]
        content_regex: Option<String>,

        /// Structured filter as a JSON object
        #[arg(long)]
        filters: Option<String>,
    },

    /// Block until a matching message arrives (or time out)
    Wait {
        /// Structured filter as a JSON object
        #[arg(long)]
        filters: Option<String>,

        /// Seconds to wait before giving up
        #[arg(short, long)]
        timeout: Option<u64>,
    },

    /// List the registered tools
    Tools {
        /// Print full definitions with JSON schemas
        #[arg(long)]
        schemas: bool,
    },

    /// Report the adapter version
    Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let overrides = Overrides {
        backend_host: cli.backend_host,
        team: cli.team,
        user: cli.user,
    };

    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Send { message, reply_to } => {
            commands::send::run(Session::open(overrides)?, message, reply_to).await?
        }
        Commands::Recent { limit } => commands::recent::run(Session::open(overrides)?, limit).await?,
        Commands::Unread {
            since_id,
            sender,
            limit,
            mention_only,
            dm_only,
            content_regex,
            filters,
        } => {
            commands::unread::run(
                Session::open(overrides)?,
                commands::unread::UnreadArgs {
                    since_id,
                    sender,
                    limit,
                    mention_only,
                    dm_only,
                    content_regex,
                    filters,
                },
            )
            .await?
        }
        Commands::Wait { filters, timeout } => {
            commands::wait::run(Session::open(overrides)?, filters, timeout).await?
        }
        Commands::Tools { schemas } => {
            commands::tools::run(Session::open(overrides)?, schemas).await?
        }
        Commands::Version => commands::version::run(Session::open(overrides)?).await?,
    }

    Ok(())
}
