mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::WindowArgs;
use quermesse_core::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quermesse")]
#[command(about = "Find quermesses and festivals on the map, filter by date, and get directions")]
struct Cli {
    /// Config file (defaults to ~/.config/quermesse/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List upcoming events, soonest first
    Events {
        #[command(flatten)]
        window: WindowArgs,

        /// Only show this day (YYYY-MM-DD, or "all")
        #[arg(short, long, default_value = "all")]
        date: String,

        /// Only show events whose name contains this text (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,

        /// Your location as LAT,LON, used as the directions starting point
        #[arg(long, allow_hyphen_values = true)]
        origin: Option<String>,

        /// Print map markers as JSON instead of a list
        #[arg(long)]
        json: bool,

        /// Also list events that could not be placed on the map
        #[arg(long)]
        hidden: bool,
    },
    /// List the dates that have events
    Dates {
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Show one event on the map and how to get there
    Show {
        /// Event id (as printed by `quermesse events`)
        id: String,

        #[command(flatten)]
        window: WindowArgs,

        /// Your location as LAT,LON, used as the directions starting point
        #[arg(long, allow_hyphen_values = true)]
        origin: Option<String>,

        /// Open the directions in the browser
        #[arg(long)]
        open: bool,
    },
    /// Print the resolved configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    init_logging(cli.verbose);

    // Missing API key aborts here, before any request
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Events {
            window,
            date,
            search,
            origin,
            json,
            hidden,
        } => {
            let opts = commands::events::EventsOptions {
                date,
                search,
                origin,
                json,
                hidden,
            };
            commands::events::run(&config, &window, opts).await
        }
        Commands::Dates { window } => commands::dates::run(&config, &window).await,
        Commands::Show {
            id,
            window,
            origin,
            open,
        } => commands::show::run(&config, &window, &id, origin.as_deref(), open).await,
        Commands::Config => commands::config::run(&config, cli.config.as_deref()),
    }
}

/// Logs go to stderr so `--json` output stays clean. RUST_LOG overrides the level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
