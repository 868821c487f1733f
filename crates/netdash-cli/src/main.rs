//! netdash CLI - serve, render and prepare interactive network dashboards.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use netdash_views::DashboardConfig;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::config as config_cmd;
use commands::prepare::PrepareOptions;
use commands::render::RenderTarget;

/// netdash - interactive network dashboards.
///
/// Run `netdash serve` to start the dashboard on the configured port.
#[derive(Parser, Debug)]
#[command(
    name = "netdash",
    author,
    version,
    about = "netdash: interactive network dashboards",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Override the dataset directory.
    #[arg(long, global = true, env = "NETDASH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the dashboard and its API (default command).
    Serve {
        /// Port to listen on (defaults to the configured port).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print one figure as JSON.
    #[command(subcommand)]
    Render(RenderTarget),

    /// Lay out a raw graph and write a snapshot.
    Prepare {
        /// Raw graph JSON; coordinates are optional.
        input: PathBuf,

        /// Snapshot to write.
        #[arg(short, long)]
        output: PathBuf,

        /// Seed for the layout's initial positions.
        #[arg(long)]
        seed: Option<u64>,

        /// Layout iterations.
        #[arg(long, default_value_t = 500)]
        iterations: usize,

        /// Scale attraction by edge weight.
        #[arg(long)]
        weighted: bool,

        /// Run Louvain community detection and store the labels.
        #[arg(long)]
        communities: bool,
    },

    /// Manage configuration.
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value (empty clears an optional setting).
        value: String,
    },

    /// Get a configuration value.
    Get {
        /// Configuration key.
        key: String,
    },

    /// Reset configuration to defaults.
    Reset,

    /// Show path to config file.
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flags
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = DashboardConfig::load().context("failed to load configuration")?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let command = cli.command.unwrap_or(Commands::Serve { port: None });

    match command {
        Commands::Serve { port } => {
            commands::serve::execute(&config, port.unwrap_or(config.port)).await?;
        }

        Commands::Render(target) => {
            let figure = commands::render::execute(&config, target)?;
            println!("{}", serde_json::to_string_pretty(&figure)?);
        }

        Commands::Prepare {
            input,
            output,
            seed,
            iterations,
            weighted,
            communities,
        } => {
            let options = PrepareOptions {
                seed,
                iterations,
                weighted,
                communities,
            };
            commands::prepare::execute(&input, &output, &options)?;
        }

        Commands::Config(config_cmd_inner) => match config_cmd_inner {
            ConfigCommands::Show => config_cmd::show(&config)?,
            ConfigCommands::Set { key, value } => config_cmd::set(&mut config, &key, &value)?,
            ConfigCommands::Get { key } => config_cmd::get(&config, &key)?,
            ConfigCommands::Reset => config_cmd::reset()?,
            ConfigCommands::Path => {
                if let Some(path) = DashboardConfig::config_file_path() {
                    println!("{}", path.display());
                } else {
                    println!("(no config file path available)");
                }
            }
        },
    }

    Ok(())
}
