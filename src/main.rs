use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use termprof::domain::TerminalKind;

mod cli;

#[derive(Parser)]
#[command(name = "termprof")]
#[command(about = "Launch native terminals preconfigured with a directory and environment")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all stored profiles
    List,

    /// Launch the terminal configured by a profile (by name or id)
    Launch {
        /// Profile name or id
        profile: String,
    },

    /// Show terminal kinds on this platform and their availability
    Terminals,

    /// Create a new profile
    Add {
        /// Profile name
        name: String,

        /// Working directory to start in (default: inherit)
        #[arg(short, long)]
        dir: Option<String>,

        /// Terminal kind (auto, wt, powershell, cmd, gnome-terminal,
        /// konsole, xterm, terminal.app, iterm2)
        #[arg(short, long)]
        terminal: Option<TerminalKind>,

        /// Environment override, NAME=VALUE (repeatable)
        #[arg(short, long = "env")]
        env: Vec<String>,

        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a profile (by name or id)
    Remove {
        /// Profile name or id
        profile: String,
    },

    /// Duplicate a profile (by name or id)
    Duplicate {
        /// Profile name or id
        profile: String,
    },

    /// Export the profile store to a file
    Export {
        /// Destination path
        path: PathBuf,
    },

    /// Import a previously exported profile store
    Import {
        /// Source path
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Some(Commands::List) | None => {
            cli::list::list_command().await?;
        }
        Some(Commands::Launch { profile }) => {
            cli::launch::launch_command(&profile).await?;
        }
        Some(Commands::Terminals) => {
            cli::terminals::terminals_command().await?;
        }
        Some(Commands::Add {
            name,
            dir,
            terminal,
            env,
            description,
        }) => {
            cli::profile::add_command(&name, dir, terminal, &env, description).await?;
        }
        Some(Commands::Remove { profile }) => {
            cli::profile::remove_command(&profile).await?;
        }
        Some(Commands::Duplicate { profile }) => {
            cli::profile::duplicate_command(&profile).await?;
        }
        Some(Commands::Export { path }) => {
            cli::transfer::export_command(&path).await?;
        }
        Some(Commands::Import { path }) => {
            cli::transfer::import_command(&path).await?;
        }
    }

    Ok(())
}
