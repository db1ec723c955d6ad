//! # menuboard CLI Module
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `status` - Show item counts
//! - `list` - List items (public order, or every item with `--all`)
//! - `seed` - Load the starter menu
//! - `init` - Create the database and the hero image directory
//! - `hero list` / `hero reorder` - Inspect or rewrite the hero order

mod commands;

use crate::config::{Overrides, Settings};
use clap::{Parser, Subcommand};
use menuboard_core::MenuError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// menuboard - venue menu board
///
/// Public menu, admin back office and hero image manager.
#[derive(Parser, Debug)]
#[command(name = "menuboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// TOML configuration file
    #[arg(short = 'c', long, global = true, env = "MENUBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the menu database
    #[arg(short = 'D', long, global = true, env = "MENUBOARD_DATABASE")]
    pub database: Option<PathBuf>,

    /// Directory holding static files and hero uploads
    #[arg(short = 'P', long, global = true, env = "MENUBOARD_PUBLIC_DIR")]
    pub public_dir: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show item counts
    Status,

    /// List menu items
    List {
        /// Category (drink, food)
        #[arg(long, default_value = "drink")]
        category: String,

        /// Sub-category filter ("all" for none)
        #[arg(short, long)]
        sub: Option<String>,

        /// Every item in creation order, hidden ones included
        #[arg(short, long)]
        all: bool,
    },

    /// Replace the catalog with the starter menu
    Seed {
        /// Seed even if the catalog already has items
        #[arg(short, long)]
        force: bool,
    },

    /// Create the database and the hero image directory
    Init,

    /// Hero image maintenance
    Hero {
        #[command(subcommand)]
        action: HeroCommand,
    },
}

/// Hero image subcommands.
#[derive(Subcommand, Debug)]
pub enum HeroCommand {
    /// Show images in display order
    List,

    /// Save a new display order
    Reorder {
        /// Public paths, e.g. /uploads/hero/a.jpg
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), MenuError> {
    let (host, port) = match &cli.command {
        Some(Commands::Server { host, port }) => (host.clone(), *port),
        _ => (None, None),
    };
    let settings = Settings::load(
        cli.config.as_deref(),
        Overrides {
            database: cli.database,
            public_dir: cli.public_dir,
            host,
            port,
        },
    )?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { .. }) => cmd_server(&settings).await,
        Some(Commands::Status) | None => cmd_status(&settings, json_mode),
        Some(Commands::List { category, sub, all }) => {
            cmd_list(&settings, json_mode, &category, sub.as_deref(), all)
        }
        Some(Commands::Seed { force }) => cmd_seed(&settings, json_mode, force),
        Some(Commands::Init) => cmd_init(&settings),
        Some(Commands::Hero { action }) => match action {
            HeroCommand::List => cmd_hero_list(&settings, json_mode),
            HeroCommand::Reorder { paths } => cmd_hero_reorder(&settings, json_mode, &paths),
        },
    }
}
