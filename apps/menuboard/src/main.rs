//! # menuboard
//!
//! The main binary for the venue menu board.
//!
//! This application provides:
//! - HTTP server: public menu, admin back office, hero image manager
//! - CLI interface for catalog and hero maintenance
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │               apps/menuboard (THE BINARY)            │
//! │                                                      │
//! │   ┌─────────────┐            ┌──────────────────┐    │
//! │   │    CLI      │            │   HTTP (axum)    │    │
//! │   │   (clap)    │            │   pages: maud    │    │
//! │   └──────┬──────┘            └────────┬─────────┘    │
//! │          └─────────────┬──────────────┘              │
//! │                        ▼                             │
//! │               ┌─────────────────┐                    │
//! │               │ menuboard-core  │                    │
//! │               │  (THE LOGIC)    │                    │
//! │               └─────────────────┘                    │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! menuboard --database menu.redb server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! menuboard --database menu.redb seed
//! menuboard --database menu.redb list --category food
//! menuboard hero list
//! ```

use clap::Parser;
use menuboard::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // MENUBOARD_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("MENUBOARD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "menuboard=info,menuboard_core=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  ┌┬┐┌─┐┌┐┌┬ ┬┌┐ ┌─┐┌─┐┬─┐┌┬┐
  │││├┤ ││││ │├┴┐│ │├─┤├┬┘ ││
  ┴ ┴└─┘┘└┘└─┘└─┘└─┘┴ ┴┴└──┴┘

  Menu Board v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
