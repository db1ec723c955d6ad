//! # menuboard
//!
//! HTTP server, CLI and configuration for the menu board. All item and
//! hero-image logic lives in `menuboard-core`.

pub mod api;
pub mod cli;
pub mod config;
