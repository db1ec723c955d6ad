//! # Configuration
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. built-in defaults (`127.0.0.1:8080`, public dir `public`)
//! 2. an optional TOML file (`--config` / `MENUBOARD_CONFIG`)
//! 3. CLI flags and their environment variables
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [storage]
//! database = "menu.redb"
//! public_dir = "public"
//! ```
//!
//! The database path has no default: every command that touches the
//! catalog fails with [`MenuError::Config`] when it is missing.

use menuboard_core::MenuError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default bind host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default directory for static files and hero uploads.
pub const DEFAULT_PUBLIC_DIR: &str = "public";

// =============================================================================
// FILE FORMAT
// =============================================================================

/// Contents of the TOML configuration file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server: ServerSection,
    pub storage: StorageSection,
}

/// `[server]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// `[storage]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSection {
    pub database: Option<PathBuf>,
    pub public_dir: Option<PathBuf>,
}

impl FileConfig {
    /// Parse a configuration document.
    pub fn parse(content: &str) -> Result<Self, MenuError> {
        toml::from_str(content).map_err(|e| MenuError::Config(format!("invalid config: {}", e)))
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, MenuError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MenuError::Config(format!("cannot read config '{}': {}", path.display(), e))
        })?;
        Self::parse(&content)
    }
}

// =============================================================================
// RESOLVED SETTINGS
// =============================================================================

/// Values given on the command line (or through their env vars).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database: Option<PathBuf>,
    pub public_dir: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database: Option<PathBuf>,
    pub public_dir: PathBuf,
}

impl Settings {
    /// Merge defaults, the optional file and the overrides.
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Self {
        Self {
            host: overrides
                .host
                .or(file.server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.server.port).unwrap_or(DEFAULT_PORT),
            database: overrides.database.or(file.storage.database),
            public_dir: overrides
                .public_dir
                .or(file.storage.public_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR)),
        }
    }

    /// Load the file at `config` (if any) and merge.
    pub fn load(config: Option<&Path>, overrides: Overrides) -> Result<Self, MenuError> {
        let file = match config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(file, overrides))
    }

    /// The database path, which is mandatory for catalog access.
    pub fn database(&self) -> Result<&Path, MenuError> {
        self.database.as_deref().ok_or_else(|| {
            MenuError::Config(
                "no database path configured (use --database or MENUBOARD_DATABASE)".to_string(),
            )
        })
    }

    /// `host:port` for the listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// TESTS
// =============================================================================
