//! Configuration for the panel shell
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/panedeck/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::tui::layout::RightPanelMode;
use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod layout;
mod observability;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use layout::{FileLayout, LayoutConfig};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides `[logging] level`
pub const ENV_LOG_LEVEL: &str = "PANEDECK_LOG_LEVEL";

/// Overrides `[layout] right_panel` (debug, text-viewer)
pub const ENV_RIGHT_PANEL: &str = "PANEDECK_RIGHT_PANEL";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Panel sizes and the startup right panel
    pub layout: LayoutConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    /// Optional [layout] section
    pub layout: Option<FileLayout>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// ~/.config/panedeck/config.toml on every platform
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("panedeck").join("config.toml"))
    }

    /// Write the commented default template when no file exists yet
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Parse a config file body
    pub(crate) fn parse_file(contents: &str) -> Result<FileConfig, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Read and parse the config file, or defaults when there is none.
    ///
    /// A file that exists but cannot be read or parsed terminates the
    /// process; a broken config is never replaced by defaults silently.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return FileConfig::default(),
            Err(e) => config_failure("cannot read the config file", &path, &e, &[]),
        };

        Self::parse_file(&contents).unwrap_or_else(|e| {
            config_failure(
                "the config file does not parse",
                &path,
                &e,
                &[
                    "string values need quotes",
                    "right_panel is \"debug\" or \"text-viewer\"",
                    "sizes are non-negative integers",
                ],
            )
        })
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        Self::merge(
            file,
            std::env::var(ENV_LOG_LEVEL).ok(),
            std::env::var(ENV_RIGHT_PANEL).ok(),
        )
    }

    /// Combine a parsed file with raw environment overrides
    pub(crate) fn merge(
        file: FileConfig,
        env_level: Option<String>,
        env_right_panel: Option<String>,
    ) -> Self {
        // An unusable env value is ignored rather than fatal; the file still applies
        let right_panel = env_right_panel.and_then(|raw| match raw.parse::<RightPanelMode>() {
            Ok(mode) => Some(mode),
            Err(e) => {
                eprintln!("Ignoring {}: {}", ENV_RIGHT_PANEL, e);
                None
            }
        });

        Self {
            layout: LayoutConfig::from_file(file.layout, right_panel),
            logging: LoggingConfig::from_file(file.logging, env_level),
        }
    }
}

/// Report a config problem on stderr and exit
fn config_failure(
    what: &str,
    path: &std::path::Path,
    err: &dyn std::fmt::Display,
    hints: &[&str],
) -> ! {
    let rule = "=".repeat(64);
    eprintln!("\n{rule}\n panedeck: {what}\n{rule}\n");
    eprintln!("  file:  {}", path.display());
    eprintln!("  error: {}\n", err);
    for hint in hints {
        eprintln!("  - {}", hint);
    }
    eprintln!("\n  `panedeck config --reset` restores the defaults.\n");
    std::process::exit(1);
}
