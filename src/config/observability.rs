//! `[logging]` section: filter level and the optional JSON log file
//!
//! Log events always land in the in-memory buffer behind the debug panel.
//! The file sink is off unless `file_enabled = true`.

use serde::Deserialize;
use std::path::PathBuf;

/// How often the log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// One file for the lifetime of the install
    Never,
}

impl LogRotation {
    const NAMES: [(&'static str, LogRotation); 3] = [
        ("hourly", LogRotation::Hourly),
        ("daily", LogRotation::Daily),
        ("never", LogRotation::Never),
    ];

    /// Case-insensitive; anything unrecognised keeps daily rotation
    pub fn parse(s: &str) -> Self {
        let wanted = s.trim().to_ascii_lowercase();
        match Self::NAMES.iter().find(|(name, _)| *name == wanted) {
            Some((_, rotation)) => *rotation,
            None => {
                eprintln!("Unknown file_rotation '{}', using daily", s);
                Self::Daily
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, rotation)| *rotation == self)
            .map_or("daily", |(name, _)| name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Filter for panedeck's own targets (trace..error); `RUST_LOG` overrides it
    pub level: String,
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// Rolled files are named `<prefix>.<date>`
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "panedeck".to_string(),
        }
    }
}

/// `[logging]` as written in the file; every key optional
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Overlay the file section on the defaults; `env_level` beats both
    pub fn from_file(file: Option<FileLogging>, env_level: Option<String>) -> Self {
        let file = file.unwrap_or_default();
        let base = Self::default();

        Self {
            level: env_level.or(file.level).unwrap_or(base.level),
            file_enabled: file.file_enabled.unwrap_or(base.file_enabled),
            file_dir: file.file_dir.map_or(base.file_dir, PathBuf::from),
            file_rotation: file
                .file_rotation
                .as_deref()
                .map_or(base.file_rotation, LogRotation::parse),
            file_prefix: file.file_prefix.unwrap_or(base.file_prefix),
        }
    }
}
