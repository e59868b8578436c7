//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        let layout = &self.layout;
        format!(
            r#"# panedeck configuration

# ─────────────────────────────────────────────────────────────────────────────
# LAYOUT
# ─────────────────────────────────────────────────────────────────────────────
# Weights share the width left between messages and the right-hand column.
# Heights and widths are in terminal cells.

[layout]
messages_weight = {messages_weight}
side_weight = {side_weight}
# Weights used while the right-hand column is zoomed (Ctrl+Z)
zoomed_messages_weight = {zoomed_messages_weight}
zoomed_side_weight = {zoomed_side_weight}
input_height = {input_height}
status_height = {status_height}
status_right_width = {status_right_width}
# Columns narrower than this are widened before weights are shared
min_panel_width = {min_panel_width}
min_panel_height = {min_panel_height}
{right_panel}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to the debug panel)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            messages_weight = layout.messages_weight,
            side_weight = layout.side_weight,
            zoomed_messages_weight = layout.zoomed_messages_weight,
            zoomed_side_weight = layout.zoomed_side_weight,
            input_height = layout.input_height,
            status_height = layout.status_height,
            status_right_width = layout.status_right_width,
            min_panel_width = layout.min_panel_width,
            min_panel_height = layout.min_panel_height,
            right_panel = match layout.right_panel {
                Some(mode) => format!("right_panel = \"{}\"\n", mode),
                None => "# right_panel = \"debug\"  # debug, text-viewer (hidden when unset)\n"
                    .to_string(),
            },
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        let Some(path) = Self::config_path() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, self.to_toml())
    }
}
