//! Panel layout configuration
//!
//! Weights and fixed sizes for the default region tree. The tree itself is
//! built in `tui::layout::builder`; this only carries the numbers.

use crate::tui::layout::RightPanelMode;
use serde::Deserialize;

/// Declarative sizes for the default layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Weight of the messages column next to the right panel
    pub messages_weight: u16,

    /// Weight of the right panel column
    pub side_weight: u16,

    /// Messages weight while the right panel is zoomed
    pub zoomed_messages_weight: u16,

    /// Right panel weight while zoomed
    pub zoomed_side_weight: u16,

    /// Rows reserved for the input panel
    pub input_height: u16,

    /// Rows reserved for the status bar
    pub status_height: u16,

    /// Columns reserved for the right-hand status segment
    pub status_right_width: u16,

    /// Columns below which a column is promoted to this width
    pub min_panel_width: u16,

    /// Rows below which the center row is promoted to this height
    pub min_panel_height: u16,

    /// Right panel shown at startup (hidden when `None`)
    pub right_panel: Option<RightPanelMode>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            messages_weight: 2,
            side_weight: 1,
            zoomed_messages_weight: 1,
            zoomed_side_weight: 4,
            input_height: 4,
            status_height: 1,
            status_right_width: 36,
            min_panel_width: 20,
            min_panel_height: 3,
            right_panel: None,
        }
    }
}

/// Layout section as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLayout {
    pub messages_weight: Option<u16>,
    pub side_weight: Option<u16>,
    pub zoomed_messages_weight: Option<u16>,
    pub zoomed_side_weight: Option<u16>,
    pub input_height: Option<u16>,
    pub status_height: Option<u16>,
    pub status_right_width: Option<u16>,
    pub min_panel_width: Option<u16>,
    pub min_panel_height: Option<u16>,
    pub right_panel: Option<RightPanelMode>,
}

impl LayoutConfig {
    /// Create from file config with defaults; `env_right_panel` wins over the file
    pub fn from_file(file: Option<FileLayout>, env_right_panel: Option<RightPanelMode>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            messages_weight: file.messages_weight.unwrap_or(defaults.messages_weight),
            side_weight: file.side_weight.unwrap_or(defaults.side_weight),
            zoomed_messages_weight: file
                .zoomed_messages_weight
                .unwrap_or(defaults.zoomed_messages_weight),
            zoomed_side_weight: file
                .zoomed_side_weight
                .unwrap_or(defaults.zoomed_side_weight),
            input_height: file.input_height.unwrap_or(defaults.input_height),
            status_height: file.status_height.unwrap_or(defaults.status_height),
            status_right_width: file
                .status_right_width
                .unwrap_or(defaults.status_right_width),
            min_panel_width: file.min_panel_width.unwrap_or(defaults.min_panel_width),
            min_panel_height: file.min_panel_height.unwrap_or(defaults.min_panel_height),
            right_panel: env_right_panel.or(file.right_panel),
        }
    }
}
