// Layout manager - panel registry and per-refresh geometry
//
// Every display tick the shell calls `refresh(width, height)`:
// 1. the region tree is pruned by panel visibility and partitioned
// 2. each placed panel gets its rectangle, its surface, and a render pass
//
// Geometry is never cached, so a refresh is a pure function of terminal
// size, region tree and visibility flags. A visible panel squeezed to no
// area is collapsed until a later refresh gives it room again. Surfaces and bindings live in
// the panels and follow their create-once rules.

mod breakpoint;
mod builder;
mod panel;
mod regions;

pub use breakpoint::Breakpoint;
pub use builder::default_tree;
pub use panel::Panel;
pub use regions::{arrange, LayoutDirection, Region, SizeConstraint};

use crate::config::LayoutConfig;
use crate::tui::screen::{Screen, ScreenError};
use crate::tui::traits::ComponentRef;
use ratatui::layout::Rect;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const PANEL_MESSAGES: &str = "messages";
pub const PANEL_INPUT: &str = "input";
pub const PANEL_STATUS: &str = "status";
pub const PANEL_DEBUG: &str = "debug";
pub const PANEL_TEXT_VIEWER: &str = "text-viewer";
pub const STATUS_LEFT: &str = "status-left";
pub const STATUS_CENTER: &str = "status-center";
pub const STATUS_RIGHT: &str = "status-right";

/// Which component the right-hand column shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RightPanelMode {
    #[default]
    Debug,
    TextViewer,
}

impl RightPanelMode {
    pub const ALL: [RightPanelMode; 2] = [RightPanelMode::Debug, RightPanelMode::TextViewer];

    pub fn panel_name(self) -> &'static str {
        match self {
            Self::Debug => PANEL_DEBUG,
            Self::TextViewer => PANEL_TEXT_VIEWER,
        }
    }

    /// The other mode
    pub fn next(self) -> Self {
        match self {
            Self::Debug => Self::TextViewer,
            Self::TextViewer => Self::Debug,
        }
    }
}

impl fmt::Display for RightPanelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.panel_name())
    }
}

impl FromStr for RightPanelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "text-viewer" | "text_viewer" | "help" => Ok(Self::TextViewer),
            other => Err(format!("unknown right panel mode '{}'", other)),
        }
    }
}

/// Errors that abort a refresh cycle or a panel operation
#[derive(Debug)]
pub enum LayoutError {
    /// Terminal reported a zero width or height
    DegenerateTerminal { width: u16, height: u16 },
    /// Region tree or caller named a panel that was never registered
    UnknownPanel(String),
    /// Sub-panel name already belongs to a different panel
    NameTaken { name: String, parent: String },
    /// Screen rejected a surface or binding operation
    Surface(ScreenError),
    /// A component failed to render into its surface
    Render { view: String, source: anyhow::Error },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateTerminal { width, height } => {
                write!(f, "Terminal too small to lay out ({}x{})", width, height)
            }
            Self::UnknownPanel(name) => write!(f, "No panel registered as '{}'", name),
            Self::NameTaken { name, parent } => {
                write!(f, "Cannot add '{}' under '{}': name already in use", name, parent)
            }
            Self::Surface(err) => write!(f, "Surface error: {}", err),
            Self::Render { view, source } => write!(f, "Render of '{}' failed: {}", view, source),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(err) => Some(err),
            Self::Render { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<ScreenError> for LayoutError {
    fn from(err: ScreenError) -> Self {
        Self::Surface(err)
    }
}

/// Registry of named panels plus the state of the right-hand column
pub struct LayoutManager {
    config: LayoutConfig,
    /// Replaces the default tree when set
    custom_layout: Option<Region>,
    panels: HashMap<String, Panel>,
    /// Sub-panel name -> owning top-level panel
    parents: HashMap<String, String>,
    last_size: (u16, u16),

    right_panel_visible: bool,
    right_panel_mode: RightPanelMode,
    zoomed: bool,
}

impl LayoutManager {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            right_panel_visible: config.right_panel.is_some(),
            right_panel_mode: config.right_panel.unwrap_or_default(),
            config,
            custom_layout: None,
            panels: HashMap::new(),
            parents: HashMap::new(),
            last_size: (0, 0),
            zoomed: false,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Install a custom region tree instead of the default shell layout
    pub fn set_layout(&mut self, root: Region) {
        self.custom_layout = Some(root);
    }

    /// Region tree the next refresh will partition
    pub fn layout_tree(&self) -> Region {
        match &self.custom_layout {
            Some(root) => root.clone(),
            None => default_tree(&self.config, self.zoomed),
        }
    }

    /// Register `component` under `name`, or swap it into the existing panel
    pub fn set_component(&mut self, screen: &mut Screen, name: &str, component: ComponentRef) -> Result<(), LayoutError> {
        if let Some(panel) = self.panel_mut(name) {
            panel.swap_component(screen, component)?;
            return Ok(());
        }

        let mut panel = Panel::new(name, component);
        if let Some(visible) = self.right_panel_state(name) {
            panel.set_visible(screen, visible);
        }
        self.panels.insert(name.to_string(), panel);
        tracing::debug!(panel = name, "panel registered");
        Ok(())
    }

    /// Register a sub-panel of a composite panel.
    ///
    /// Re-adding a child of the same parent swaps its component; a name
    /// already used by another panel is rejected.
    pub fn add_sub_panel(&mut self, screen: &mut Screen, parent: &str, name: &str, component: ComponentRef) -> Result<(), LayoutError> {
        if self.panel(name).is_some() {
            if self.parents.get(name).map(String::as_str) != Some(parent) {
                return Err(LayoutError::NameTaken {
                    name: name.to_string(),
                    parent: parent.to_string(),
                });
            }
            if let Some(existing) = self.panel_mut(name) {
                existing.swap_component(screen, component)?;
            }
            return Ok(());
        }

        let panel = self
            .panels
            .get_mut(parent)
            .ok_or_else(|| LayoutError::UnknownPanel(parent.to_string()))?;
        panel.add_sub_panel(name, component);
        self.parents.insert(name.to_string(), parent.to_string());
        Ok(())
    }

    pub fn panel(&self, name: &str) -> Option<&Panel> {
        match self.parents.get(name) {
            Some(parent) => self.panels.get(parent)?.sub_panel(name),
            None => self.panels.get(name),
        }
    }

    pub fn panel_mut(&mut self, name: &str) -> Option<&mut Panel> {
        match self.parents.get(name) {
            Some(parent) => self.panels.get_mut(parent)?.sub_panel_mut(name),
            None => self.panels.get_mut(name),
        }
    }

    /// Every registered panel and sub-panel name, sorted
    pub fn available_panels(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .panels
            .keys()
            .chain(self.parents.keys())
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Panel that hosts the surface called `view`
    pub fn panel_for_view(&self, view: &str) -> Option<String> {
        self.available_panels()
            .into_iter()
            .find(|name| {
                self.panel(name)
                    .and_then(|p| p.view_name())
                    .is_some_and(|v| v == view)
            })
    }

    pub fn is_panel_visible(&self, name: &str) -> bool {
        self.panel(name).is_some_and(|p| p.is_visible())
    }

    /// Visible and not collapsed by the last refresh
    pub fn is_panel_focusable(&self, name: &str) -> bool {
        self.panel(name)
            .is_some_and(|p| p.is_visible() && !p.is_collapsed())
    }

    pub fn set_panel_visible(&mut self, screen: &mut Screen, name: &str, visible: bool) -> Result<(), LayoutError> {
        let panel = self
            .panel_mut(name)
            .ok_or_else(|| LayoutError::UnknownPanel(name.to_string()))?;
        panel.set_visible(screen, visible);
        tracing::debug!(panel = name, visible, "panel visibility changed");
        Ok(())
    }

    /// Partition the terminal and bring every placed panel up to date.
    ///
    /// Unknown panels and degenerate sizes abort before any surface is
    /// touched. Panels whose region ends up with no area are collapsed.
    pub fn refresh(&mut self, screen: &mut Screen, width: u16, height: u16) -> Result<(), LayoutError> {
        if width == 0 || height == 0 {
            return Err(LayoutError::DegenerateTerminal { width, height });
        }
        if self.last_size != (width, height) {
            tracing::debug!(width, height, "terminal size changed");
            self.last_size = (width, height);
        }

        let tree = self.layout_tree();
        if let Some(missing) = tree.panel_names().into_iter().find(|n| self.panel(n).is_none()) {
            return Err(LayoutError::UnknownPanel(missing.to_string()));
        }

        let placed = arrange(&tree, Rect::new(0, 0, width, height), |name| {
            self.is_panel_visible(name)
        });

        for (name, rect) in placed {
            let panel = self
                .panel_mut(&name)
                .ok_or_else(|| LayoutError::UnknownPanel(name.clone()))?;
            if rect.is_empty() {
                if !panel.is_collapsed() {
                    tracing::debug!(panel = %name, "no space, surface released");
                }
                panel.collapse(screen);
                continue;
            }
            panel.update_dimensions(screen, rect)?;
            panel.create_or_update_view(screen)?;
            panel.render_content(screen)?;
        }
        Ok(())
    }

    /// Terminal size seen by the last refresh
    pub fn last_size(&self) -> (u16, u16) {
        self.last_size
    }

    // ─────────────────────────────────────────────────────────────────────
    // Right-hand column
    // ─────────────────────────────────────────────────────────────────────

    pub fn is_right_panel_visible(&self) -> bool {
        self.right_panel_visible
    }

    pub fn right_panel_mode(&self) -> RightPanelMode {
        self.right_panel_mode
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn show_right_panel(&mut self, screen: &mut Screen, mode: RightPanelMode) {
        self.right_panel_mode = mode;
        self.right_panel_visible = true;
        self.apply_right_panel(screen);
    }

    pub fn hide_right_panel(&mut self, screen: &mut Screen) {
        self.right_panel_visible = false;
        self.apply_right_panel(screen);
    }

    /// Returns whether the column is now visible
    pub fn toggle_right_panel(&mut self, screen: &mut Screen) -> bool {
        if self.right_panel_visible {
            self.hide_right_panel(screen);
        } else {
            self.show_right_panel(screen, self.right_panel_mode);
        }
        self.right_panel_visible
    }

    /// Flip between modes; a hidden column stays hidden
    pub fn switch_right_panel_mode(&mut self, screen: &mut Screen) -> RightPanelMode {
        self.right_panel_mode = self.right_panel_mode.next();
        if self.right_panel_visible {
            self.apply_right_panel(screen);
        }
        self.right_panel_mode
    }

    pub fn toggle_zoom(&mut self) -> bool {
        self.zoomed = !self.zoomed;
        self.zoomed
    }

    /// Desired visibility for a right-hand panel, `None` for anything else
    fn right_panel_state(&self, name: &str) -> Option<bool> {
        RightPanelMode::ALL
            .into_iter()
            .find(|mode| mode.panel_name() == name)
            .map(|mode| self.right_panel_visible && mode == self.right_panel_mode)
    }

    fn apply_right_panel(&mut self, screen: &mut Screen) {
        for mode in RightPanelMode::ALL {
            let visible = self.right_panel_visible && mode == self.right_panel_mode;
            if let Some(panel) = self.panels.get_mut(mode.panel_name()) {
                panel.set_visible(screen, visible);
            }
        }
        tracing::debug!(
            visible = self.right_panel_visible,
            mode = %self.right_panel_mode,
            "right panel updated"
        );
    }

    // ─────────────────────────────────────────────────────────────────────
    // Modal support
    // ─────────────────────────────────────────────────────────────────────

    /// Remove every panel binding while a dialog owns the keyboard
    pub fn suspend_keybindings(&mut self, screen: &mut Screen) {
        for panel in self.panels.values_mut() {
            panel.suspend_keybindings(screen);
        }
    }

    pub fn restore_keybindings(&mut self, screen: &mut Screen) -> Result<(), LayoutError> {
        for panel in self.panels.values_mut() {
            panel.restore_keybindings(screen)?;
        }
        Ok(())
    }
}
