//! Debug panel component
//!
//! Live view of the in-memory log buffer fed by the tracing layer. Lives in
//! the right-hand column and carries its own visibility flag so the layout
//! manager can hide it without forgetting its scroll position.

use crate::logging::LogBuffer;
use crate::tui::layout::PANEL_DEBUG;
use crate::tui::screen::{Surface, WindowProperties};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, Handled, Renderable, ScrollKeys, Scrollable, Visibility};
use anyhow::Result;
use crossterm::event::KeyEvent;

pub struct DebugPanel {
    buffer: LogBuffer,
    scroll: ScrollState,
    visible: bool,
    /// Buffer version and visible range behind the lines on the surface
    painted: Option<(u64, (usize, usize))>,
}

impl DebugPanel {
    pub fn new(buffer: LogBuffer) -> Self {
        Self {
            buffer,
            scroll: ScrollState::new(),
            visible: false,
            painted: None,
        }
    }
}

impl Component for DebugPanel {
    fn view_name(&self) -> &str {
        PANEL_DEBUG
    }

    fn window_properties(&self) -> WindowProperties {
        WindowProperties {
            wrap: false,
            ..WindowProperties::default()
        }
    }

    fn title(&self) -> String {
        format!(" Debug ({}) ", self.buffer.len())
    }

    /// A fresh surface starts blank
    fn attach(&mut self, _view: &str) {
        self.painted = None;
    }

    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        self.handle_scroll_keys(key)
    }

    fn as_visibility(&self) -> Option<&dyn Visibility> {
        Some(self)
    }

    fn as_visibility_mut(&mut self) -> Option<&mut dyn Visibility> {
        Some(self)
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }
}

impl Visibility for DebugPanel {
    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Scrollable for DebugPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Renderable for DebugPanel {
    fn render(&mut self, surface: &mut Surface) -> Result<()> {
        let version = self.buffer.version();
        self.scroll
            .update_dimensions(self.buffer.len(), surface.inner_height());
        let window = self.scroll.visible_range();
        if self.painted == Some((version, window)) {
            return Ok(());
        }
        self.painted = Some((version, window));

        if self.buffer.is_empty() {
            surface.set_lines(vec!["(no log entries)".to_string()]);
            return Ok(());
        }
        let entries = self.buffer.get_all();
        let end = window.1.min(entries.len());
        let start = window.0.min(end);
        surface.set_lines(
            entries[start..end]
                .iter()
                .map(|entry| entry.display_line())
                .collect(),
        );
        Ok(())
    }
}
