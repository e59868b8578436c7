//! Text viewer component
//!
//! Read-only scrollable text in the right-hand column. Opens on the keymap
//! help; callers can load other content with [`TextViewer::set_content`].

use crate::events::{EventBus, UiEvent};
use crate::tui::layout::PANEL_TEXT_VIEWER;
use crate::tui::screen::{KeyBinding, Surface, WindowProperties};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, Handled, Renderable, ScrollKeys, Scrollable};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key, description
pub const KEYMAP: &[(&str, &str)] = &[
    ("Tab", "Focus next panel"),
    ("Alt+1..Alt+4", "Focus input / messages / debug / help"),
    ("Ctrl+D", "Show/hide right panel"),
    ("Ctrl+T", "Switch debug / help"),
    ("Ctrl+Z", "Zoom right panel"),
    ("F1", "Toggle this help"),
    ("Ctrl+C, Ctrl+Q", "Quit"),
    ("Up/Down, PgUp/PgDn", "Scroll focused panel"),
    ("Esc", "Close help"),
];

pub struct TextViewer {
    bus: EventBus,
    title: String,
    lines: Vec<String>,
    scroll: ScrollState,
}

impl TextViewer {
    /// Viewer preloaded with the keymap
    pub fn help(bus: EventBus) -> Self {
        let mut viewer = Self {
            bus,
            title: String::new(),
            lines: Vec::new(),
            scroll: ScrollState::new(),
        };
        viewer.show_help();
        viewer
    }

    pub fn show_help(&mut self) {
        let key_width = KEYMAP.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        let mut lines = vec!["Keys".to_string(), String::new()];
        lines.extend(
            KEYMAP
                .iter()
                .map(|(key, desc)| format!("{:<width$}  {}", key, desc, width = key_width)),
        );
        lines.push(String::new());
        lines.push("Type /clear in the input to clear messages.".to_string());
        self.set_content("Help", lines);
    }

    pub fn set_content(&mut self, title: &str, lines: Vec<String>) {
        self.title = title.to_string();
        self.lines = lines;
        self.scroll.scroll_to_top();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Component for TextViewer {
    fn view_name(&self) -> &str {
        PANEL_TEXT_VIEWER
    }

    fn window_properties(&self) -> WindowProperties {
        WindowProperties {
            wrap: false,
            ..WindowProperties::default()
        }
    }

    fn title(&self) -> String {
        format!(" {} ", self.title)
    }

    fn keybindings(&self) -> Vec<KeyBinding> {
        vec![KeyBinding::new(
            "",
            KeyCode::Esc,
            KeyModifiers::NONE,
            self.bus.handler(UiEvent::ToggleHelp),
        )]
    }

    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        self.handle_scroll_keys(key)
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }
}

impl Scrollable for TextViewer {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Renderable for TextViewer {
    fn render(&mut self, surface: &mut Surface) -> Result<()> {
        self.scroll
            .update_dimensions(self.lines.len(), surface.inner_height());
        let (start, end) = self.scroll.visible_range();
        surface.set_lines(self.lines[start..end].to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screen::{Bounds, Screen};

    #[test]
    fn help_lists_every_key() {
        let (bus, _rx) = EventBus::channel();
        let viewer = TextViewer::help(bus);
        for (key, desc) in KEYMAP {
            assert!(viewer
                .lines()
                .iter()
                .any(|l| l.starts_with(key) && l.ends_with(desc)));
        }
        assert_eq!(viewer.title(), " Help ");
    }

    #[test]
    fn new_content_starts_at_the_top() {
        let (bus, _rx) = EventBus::channel();
        let mut viewer = TextViewer::help(bus);
        viewer.set_content("Log", (0..20).map(|i| i.to_string()).collect());

        let mut screen = Screen::new();
        screen
            .set_view(PANEL_TEXT_VIEWER, Bounds::new(0, 0, 30, 5))
            .unwrap();
        let surface = screen.view_mut(PANEL_TEXT_VIEWER).unwrap();
        viewer.render(surface).unwrap();

        assert_eq!(surface.lines(), ["0", "1", "2"]);
    }
}
