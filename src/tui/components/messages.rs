//! Messages panel component
//!
//! Scrolling transcript of submitted input and system notices. Owns its
//! scroll state; auto-follows new lines until the user scrolls up.

use crate::tui::layout::PANEL_MESSAGES;
use crate::tui::screen::{Surface, WindowProperties};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, Handled, Renderable, ScrollKeys, Scrollable};
use anyhow::Result;
use crossterm::event::KeyEvent;

/// Maximum number of lines kept in the transcript
const MAX_LINES: usize = 5000;

pub struct MessagesPanel {
    lines: Vec<String>,
    scroll: ScrollState,
}

impl MessagesPanel {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            scroll: ScrollState::new(),
        }
    }

    /// Append a line (multi-line text is split)
    pub fn push(&mut self, text: &str) {
        self.lines.extend(text.lines().map(str::to_string));
        if self.lines.len() > MAX_LINES {
            let excess = self.lines.len() - MAX_LINES;
            self.lines.drain(..excess);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll.scroll_to_bottom();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for MessagesPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for MessagesPanel {
    fn view_name(&self) -> &str {
        PANEL_MESSAGES
    }

    fn window_properties(&self) -> WindowProperties {
        // Rows map 1:1 to lines so scrolling stays exact
        WindowProperties {
            wrap: false,
            ..WindowProperties::default()
        }
    }

    fn title(&self) -> String {
        if self.scroll.auto_follow {
            " Messages ".to_string()
        } else {
            " Messages [scrolled] ".to_string()
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        self.handle_scroll_keys(key)
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }
}

impl Scrollable for MessagesPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Renderable for MessagesPanel {
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
    use crossterm::event::{KeyCode, KeyModifiers};

    fn surface(screen: &mut Screen, rows: i32) -> &mut Surface {
        // Two rows go to the frame
        screen
            .set_view(PANEL_MESSAGES, Bounds::new(0, 0, 20, rows + 2))
            .unwrap();
        screen.view_mut(PANEL_MESSAGES).unwrap()
    }

    #[test]
    fn renders_the_newest_lines() {
        let mut panel = MessagesPanel::new();
        for i in 0..10 {
            panel.push(&format!("line {}", i));
        }
        let mut screen = Screen::new();
        let s = surface(&mut screen, 3);
        panel.render(s).unwrap();
        assert_eq!(s.lines(), ["line 7", "line 8", "line 9"]);
    }

    #[test]
    fn scrolling_up_pins_the_view() {
        let mut panel = MessagesPanel::new();
        panel.push("a\nb\nc\nd");
        let mut screen = Screen::new();
        let s = surface(&mut screen, 2);
        panel.render(s).unwrap();

        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(panel.handle_key(up), Handled::Yes);
        panel.push("e");
        panel.render(s).unwrap();

        assert_eq!(s.lines(), ["b", "c"]);
        assert!(panel.title().contains("scrolled"));
    }

    #[test]
    fn clear_empties_transcript() {
        let mut panel = MessagesPanel::new();
        panel.push("x");
        panel.clear();
        assert!(panel.is_empty());
    }
}
