//! Modal dialogs
//!
//! Dialogs are not panels: the shell creates their surface directly on the
//! screen, centered over the layout, and removes it again on close. They
//! still implement [`Component`] so binding install and rendering go through
//! the same contract.

use crate::events::{EventBus, UiEvent};
use crate::tui::screen::{Bounds, KeyBinding, Surface, WindowProperties};
use crate::tui::traits::{Component, Renderable};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};

/// Size of a dialog as a share of the terminal, clamped to limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogSize {
    pub width_percent: u16,
    pub height_percent: u16,
    pub min_width: u16,
    pub min_height: u16,
    pub max_width: u16,
    pub max_height: u16,
}

impl DialogSize {
    /// Centered bounds on a `width` x `height` terminal, never larger than it
    pub fn centered(&self, width: u16, height: u16) -> Bounds {
        let w = (width as u32 * self.width_percent as u32 / 100) as u16;
        let h = (height as u32 * self.height_percent as u32 / 100) as u16;
        let w = w.clamp(self.min_width, self.max_width).min(width);
        let h = h.clamp(self.min_height, self.max_height).min(height);

        let x = ((width - w) / 2) as i32;
        let y = ((height - h) / 2) as i32;
        Bounds::new(x, y, x + w as i32, y + h as i32)
    }
}

/// A component shown over the layout
pub trait Dialog: Component {
    fn size(&self) -> DialogSize;
}

pub const QUIT_DIALOG: &str = "quit-dialog";

/// "Really quit?" prompt opened by Ctrl+C / Ctrl+Q
pub struct QuitDialog {
    bus: EventBus,
}

impl QuitDialog {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl Component for QuitDialog {
    fn view_name(&self) -> &str {
        QUIT_DIALOG
    }

    fn window_properties(&self) -> WindowProperties {
        WindowProperties {
            wrap: true,
            highlight: true,
            ..WindowProperties::default()
        }
    }

    fn title(&self) -> String {
        " Quit ".to_string()
    }

    fn keybindings(&self) -> Vec<KeyBinding> {
        let mut bindings: Vec<KeyBinding> = [KeyCode::Char('y'), KeyCode::Char('Y'), KeyCode::Enter]
            .into_iter()
            .map(|key| KeyBinding::new("", key, KeyModifiers::NONE, self.bus.handler(UiEvent::Quit)))
            .collect();
        bindings.extend(
            [
                KeyCode::Char('n'),
                KeyCode::Char('N'),
                KeyCode::Char('q'),
                KeyCode::Esc,
            ]
            .into_iter()
            .map(|key| {
                KeyBinding::new(
                    "",
                    key,
                    KeyModifiers::NONE,
                    self.bus.handler(UiEvent::CloseDialog),
                )
            }),
        );
        bindings
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }
}

impl Renderable for QuitDialog {
    fn render(&mut self, surface: &mut Surface) -> Result<()> {
        surface.set_lines(vec![
            String::new(),
            " Quit panedeck?".to_string(),
            String::new(),
            " [y] Yes   [n] No".to_string(),
        ]);
        Ok(())
    }
}

impl Dialog for QuitDialog {
    fn size(&self) -> DialogSize {
        DialogSize {
            width_percent: 30,
            height_percent: 20,
            min_width: 24,
            min_height: 6,
            max_width: 40,
            max_height: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_is_centered_and_clamped() {
        let (bus, _rx) = EventBus::channel();
        let size = QuitDialog::new(bus).size();

        // 30% of 100 = 30 wide, 20% of 40 = 8 high
        assert_eq!(size.centered(100, 40), Bounds::new(35, 16, 65, 24));
        // Below the minimum the dialog grows to 24x6
        assert_eq!(size.centered(50, 20), Bounds::new(13, 7, 37, 13));
        // Never larger than the terminal
        assert_eq!(size.centered(10, 4), Bounds::new(0, 0, 10, 4));
    }

    #[test]
    fn yes_quits_and_no_closes() {
        let (bus, mut rx) = EventBus::channel();
        let dialog = QuitDialog::new(bus);
        for binding in dialog.keybindings() {
            if binding.key == KeyCode::Enter || binding.key == KeyCode::Esc {
                (binding.handler)().unwrap();
            }
        }
        assert_eq!(rx.try_recv().unwrap(), UiEvent::Quit);
        assert_eq!(rx.try_recv().unwrap(), UiEvent::CloseDialog);
    }
}
