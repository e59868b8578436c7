//! Keyboard handling helpers for components
//!
//! Bound keys go through the screen's binding table. Everything else the
//! user types is offered to the focused component, which answers with
//! [`Handled`] so the shell knows whether to fall back to global behaviour.

use super::Scrollable;
use crossterm::event::{KeyCode, KeyEvent};

/// Whether a component consumed a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Yes,
    /// Not consumed; the shell may treat it as a global key
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    fn from(consumed: bool) -> Self {
        if consumed {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Up/Down (or k/j), Home/End and PageUp/PageDown for any scrollable component
pub trait ScrollKeys: Scrollable {
    fn handle_scroll_keys(&mut self, key: KeyEvent) -> Handled {
        let action: fn(&mut Self) = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Self::scroll_up,
            KeyCode::Down | KeyCode::Char('j') => Self::scroll_down,
            KeyCode::Home => Self::scroll_to_top,
            KeyCode::End => Self::scroll_to_bottom,
            KeyCode::PageUp => Self::page_up,
            KeyCode::PageDown => Self::page_down,
            _ => return Handled::No,
        };
        action(self);
        Handled::Yes
    }
}

impl<T: Scrollable + ?Sized> ScrollKeys for T {}
