//! Inline yes/no confirmation
//!
//! Swapped into the input panel in place of the input line, so it reuses the
//! `input` surface identity. The answer goes out as a UiEvent; the shell
//! swaps the input line back when it applies it.

use crate::events::{EventBus, UiEvent};
use crate::tui::layout::PANEL_INPUT;
use crate::tui::screen::{KeyBinding, Surface, WindowProperties};
use crate::tui::traits::{Component, Renderable};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct Confirmation {
    bus: EventBus,
    message: String,
    /// Builds the event published for an answer
    answer: fn(bool) -> UiEvent,
}

impl Confirmation {
    pub fn new(bus: EventBus, message: impl Into<String>, answer: fn(bool) -> UiEvent) -> Self {
        Self {
            bus,
            message: message.into(),
            answer,
        }
    }

    /// Confirmation for `/clear`
    pub fn clear_messages(bus: EventBus) -> Self {
        Self::new(bus, "Clear all messages?", UiEvent::ConfirmClear)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Component for Confirmation {
    fn view_name(&self) -> &str {
        PANEL_INPUT
    }

    fn window_properties(&self) -> WindowProperties {
        WindowProperties {
            editable: false,
            wrap: true,
            highlight: false,
            ..WindowProperties::default()
        }
    }

    fn title(&self) -> String {
        format!(" {} ", self.message)
    }

    fn keybindings(&self) -> Vec<KeyBinding> {
        let yes = [KeyCode::Char('1'), KeyCode::Char('y'), KeyCode::Char('Y')];
        let no = [
            KeyCode::Char('2'),
            KeyCode::Char('n'),
            KeyCode::Char('N'),
            KeyCode::Esc,
        ];

        let bind = |key: KeyCode, confirmed: bool| {
            KeyBinding::new(
                "",
                key,
                KeyModifiers::NONE,
                self.bus.handler((self.answer)(confirmed)),
            )
        };
        yes.into_iter()
            .map(|k| bind(k, true))
            .chain(no.into_iter().map(|k| bind(k, false)))
            .collect()
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }
}

impl Renderable for Confirmation {
    fn render(&mut self, surface: &mut Surface) -> Result<()> {
        surface.set_lines(vec!["[1] Yes  [2] No  (y/n, Esc cancels)".to_string()]);
        Ok(())
    }
}
