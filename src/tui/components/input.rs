//! Input line component
//!
//! Single-line editor hosted by the input panel. Enter is a bound key that
//! publishes `SubmitInput`; the shell then takes the text with [`InputLine::take`].
//! Every other printable key is routed here through `handle_key`.

use crate::events::{EventBus, UiEvent};
use crate::tui::layout::PANEL_INPUT;
use crate::tui::screen::{KeyBinding, Surface, WindowProperties};
use crate::tui::traits::{Component, Handled, Renderable};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthChar;

const PROMPT: &str = "> ";

pub struct InputLine {
    bus: EventBus,
    buffer: String,
    /// Cursor position in chars (not bytes)
    cursor: usize,
    history: Vec<String>,
}

impl InputLine {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            buffer: String::new(),
            cursor: 0,
            history: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Drain the buffer; non-empty lines are remembered
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        let text = std::mem::take(&mut self.buffer);
        if !text.trim().is_empty() {
            self.history.push(text.clone());
        }
        text
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.buffer.remove(at);
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.buffer.remove(at);
        true
    }
}

impl Component for InputLine {
    fn view_name(&self) -> &str {
        PANEL_INPUT
    }

    fn window_properties(&self) -> WindowProperties {
        WindowProperties {
            editable: true,
            wrap: false,
            ..WindowProperties::default()
        }
    }

    fn title(&self) -> String {
        " Input ".to_string()
    }

    fn keybindings(&self) -> Vec<KeyBinding> {
        vec![KeyBinding::new(
            "",
            KeyCode::Enter,
            KeyModifiers::NONE,
            self.bus.handler(UiEvent::SubmitInput),
        )]
    }

    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return Handled::No;
        }

        match key.code {
            KeyCode::Char(ch) => {
                self.insert(ch);
                Handled::Yes
            }
            KeyCode::Backspace => self.backspace().into(),
            KeyCode::Delete => self.delete().into(),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                Handled::Yes
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                Handled::Yes
            }
            KeyCode::Home => {
                self.cursor = 0;
                Handled::Yes
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }
}

impl Renderable for InputLine {
    fn render(&mut self, surface: &mut Surface) -> Result<()> {
        let width = surface.inner_width();
        let prompt_width = PROMPT.len();
        let room = width.saturating_sub(prompt_width + 1);

        // Slide the window left until the cursor fits
        let chars: Vec<char> = self.buffer.chars().collect();
        let width_of = |range: &[char]| -> usize {
            range.iter().map(|c| c.width().unwrap_or(0)).sum()
        };
        let mut start = 0;
        while start < self.cursor && width_of(&chars[start..self.cursor]) > room {
            start += 1;
        }

        let mut visible = String::from(PROMPT);
        let mut used = 0;
        for &ch in &chars[start..] {
            let w = ch.width().unwrap_or(0);
            if used + w > room {
                break;
            }
            used += w;
            visible.push(ch);
        }

        let column = prompt_width + width_of(&chars[start..self.cursor]);
        surface.set_lines(vec![visible]);
        surface.set_cursor(column as u16, 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screen::{Bounds, Screen};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn input() -> InputLine {
        let (bus, _rx) = EventBus::channel();
        InputLine::new(bus)
    }

    fn type_str(input: &mut InputLine, text: &str) {
        for ch in text.chars() {
            input.handle_key(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn editing_in_the_middle() {
        let mut input = input();
        type_str(&mut input, "helo");
        input.handle_key(key(KeyCode::Left));
        type_str(&mut input, "l");
        assert_eq!(input.text(), "hello");
        assert_eq!(input.cursor(), 4);

        input.handle_key(key(KeyCode::Home));
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), Handled::No);
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.text(), "ello");
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let mut input = input();
        type_str(&mut input, "ab");
        assert_eq!(input.handle_key(key(KeyCode::Delete)), Handled::No);

        input.handle_key(key(KeyCode::Home));
        assert_eq!(input.handle_key(key(KeyCode::Delete)), Handled::Yes);
        assert_eq!(input.text(), "b");
        assert_eq!(input.handle_key(key(KeyCode::Backspace)), Handled::No);
    }

    #[test]
    fn multibyte_characters_edit_cleanly() {
        let mut input = input();
        type_str(&mut input, "añb");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn control_chords_are_left_to_bindings() {
        let mut input = input();
        let ctrl_d = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(input.handle_key(ctrl_d), Handled::No);
        assert!(input.text().is_empty());
    }

    #[test]
    fn take_resets_and_records_history() {
        let mut input = input();
        type_str(&mut input, "hi");
        assert_eq!(input.take(), "hi");
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor(), 0);
        input.take();
        assert_eq!(input.history(), ["hi"]);
    }

    #[test]
    fn enter_binding_publishes_submit() {
        let (bus, mut rx) = EventBus::channel();
        let input = InputLine::new(bus);
        let bindings = input.keybindings();
        assert_eq!(bindings.len(), 1);
        (bindings[0].handler)().unwrap();
        assert_eq!(rx.try_recv().unwrap(), UiEvent::SubmitInput);
    }

    #[test]
    fn render_places_cursor_after_prompt() {
        let mut input = input();
        type_str(&mut input, "abc");
        input.handle_key(key(KeyCode::Left));

        let mut screen = Screen::new();
        screen
            .set_view(PANEL_INPUT, Bounds::new(0, 0, 40, 4))
            .unwrap();
        let surface = screen.view_mut(PANEL_INPUT).unwrap();
        input.render(surface).unwrap();

        assert_eq!(surface.lines(), ["> abc"]);
        assert_eq!(surface.cursor(), (4, 0));
    }

    #[test]
    fn long_lines_scroll_to_keep_cursor_visible() {
        let mut input = input();
        type_str(&mut input, &"x".repeat(50));

        let mut screen = Screen::new();
        screen
            .set_view(PANEL_INPUT, Bounds::new(0, 0, 22, 4))
            .unwrap();
        let surface = screen.view_mut(PANEL_INPUT).unwrap();
        input.render(surface).unwrap();

        // 20 inner columns: prompt + 17 chars + room for the cursor
        assert_eq!(surface.lines()[0].len(), 2 + 17);
        assert_eq!(surface.cursor(), (19, 0));
    }
}
