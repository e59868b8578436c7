// Status bar components
//
// The status panel is a frameless composite: the bar itself paints nothing,
// its three segments (left, center, right) are sub-panels that each show a
// line of text. Segments pick a short form of their text on narrow widths.

use super::formatters::{format_compact_number, truncate_to_width};
use crate::tui::layout::{Breakpoint, PANEL_STATUS, STATUS_CENTER, STATUS_LEFT, STATUS_RIGHT};
use crate::tui::screen::{Surface, WindowProperties};
use crate::tui::traits::{Component, Renderable};
use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

/// Frameless, never highlighted, never wrapped
fn status_properties() -> WindowProperties {
    WindowProperties {
        bordered: false,
        editable: false,
        wrap: false,
        highlight: false,
    }
}

/// How a segment lines its text up inside its cell range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One line of status text
pub struct StatusSegment {
    view: &'static str,
    align: Align,
    text: String,
    /// Used below the `Normal` breakpoint when set
    short_text: Option<String>,
}

impl StatusSegment {
    pub fn new(view: &'static str, align: Align) -> Self {
        Self {
            view,
            align,
            text: String::new(),
            short_text: None,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.short_text = None;
    }

    pub fn set_texts(&mut self, text: impl Into<String>, short_text: impl Into<String>) {
        self.text = text.into();
        self.short_text = Some(short_text.into());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text fitted to `width` cells
    pub fn line_for_width(&self, width: usize) -> String {
        let bp = Breakpoint::from_width(width.min(u16::MAX as usize) as u16);
        let text = match &self.short_text {
            Some(short) if !bp.at_least(Breakpoint::Normal) => short.as_str(),
            _ => self.text.as_str(),
        };
        let text = if self.view == STATUS_LEFT {
            format!(" {}", text)
        } else {
            text.to_string()
        };

        let fitted = truncate_to_width(&text, width);
        let pad = width.saturating_sub(fitted.width());
        match self.align {
            Align::Left => fitted,
            Align::Center => format!("{}{}", " ".repeat(pad / 2), fitted),
            Align::Right => format!("{}{}", " ".repeat(pad), fitted),
        }
    }
}

impl Component for StatusSegment {
    fn view_name(&self) -> &str {
        self.view
    }

    fn window_properties(&self) -> WindowProperties {
        status_properties()
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }
}

impl Renderable for StatusSegment {
    fn render(&mut self, surface: &mut Surface) -> Result<()> {
        let line = self.line_for_width(surface.inner_width());
        surface.set_lines(vec![line]);
        Ok(())
    }
}

/// Numbers shown on the right-hand segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub messages: usize,
    pub log_entries: usize,
}

/// Composite owner of the three segments
pub struct StatusBar {
    left: Rc<RefCell<StatusSegment>>,
    center: Rc<RefCell<StatusSegment>>,
    right: Rc<RefCell<StatusSegment>>,
}

impl StatusBar {
    pub fn new() -> Self {
        let bar = Self {
            left: Rc::new(RefCell::new(StatusSegment::new(STATUS_LEFT, Align::Left))),
            center: Rc::new(RefCell::new(StatusSegment::new(STATUS_CENTER, Align::Center))),
            right: Rc::new(RefCell::new(StatusSegment::new(STATUS_RIGHT, Align::Right))),
        };
        bar.set_ready();
        bar
    }

    pub fn left(&self) -> Rc<RefCell<StatusSegment>> {
        self.left.clone()
    }

    pub fn center(&self) -> Rc<RefCell<StatusSegment>> {
        self.center.clone()
    }

    pub fn right(&self) -> Rc<RefCell<StatusSegment>> {
        self.right.clone()
    }

    pub fn set_ready(&self) {
        self.left.borrow_mut().set_text("Ready");
    }

    /// Waiting on a y/n answer
    pub fn set_awaiting_answer(&self) {
        self.left.borrow_mut().set_texts("Your call (y/n)", "y/n");
    }

    pub fn set_center(&self, text: &str) {
        self.center.borrow_mut().set_text(text);
    }

    pub fn set_counts(&self, counts: StatusCounts) {
        let msgs = format_compact_number(counts.messages as u64);
        let logs = format_compact_number(counts.log_entries as u64);
        self.right.borrow_mut().set_texts(
            format!("Msgs: {} | Logs: {} ", msgs, logs),
            format!("{}/{} ", msgs, logs),
        );
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn view_name(&self) -> &str {
        PANEL_STATUS
    }

    fn window_properties(&self) -> WindowProperties {
        status_properties()
    }
}
