// Screen - the surface registry behind every panel
//
// Panels never paint directly. They ask the Screen to create, resize or
// delete named surfaces, and to install key bindings scoped to them. Once per
// tick the Screen paints every live surface onto the ratatui frame in
// creation order, so later surfaces (dialogs) sit on top.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::fmt;
use std::rc::Rc;

/// Cells every surface reserves on each edge for its frame.
///
/// The frame is only painted for bordered surfaces, but the space is always
/// reserved, so a borderless surface must be expanded by this much on every
/// edge for its content to fill its region.
pub const FRAME_INSET: i32 = 1;

/// Surface rectangle in terminal cells, end-exclusive.
///
/// Unlike `Rect` this may extend past the terminal edge (negative origin),
/// which is what a borderless surface at column 0 looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Bounds {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x0: rect.x as i32,
            y0: rect.y as i32,
            x1: rect.x as i32 + rect.width as i32,
            y1: rect.y as i32 + rect.height as i32,
        }
    }

    /// Grow (or shrink, for negative `n`) by `n` cells on every edge
    pub fn expand(self, n: i32) -> Self {
        Self {
            x0: self.x0 - n,
            y0: self.y0 - n,
            x1: self.x1 + n,
            y1: self.y1 + n,
        }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Visible part of these bounds inside `area`, if any
    pub fn clip(&self, area: Rect) -> Option<Rect> {
        let x0 = self.x0.max(area.x as i32);
        let y0 = self.y0.max(area.y as i32);
        let x1 = self.x1.min(area.right() as i32);
        let y1 = self.y1.min(area.bottom() as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(
            x0 as u16,
            y0 as u16,
            (x1 - x0) as u16,
            (y1 - y0) as u16,
        ))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})-({},{})", self.x0, self.y0, self.x1, self.y1)
    }
}

/// Display properties a component declares for its surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowProperties {
    pub bordered: bool,
    pub editable: bool,
    pub wrap: bool,
    pub highlight: bool,
}

impl Default for WindowProperties {
    fn default() -> Self {
        Self {
            bordered: true,
            editable: false,
            wrap: true,
            highlight: true,
        }
    }
}

/// A materialized, named rendering target
#[derive(Debug, Clone)]
pub struct Surface {
    name: String,
    bounds: Bounds,
    pub title: String,
    pub props: WindowProperties,
    lines: Vec<String>,
    scroll: u16,
    cursor: (u16, u16),
}

impl Surface {
    fn new(name: &str, bounds: Bounds) -> Self {
        Self {
            name: name.to_string(),
            bounds,
            title: String::new(),
            props: WindowProperties::default(),
            lines: Vec::new(),
            scroll: 0,
            cursor: (0, 0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Area available for content (inside the reserved frame)
    pub fn inner_bounds(&self) -> Bounds {
        self.bounds.expand(-FRAME_INSET)
    }

    /// Content width in cells (0 when the frame eats everything)
    pub fn inner_width(&self) -> usize {
        self.inner_bounds().width().max(0) as usize
    }

    /// Content height in rows (0 when the frame eats everything)
    pub fn inner_height(&self) -> usize {
        self.inner_bounds().height().max(0) as usize
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll = 0;
    }

    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    pub fn write_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn set_scroll(&mut self, offset: u16) {
        self.scroll = offset;
    }

    /// Cursor position relative to the content area
    pub fn set_cursor(&mut self, column: u16, row: u16) {
        self.cursor = (column, row);
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }
}

/// Handler invoked when a bound key is pressed
pub type KeyHandler = Rc<dyn Fn() -> Result<()>>;

/// A key binding scoped to a surface (or global when `view` is empty)
#[derive(Clone)]
pub struct KeyBinding {
    pub view: String,
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub handler: KeyHandler,
}

impl KeyBinding {
    pub fn new(
        view: impl Into<String>,
        key: KeyCode,
        modifiers: KeyModifiers,
        handler: impl Fn() -> Result<()> + 'static,
    ) -> Self {
        Self {
            view: view.into(),
            key,
            modifiers,
            handler: Rc::new(handler),
        }
    }

    /// Binding that applies regardless of the current view
    pub fn global(
        key: KeyCode,
        modifiers: KeyModifiers,
        handler: impl Fn() -> Result<()> + 'static,
    ) -> Self {
        Self::new("", key, modifiers, handler)
    }

    /// Same binding, scoped to `view`
    pub fn scoped_to(&self, view: &str) -> Self {
        Self {
            view: view.to_string(),
            ..self.clone()
        }
    }

    fn same_slot(&self, view: &str, key: KeyCode, modifiers: KeyModifiers) -> bool {
        self.view == view && self.key == key && self.modifiers == modifiers
    }
}

impl fmt::Debug for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBinding")
            .field("view", &self.view)
            .field("key", &self.key)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}

/// Whether `set_view` created a surface or resized an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceChange {
    Created,
    Updated,
}

/// Failures reported by the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// Rectangle has no area (e.g. after an extreme terminal resize)
    InvalidBounds { view: String, bounds: Bounds },
    /// No surface with this name exists
    UnknownView(String),
    /// A binding for the same view, key and modifiers is already installed
    DuplicateBinding {
        view: String,
        key: KeyCode,
        modifiers: KeyModifiers,
    },
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBounds { view, bounds } => {
                write!(f, "Invalid bounds {} for view '{}'", bounds, view)
            }
            Self::UnknownView(view) => write!(f, "Unknown view '{}'", view),
            Self::DuplicateBinding {
                view,
                key,
                modifiers,
            } => write!(
                f,
                "Key binding {:?}+{:?} already installed for view '{}'",
                modifiers, key, view
            ),
        }
    }
}

impl std::error::Error for ScreenError {}

/// Counters for surface lifecycle events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenStats {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub bindings_installed: usize,
}

/// In-memory surface registry painted onto a ratatui frame
#[derive(Debug, Default)]
pub struct Screen {
    /// Live surfaces in creation order (z-order)
    surfaces: Vec<Surface>,
    bindings: Vec<KeyBinding>,
    current: Option<String>,
    cursor_visible: bool,
    stats: ScreenStats,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the named surface, or move it to `bounds` if it already exists
    pub fn set_view(&mut self, name: &str, bounds: Bounds) -> Result<SurfaceChange, ScreenError> {
        if bounds.is_empty() {
            return Err(ScreenError::InvalidBounds {
                view: name.to_string(),
                bounds,
            });
        }

        if let Some(surface) = self.view_mut(name) {
            surface.bounds = bounds;
            self.stats.updated += 1;
            return Ok(SurfaceChange::Updated);
        }

        self.surfaces.push(Surface::new(name, bounds));
        self.stats.created += 1;
        tracing::trace!(view = name, %bounds, "surface created");
        Ok(SurfaceChange::Created)
    }

    pub fn view(&self, name: &str) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.name == name)
    }

    pub fn view_mut(&mut self, name: &str) -> Option<&mut Surface> {
        self.surfaces.iter_mut().find(|s| s.name == name)
    }

    pub fn view_names(&self) -> impl Iterator<Item = &str> {
        self.surfaces.iter().map(|s| s.name.as_str())
    }

    /// Release a surface together with every binding scoped to it
    pub fn delete_view(&mut self, name: &str) -> Result<(), ScreenError> {
        let Some(idx) = self.surfaces.iter().position(|s| s.name == name) else {
            return Err(ScreenError::UnknownView(name.to_string()));
        };
        self.surfaces.remove(idx);
        self.bindings.retain(|b| b.view != name);
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        self.stats.deleted += 1;
        tracing::trace!(view = name, "surface deleted");
        Ok(())
    }

    pub fn set_keybinding(&mut self, binding: KeyBinding) -> Result<(), ScreenError> {
        if self
            .bindings
            .iter()
            .any(|b| b.same_slot(&binding.view, binding.key, binding.modifiers))
        {
            return Err(ScreenError::DuplicateBinding {
                view: binding.view,
                key: binding.key,
                modifiers: binding.modifiers,
            });
        }
        self.bindings.push(binding);
        self.stats.bindings_installed += 1;
        Ok(())
    }

    /// Remove one binding; returns whether it was installed
    pub fn delete_keybinding(&mut self, view: &str, key: KeyCode, modifiers: KeyModifiers) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| !b.same_slot(view, key, modifiers));
        before != self.bindings.len()
    }

    pub fn delete_keybindings(&mut self, view: &str) {
        self.bindings.retain(|b| b.view != view);
    }

    pub fn keybindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Resolve a key press: current view first, then global scope
    pub fn binding_for(&self, key: &KeyEvent) -> Option<KeyHandler> {
        // The character already carries its case
        let modifiers = match key.code {
            KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
            _ => key.modifiers,
        };
        let lookup = |view: &str| {
            self.bindings
                .iter()
                .find(|b| b.same_slot(view, key.code, modifiers))
                .map(|b| b.handler.clone())
        };
        self.current
            .as_deref()
            .and_then(lookup)
            .or_else(|| lookup(""))
    }

    /// Give display-level focus to a surface
    pub fn set_current_view(&mut self, name: &str) -> Result<&mut Surface, ScreenError> {
        let Some(idx) = self.surfaces.iter().position(|s| s.name == name) else {
            return Err(ScreenError::UnknownView(name.to_string()));
        };
        self.current = Some(name.to_string());
        Ok(&mut self.surfaces[idx])
    }

    pub fn current_view(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn stats(&self) -> ScreenStats {
        self.stats
    }

    /// Paint every surface onto the frame
    pub fn draw(&self, f: &mut Frame) {
        let area = f.area();

        for surface in &self.surfaces {
            let Some(outer) = surface.bounds.clip(area) else {
                continue;
            };
            let is_current = self.current.as_deref() == Some(surface.name.as_str());

            if surface.props.bordered {
                f.render_widget(Clear, outer);
                let border_style = if is_current && surface.props.highlight {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style)
                    .title(surface.title.as_str());
                f.render_widget(block, outer);
            }

            let Some(inner) = surface.inner_bounds().clip(area) else {
                continue;
            };
            // The reserved frame of a borderless surface belongs to its neighbours
            if !surface.props.bordered {
                f.render_widget(Clear, inner);
            }

            let text = Text::from(
                surface
                    .lines
                    .iter()
                    .map(|l| Line::raw(l.as_str()))
                    .collect::<Vec<_>>(),
            );
            let mut paragraph = Paragraph::new(text).scroll((surface.scroll, 0));
            if surface.props.wrap {
                paragraph = paragraph.wrap(Wrap { trim: false });
            }
            f.render_widget(paragraph, inner);

            if is_current && surface.props.editable && self.cursor_visible {
                let (col, row) = surface.cursor;
                let x = surface.inner_bounds().x0 + col as i32;
                let y = surface.inner_bounds().y0 + row as i32;
                if x >= inner.x as i32
                    && x < inner.right() as i32
                    && y >= inner.y as i32
                    && y < inner.bottom() as i32
                {
                    f.set_cursor_position(Position::new(x as u16, y as u16));
                }
            }
        }
    }
}
