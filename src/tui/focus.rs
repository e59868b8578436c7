// Focus coordinator - the single "which panel has the keyboard" pointer
//
// Focus only moves through `next_panel` / `focus_by_name`, and every move
// fires `handle_focus_lost` on the old component before `handle_focus` on
// the new one. Panels that are hidden are never candidates; callers run
// `reconcile` after visibility changes so the pointer never dangles.

use crate::tui::layout::{LayoutManager, PANEL_DEBUG, PANEL_INPUT, PANEL_MESSAGES, PANEL_TEXT_VIEWER};
use crate::tui::screen::Screen;

/// Tab order; the status bar is never focusable
pub const FOCUS_ORDER: [&str; 4] = [PANEL_INPUT, PANEL_MESSAGES, PANEL_DEBUG, PANEL_TEXT_VIEWER];

/// Outcome of `focus_by_name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusChange {
    /// A registered panel now has focus
    Panel(String),
    /// Surface without a panel (dialogs) got display focus only
    Raw,
    /// Panel exists but is hidden
    Refused,
}

#[derive(Debug, Clone)]
pub struct FocusCoordinator {
    order: Vec<String>,
    focused: Option<String>,
}

impl Default for FocusCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusCoordinator {
    pub fn new() -> Self {
        Self::with_order(FOCUS_ORDER.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_order(order: Vec<String>) -> Self {
        Self {
            order,
            focused: None,
        }
    }

    /// Panel currently holding focus
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Registered panels that are visible and have area, in tab order
    pub fn candidates(&self, layout: &LayoutManager) -> Vec<String> {
        self.order
            .iter()
            .filter(|name| layout.is_panel_focusable(name))
            .cloned()
            .collect()
    }

    /// Move focus to the next candidate, wrapping around.
    ///
    /// Focus that is not among the candidates (its panel was just hidden)
    /// moves to the first one. With no candidates nothing changes.
    pub fn next_panel(&mut self, layout: &LayoutManager, screen: &mut Screen) -> Option<String> {
        let candidates = self.candidates(layout);
        if candidates.is_empty() {
            return None;
        }

        let position = self
            .focused
            .as_deref()
            .and_then(|current| candidates.iter().position(|c| c == current));
        let next = match position {
            Some(i) => candidates[(i + 1) % candidates.len()].clone(),
            None => candidates[0].clone(),
        };

        self.transfer(layout, screen, &next);
        Some(next)
    }

    /// Focus whichever panel hosts the surface `view`.
    ///
    /// Surfaces that belong to no panel get display focus directly, with no
    /// lifecycle hooks and no change to the focus pointer.
    pub fn focus_by_name(&mut self, layout: &LayoutManager, screen: &mut Screen, view: &str) -> FocusChange {
        let Some(panel) = layout.panel_for_view(view) else {
            match screen.set_current_view(view) {
                Ok(surface) => surface.props.highlight = true,
                Err(err) => tracing::debug!(view, error = %err, "raw focus skipped"),
            }
            return FocusChange::Raw;
        };

        if !layout.is_panel_focusable(&panel) {
            tracing::debug!(panel = %panel, "refusing focus on hidden or collapsed panel");
            return FocusChange::Refused;
        }

        self.transfer(layout, screen, &panel);
        FocusChange::Panel(panel)
    }

    /// Move focus off a panel that is no longer visible; returns whether it moved
    pub fn reconcile(&mut self, layout: &LayoutManager, screen: &mut Screen) -> bool {
        let Some(current) = self.focused.clone() else {
            return false;
        };
        if layout.is_panel_focusable(&current) {
            return false;
        }

        if self.next_panel(layout, screen).is_none() {
            self.release(layout);
        }
        true
    }

    /// Re-point the display at the focused panel after its surface was recreated
    pub fn sync_display(&self, layout: &LayoutManager, screen: &mut Screen) {
        if screen.current_view().is_some() {
            return;
        }
        let Some(view) = self
            .focused
            .as_deref()
            .and_then(|name| layout.panel(name))
            .and_then(|p| p.surface_name().map(str::to_string))
        else {
            return;
        };
        if screen.set_current_view(&view).is_ok() {
            tracing::trace!(view = %view, "display focus restored");
        }
    }

    fn release(&mut self, layout: &LayoutManager) {
        if let Some(old) = self.focused.take() {
            if let Some(component) = layout.panel(&old).and_then(|p| p.component()) {
                component.borrow_mut().handle_focus_lost();
            }
        }
    }

    fn transfer(&mut self, layout: &LayoutManager, screen: &mut Screen, panel_name: &str) {
        let Some(component) = layout.panel(panel_name).and_then(|p| p.component()).cloned() else {
            return;
        };

        self.release(layout);

        let (view, props) = {
            let c = component.borrow();
            (c.view_name().to_string(), c.window_properties())
        };
        match screen.set_current_view(&view) {
            Ok(surface) => surface.props.highlight = props.highlight,
            // Surface appears on the next refresh; sync_display catches up
            Err(err) => tracing::trace!(view = %view, error = %err, "focus before materialization"),
        }
        screen.set_cursor_visible(props.editable);

        component.borrow_mut().handle_focus();
        self.focused = Some(panel_name.to_string());
        tracing::debug!(panel = panel_name, "focus moved");
    }
}
