// Panel - binds one component to one screen surface
//
// Lifecycle:
// - geometry is recorded on every refresh, even while no surface exists
// - the surface is created lazily (create_or_update_view / render)
// - key bindings are installed only when a surface is freshly created
// - hiding tears the surface down; showing again starts a new lifetime
// - a refresh that leaves no room collapses the panel: the surface goes,
//   visibility stays, and the next placement with area starts a new lifetime
//
// The surface handle is `Some` only while the panel is visible and has been
// materialized since it last became visible.

use super::LayoutError;
use crate::tui::screen::{Bounds, KeyBinding, Screen, ScreenError, SurfaceChange, WindowProperties, FRAME_INSET};
use crate::tui::traits::ComponentRef;
use ratatui::layout::Rect;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

pub struct Panel {
    name: String,
    component: Option<ComponentRef>,
    rect: Rect,
    /// Name of the materialized surface
    surface: Option<String>,
    visible: bool,
    /// Visible, but the last refresh gave it no area
    collapsed: bool,
    bindings_installed: bool,
    /// Set while a modal dialog owns the keyboard
    bindings_suspended: bool,
    sub_panels: HashMap<String, Panel>,
}

impl Panel {
    pub fn new(name: impl Into<String>, component: ComponentRef) -> Self {
        Self {
            name: name.into(),
            component: Some(component),
            rect: Rect::default(),
            surface: None,
            visible: true,
            collapsed: false,
            bindings_installed: false,
            bindings_suspended: false,
            sub_panels: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn component(&self) -> Option<&ComponentRef> {
        self.component.as_ref()
    }

    /// Surface identity of the bound component
    pub fn view_name(&self) -> Option<String> {
        self.component
            .as_ref()
            .map(|c| c.borrow().view_name().to_string())
    }

    /// Last geometry assigned by the layout manager
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn surface_name(&self) -> Option<&str> {
        self.surface.as_deref()
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn bindings_installed(&self) -> bool {
        self.bindings_installed
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Release the surface (and sub-panel surfaces) while there is no room.
    /// The visibility flag is untouched.
    pub fn collapse(&mut self, screen: &mut Screen) {
        self.rect = Rect::default();
        self.collapsed = true;
        self.teardown(screen);
        for child in self.sub_panels.values_mut() {
            child.collapse(screen);
        }
    }

    /// Record new geometry and resize any live surfaces to match.
    ///
    /// Sub-panels are re-synced to their own stored geometry; the layout
    /// manager assigns their rectangles separately.
    pub fn update_dimensions(&mut self, screen: &mut Screen, rect: Rect) -> Result<(), LayoutError> {
        self.rect = rect;
        if !rect.is_empty() {
            self.collapsed = false;
        }
        self.sync_surface(screen)?;
        for child in self.sub_panels.values() {
            child.sync_surface(screen)?;
        }
        Ok(())
    }

    fn sync_surface(&self, screen: &mut Screen) -> Result<(), LayoutError> {
        let (Some(surface), Some(component)) = (&self.surface, &self.component) else {
            return Ok(());
        };
        let props = component.borrow().window_properties();
        screen.set_view(surface, self.surface_bounds(&props))?;
        Ok(())
    }

    fn surface_bounds(&self, props: &WindowProperties) -> Bounds {
        let bounds = Bounds::from_rect(self.rect);
        if props.bordered {
            bounds
        } else {
            bounds.expand(FRAME_INSET)
        }
    }

    /// Ensure a surface exists at the current geometry.
    ///
    /// Display properties are re-applied every call. Attaching the component
    /// and installing its bindings happen only when the surface is new.
    /// Returns `None` when the panel is hidden or has no component.
    pub fn create_or_update_view(&mut self, screen: &mut Screen) -> Result<Option<SurfaceChange>, LayoutError> {
        if !self.visible {
            return Ok(None);
        }
        let Some(component) = self.component.clone() else {
            return Ok(None);
        };

        let (view, props, title) = {
            let c = component.borrow();
            (c.view_name().to_string(), c.window_properties(), c.title())
        };

        let change = screen.set_view(&view, self.surface_bounds(&props))?;
        if let Some(surface) = screen.view_mut(&view) {
            surface.title = title;
            surface.props = props;
        }
        self.surface = Some(view.clone());

        if change == SurfaceChange::Created {
            tracing::debug!(panel = %self.name, view = %view, "surface materialized");
            component.borrow_mut().attach(&view);
            self.bindings_installed = false;
            if !self.bindings_suspended {
                self.install_keybindings(screen)?;
            }
        }

        Ok(Some(change))
    }

    /// Render this panel and its sub-panels
    pub fn render(&mut self, screen: &mut Screen) -> Result<(), LayoutError> {
        self.render_content(screen)?;

        let mut children: Vec<&mut Panel> = self.sub_panels.values_mut().collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        for child in children {
            // Not yet placed by a refresh
            if child.rect.is_empty() {
                continue;
            }
            child.render(screen)?;
        }
        Ok(())
    }

    /// Render this panel only, materializing the surface on demand
    pub fn render_content(&mut self, screen: &mut Screen) -> Result<(), LayoutError> {
        if !self.visible {
            return Ok(());
        }
        let Some(component) = self.component.clone() else {
            return Ok(());
        };

        if self.surface.is_none() {
            self.create_or_update_view(screen)?;
        }
        let Some(view) = self.surface.clone() else {
            return Ok(());
        };

        let mut guard = component.borrow_mut();
        if let Some(renderable) = guard.as_renderable() {
            let surface = screen
                .view_mut(&view)
                .ok_or_else(|| ScreenError::UnknownView(view.clone()))?;
            renderable
                .render(surface)
                .map_err(|source| LayoutError::Render { view, source })?;
        }
        Ok(())
    }

    /// Show or hide this panel and its sub-panels.
    ///
    /// Hiding releases the surface; showing only clears the flag so the
    /// surface comes back on the next refresh.
    pub fn set_visible(&mut self, screen: &mut Screen, visible: bool) {
        self.visible = visible;
        if !visible {
            self.teardown(screen);
        }

        if let Some(component) = &self.component {
            if let Some(v) = component.borrow_mut().as_visibility_mut() {
                v.set_visible(visible);
            }
        }

        for child in self.sub_panels.values_mut() {
            child.set_visible(screen, visible);
        }
    }

    /// Panel flag, narrowed by the component's own visibility if it has one
    pub fn is_visible(&self) -> bool {
        if !self.visible {
            return false;
        }
        self.component
            .as_ref()
            .and_then(|c| c.borrow().as_visibility().map(|v| v.is_visible()))
            .unwrap_or(true)
    }

    pub fn add_sub_panel(&mut self, name: impl Into<String>, component: ComponentRef) -> &mut Panel {
        let name = name.into();
        let mut child = Panel::new(name.clone(), component);
        child.visible = self.visible;
        child.bindings_suspended = self.bindings_suspended;
        match self.sub_panels.entry(name) {
            Entry::Occupied(mut slot) => {
                slot.insert(child);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(child),
        }
    }

    pub fn sub_panel(&self, name: &str) -> Option<&Panel> {
        self.sub_panels.get(name)
    }

    pub fn sub_panel_mut(&mut self, name: &str) -> Option<&mut Panel> {
        self.sub_panels.get_mut(name)
    }

    pub fn sub_panels(&self) -> impl Iterator<Item = &Panel> {
        self.sub_panels.values()
    }

    /// Replace the bound component.
    ///
    /// The old component's bindings and surface go away unconditionally. A
    /// panel that is visible and already placed gets a new surface right
    /// away, with the new component's bindings installed on it; otherwise
    /// the surface appears on the next refresh.
    pub fn swap_component(&mut self, screen: &mut Screen, component: ComponentRef) -> Result<Option<SurfaceChange>, LayoutError> {
        self.teardown(screen);
        self.component = Some(component);

        if !self.visible || self.rect.is_empty() {
            return Ok(None);
        }

        let change = self.create_or_update_view(screen)?;
        if self.surface.is_some() && !self.bindings_installed && !self.bindings_suspended {
            self.install_keybindings(screen)?;
        }
        tracing::debug!(panel = %self.name, "component swapped");
        Ok(change)
    }

    /// Drop bindings (this panel and sub-panels) until `restore_keybindings`
    pub fn suspend_keybindings(&mut self, screen: &mut Screen) {
        self.bindings_suspended = true;
        self.remove_keybindings(screen);
        for child in self.sub_panels.values_mut() {
            child.suspend_keybindings(screen);
        }
    }

    pub fn restore_keybindings(&mut self, screen: &mut Screen) -> Result<(), LayoutError> {
        self.bindings_suspended = false;
        if self.surface.is_some() && !self.bindings_installed {
            self.install_keybindings(screen)?;
        }
        for child in self.sub_panels.values_mut() {
            child.restore_keybindings(screen)?;
        }
        Ok(())
    }

    /// Component bindings with unscoped entries bound to the surface
    fn scoped_bindings(&self) -> Vec<KeyBinding> {
        let (Some(component), Some(surface)) = (&self.component, &self.surface) else {
            return Vec::new();
        };
        component
            .borrow()
            .keybindings()
            .into_iter()
            .map(|kb| if kb.view.is_empty() { kb.scoped_to(surface) } else { kb })
            .collect()
    }

    fn install_keybindings(&mut self, screen: &mut Screen) -> Result<(), LayoutError> {
        for binding in self.scoped_bindings() {
            screen.set_keybinding(binding)?;
        }
        self.bindings_installed = true;
        Ok(())
    }

    fn remove_keybindings(&mut self, screen: &mut Screen) {
        if !self.bindings_installed {
            return;
        }
        for binding in self.scoped_bindings() {
            screen.delete_keybinding(&binding.view, binding.key, binding.modifiers);
        }
        self.bindings_installed = false;
    }

    fn teardown(&mut self, screen: &mut Screen) {
        self.remove_keybindings(screen);
        let Some(view) = self.surface.take() else {
            return;
        };
        if let Err(err) = screen.delete_view(&view) {
            tracing::debug!(panel = %self.name, error = %err, "surface already released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::testing::{event_log, Probe};
    use crate::tui::traits::component_ref;
    use crossterm::event::KeyCode;

    fn placed(panel: &mut Panel, screen: &mut Screen) {
        panel
            .update_dimensions(screen, Rect::new(0, 0, 40, 10))
            .unwrap();
    }

    #[test]
    fn fresh_creation_installs_bindings_once() {
        let log = event_log();
        let probe = Probe::new("messages", &log).with_key(KeyCode::Enter).shared();
        let mut screen = Screen::new();
        let mut panel = Panel::new("messages", component_ref(&probe));
        placed(&mut panel, &mut screen);

        assert_eq!(
            panel.create_or_update_view(&mut screen).unwrap(),
            Some(SurfaceChange::Created)
        );
        assert_eq!(
            panel.create_or_update_view(&mut screen).unwrap(),
            Some(SurfaceChange::Updated)
        );

        assert_eq!(screen.stats().bindings_installed, 1);
        assert_eq!(screen.keybindings()[0].view, "messages");
        assert_eq!(*log.borrow(), vec!["attach:messages"]);

        let surface = screen.view("messages").unwrap();
        assert_eq!(surface.title, "MESSAGES");
        assert_eq!(surface.bounds(), Bounds::new(0, 0, 40, 10));
    }

    #[test]
    fn borderless_surface_is_expanded_by_frame_inset() {
        let log = event_log();
        let probe = Probe::new("status-left", &log).borderless().shared();
        let mut screen = Screen::new();
        let mut panel = Panel::new("status-left", component_ref(&probe));
        panel
            .update_dimensions(&mut screen, Rect::new(0, 23, 30, 1))
            .unwrap();
        panel.create_or_update_view(&mut screen).unwrap();

        let surface = screen.view("status-left").unwrap();
        assert_eq!(surface.bounds(), Bounds::new(-1, 22, 31, 25));
        assert_eq!(surface.inner_height(), 1);
        assert_eq!(surface.inner_width(), 30);
    }

    #[test]
    fn update_dimensions_without_surface_only_records_geometry() {
        let log = event_log();
        let probe = Probe::new("input", &log).shared();
        let mut screen = Screen::new();
        let mut panel = Panel::new("input", component_ref(&probe));

        panel
            .update_dimensions(&mut screen, Rect::new(0, 20, 80, 4))
            .unwrap();
        assert_eq!(panel.rect(), Rect::new(0, 20, 80, 4));
        assert!(!panel.has_surface());
        assert_eq!(screen.stats().created, 0);

        panel.create_or_update_view(&mut screen).unwrap();
        panel
            .update_dimensions(&mut screen, Rect::new(0, 18, 80, 4))
            .unwrap();
        assert_eq!(screen.view("input").unwrap().bounds().y0, 18);
        assert_eq!(screen.stats().created, 1);
    }

    #[test]
    fn collapse_releases_surface_but_keeps_visibility() {
        let log = event_log();
        let mut screen = Screen::new();
        let probe = Probe::new("debug", &log).with_key(KeyCode::Enter).shared();
        let mut panel = Panel::new("debug", component_ref(&probe));
        placed(&mut panel, &mut screen);
        panel.create_or_update_view(&mut screen).unwrap();
        assert_eq!(screen.stats().bindings_installed, 1);

        panel.collapse(&mut screen);
        assert!(panel.is_collapsed());
        assert!(panel.is_visible());
        assert!(!panel.has_surface());
        assert!(screen.view("debug").is_none());
        assert!(screen.keybindings().is_empty());

        placed(&mut panel, &mut screen);
        assert!(!panel.is_collapsed());
        assert_eq!(
            panel.create_or_update_view(&mut screen).unwrap(),
            Some(SurfaceChange::Created)
        );
        assert_eq!(screen.stats().bindings_installed, 2);
    }

    #[test]
    fn hide_show_cycles_install_bindings_per_creation() {
        let log = event_log();
        let probe = Probe::new("debug", &log).with_key(KeyCode::Char('c')).shared();
        let mut screen = Screen::new();
        let mut panel = Panel::new("debug", component_ref(&probe));
        placed(&mut panel, &mut screen);

        for cycle in 1..=2 {
            panel.render(&mut screen).unwrap();
            panel.render(&mut screen).unwrap();
            assert_eq!(screen.stats().created, cycle);
            assert_eq!(screen.stats().bindings_installed, cycle);

            panel.set_visible(&mut screen, false);
            assert!(!panel.has_surface());
            assert!(screen.view("debug").is_none());
            assert!(screen.keybindings().is_empty());

            // Hidden render is a no-op
            panel.render(&mut screen).unwrap();
            assert!(screen.view("debug").is_none());

            panel.set_visible(&mut screen, true);
            assert!(!panel.has_surface());
        }
    }

    #[test]
    fn component_visibility_narrows_panel_flag() {
        let log = event_log();
        let probe = Probe::new("debug", &log).with_visibility().shared();
        let mut screen = Screen::new();
        let mut panel = Panel::new("debug", component_ref(&probe));

        assert!(panel.is_visible());
        probe.borrow_mut().own_visibility = Some(false);
        assert!(!panel.is_visible());

        // Panel flag is forwarded to the component
        panel.set_visible(&mut screen, true);
        assert_eq!(probe.borrow().own_visibility, Some(true));
        panel.set_visible(&mut screen, false);
        assert_eq!(probe.borrow().own_visibility, Some(false));
        assert!(!panel.is_visible());
    }

    #[test]
    fn render_materializes_and_paints() {
        let log = event_log();
        let probe = Probe::new("messages", &log).shared();
        let mut screen = Screen::new();
        let mut panel = Panel::new("messages", component_ref(&probe));
        placed(&mut panel, &mut screen);

        panel.render(&mut screen).unwrap();
        assert!(panel.has_surface());
        assert_eq!(screen.view("messages").unwrap().lines(), ["messages #1"]);
    }

    #[test]
    fn swap_replaces_bindings_and_recreates_surface() {
        let log = event_log();
        let input = Probe::new("input", &log).with_key(KeyCode::Enter).shared();
        let confirm = Probe::new("input", &log)
            .with_key(KeyCode::Char('y'))
            .with_key(KeyCode::Char('n'))
            .shared();
        let mut screen = Screen::new();
        let mut panel = Panel::new("input", component_ref(&input));
        placed(&mut panel, &mut screen);
        panel.create_or_update_view(&mut screen).unwrap();

        let change = panel
            .swap_component(&mut screen, component_ref(&confirm))
            .unwrap();

        assert_eq!(change, Some(SurfaceChange::Created));
        let keys: Vec<KeyCode> = screen.keybindings().iter().map(|b| b.key).collect();
        assert_eq!(keys, vec![KeyCode::Char('y'), KeyCode::Char('n')]);
        assert_eq!(screen.stats().deleted, 1);
        assert_eq!(*log.borrow(), vec!["attach:input", "attach:input"]);

        // And back again
        panel
            .swap_component(&mut screen, component_ref(&input))
            .unwrap();
        let keys: Vec<KeyCode> = screen.keybindings().iter().map(|b| b.key).collect();
        assert_eq!(keys, vec![KeyCode::Enter]);
    }

    #[test]
    fn swap_on_unplaced_panel_defers_surface() {
        let log = event_log();
        let a = Probe::new("input", &log).with_key(KeyCode::Enter).shared();
        let b = Probe::new("input", &log).with_key(KeyCode::Esc).shared();
        let mut screen = Screen::new();
        let mut panel = Panel::new("input", component_ref(&a));

        assert_eq!(panel.swap_component(&mut screen, component_ref(&b)).unwrap(), None);
        assert!(screen.keybindings().is_empty());

        placed(&mut panel, &mut screen);
        panel.create_or_update_view(&mut screen).unwrap();
        assert_eq!(screen.keybindings()[0].key, KeyCode::Esc);
    }

    #[test]
    fn sub_panels_share_visibility_and_resync() {
        let log = event_log();
        let status = Probe::new("status", &log).borderless().shared();
        let left = Probe::new("status-left", &log).borderless().shared();
        let mut screen = Screen::new();
        let mut panel = Panel::new("status", component_ref(&status));
        panel.add_sub_panel("status-left", component_ref(&left));

        panel
            .update_dimensions(&mut screen, Rect::new(0, 23, 80, 1))
            .unwrap();
        panel
            .sub_panel_mut("status-left")
            .unwrap()
            .update_dimensions(&mut screen, Rect::new(0, 23, 40, 1))
            .unwrap();
        panel.render(&mut screen).unwrap();
        assert!(screen.view("status").is_some());
        assert!(screen.view("status-left").is_some());

        // Parent resize re-syncs the child surface to its stored geometry
        let before = screen.stats().updated;
        panel
            .update_dimensions(&mut screen, Rect::new(0, 22, 80, 1))
            .unwrap();
        assert_eq!(screen.stats().updated, before + 2);

        panel.set_visible(&mut screen, false);
        assert!(screen.view("status-left").is_none());
        assert!(!panel.sub_panel("status-left").unwrap().is_visible());
    }

    #[test]
    fn suspended_bindings_come_back_once() {
        let log = event_log();
        let probe = Probe::new("input", &log).with_key(KeyCode::Enter).shared();
        let mut screen = Screen::new();
        let mut panel = Panel::new("input", component_ref(&probe));
        placed(&mut panel, &mut screen);
        panel.create_or_update_view(&mut screen).unwrap();

        panel.suspend_keybindings(&mut screen);
        assert!(screen.keybindings().is_empty());

        // Recreation while suspended does not install
        panel.set_visible(&mut screen, false);
        panel.set_visible(&mut screen, true);
        panel.create_or_update_view(&mut screen).unwrap();
        assert!(screen.keybindings().is_empty());

        panel.restore_keybindings(&mut screen).unwrap();
        panel.restore_keybindings(&mut screen).unwrap();
        assert_eq!(screen.keybindings().len(), 1);
    }
}
