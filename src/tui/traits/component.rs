//! Core component contract - what every panel-hosted UI element provides
//!
//! A component never owns its surface. The panel hosting it materializes the
//! surface, applies the declared properties, installs the declared key
//! bindings, and calls back into the component for lifecycle hooks.
//!
//! Optional behaviour is exposed through capability accessors instead of a
//! wider trait: a component that can hide itself returns `Some` from
//! [`Component::as_visibility`], one that paints content returns `Some` from
//! [`Component::as_renderable`].

use super::interactive::Handled;
use crate::tui::screen::{KeyBinding, Surface, WindowProperties};
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a component
///
/// The owner that builds a component keeps its concrete `Rc<RefCell<T>>`;
/// panels hold the type-erased clone.
pub type ComponentRef = Rc<RefCell<dyn Component>>;

/// Wrap a concrete component for registration with the layout manager
pub fn component_ref<T: Component + 'static>(component: &Rc<RefCell<T>>) -> ComponentRef {
    component.clone()
}

/// Base contract for everything a panel can host
///
/// # Example
///
/// ```ignore
/// struct Clock { now: String }
///
/// impl Component for Clock {
///     fn view_name(&self) -> &str { "clock" }
///     fn title(&self) -> String { "Clock".into() }
///     fn as_renderable(&mut self) -> Option<&mut dyn Renderable> { Some(self) }
/// }
/// ```
pub trait Component {
    /// Unique surface identity across the whole screen
    fn view_name(&self) -> &str;

    fn window_properties(&self) -> WindowProperties {
        WindowProperties::default()
    }

    fn title(&self) -> String {
        String::new()
    }

    /// Bindings to install when the surface is created.
    ///
    /// An empty `view` means "scope to my surface".
    fn keybindings(&self) -> Vec<KeyBinding> {
        Vec::new()
    }

    fn handle_focus(&mut self) {}

    fn handle_focus_lost(&mut self) {}

    /// Called once per fresh surface creation
    fn attach(&mut self, _view: &str) {}

    /// Unbound keys pressed while this component has focus
    fn handle_key(&mut self, _key: KeyEvent) -> Handled {
        Handled::No
    }

    fn as_visibility(&self) -> Option<&dyn Visibility> {
        None
    }

    fn as_visibility_mut(&mut self) -> Option<&mut dyn Visibility> {
        None
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        None
    }
}

/// Components that track their own visibility on top of the panel's flag
pub trait Visibility {
    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;
}

/// Components that paint content into their surface
pub trait Renderable {
    fn render(&mut self, surface: &mut Surface) -> Result<()>;
}
