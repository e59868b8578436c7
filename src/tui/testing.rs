// Recording component shared by the layout and focus tests

use crate::tui::screen::{KeyBinding, Surface, WindowProperties};
use crate::tui::traits::{Component, Renderable, Visibility};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use std::cell::RefCell;
use std::rc::Rc;

pub type EventLog = Rc<RefCell<Vec<String>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Component that records every lifecycle call into a shared log
pub struct Probe {
    view: String,
    pub props: WindowProperties,
    pub keys: Vec<KeyCode>,
    /// `Some` exposes the visibility capability
    pub own_visibility: Option<bool>,
    pub renders: usize,
    log: EventLog,
}

impl Probe {
    pub fn new(view: &str, log: &EventLog) -> Self {
        Self {
            view: view.to_string(),
            props: WindowProperties::default(),
            keys: Vec::new(),
            own_visibility: None,
            renders: 0,
            log: log.clone(),
        }
    }

    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.keys.push(key);
        self
    }

    pub fn borderless(mut self) -> Self {
        self.props.bordered = false;
        self
    }

    pub fn editable(mut self) -> Self {
        self.props.editable = true;
        self
    }

    pub fn with_visibility(mut self) -> Self {
        self.own_visibility = Some(true);
        self
    }

    pub fn shared(self) -> Rc<RefCell<Probe>> {
        Rc::new(RefCell::new(self))
    }

    fn record(&self, what: &str) {
        self.log.borrow_mut().push(format!("{}:{}", what, self.view));
    }
}

impl Component for Probe {
    fn view_name(&self) -> &str {
        &self.view
    }

    fn window_properties(&self) -> WindowProperties {
        self.props
    }

    fn title(&self) -> String {
        self.view.to_uppercase()
    }

    fn keybindings(&self) -> Vec<KeyBinding> {
        self.keys
            .iter()
            .map(|&key| KeyBinding::new("", key, KeyModifiers::NONE, || Ok(())))
            .collect()
    }

    fn handle_focus(&mut self) {
        self.record("focus");
    }

    fn handle_focus_lost(&mut self) {
        self.record("lost");
    }

    fn attach(&mut self, _view: &str) {
        self.record("attach");
    }

    fn as_visibility(&self) -> Option<&dyn Visibility> {
        self.own_visibility.map(|_| self as &dyn Visibility)
    }

    fn as_visibility_mut(&mut self) -> Option<&mut dyn Visibility> {
        if self.own_visibility.is_some() {
            Some(self)
        } else {
            None
        }
    }

    fn as_renderable(&mut self) -> Option<&mut dyn Renderable> {
        Some(self)
    }
}

impl Visibility for Probe {
    fn set_visible(&mut self, visible: bool) {
        self.own_visibility = Some(visible);
    }

    fn is_visible(&self) -> bool {
        self.own_visibility.unwrap_or(true)
    }
}

impl Renderable for Probe {
    fn render(&mut self, surface: &mut Surface) -> Result<()> {
        self.renders += 1;
        surface.set_lines(vec![format!("{} #{}", self.view, self.renders)]);
        Ok(())
    }
}
