// TUI application state
//
// App is the composition root: it owns the screen, the layout manager, the
// focus coordinator and every component handle. Key handlers never touch
// any of these directly; they publish a UiEvent and `apply` performs the
// change on the loop thread, so a handler can never observe a half-torn-down
// dialog or panel.

use super::components::{
    Confirmation, DebugPanel, Dialog, InputLine, MessagesPanel, QuitDialog, StatusBar,
    StatusCounts, TextViewer,
};
use super::focus::{FocusChange, FocusCoordinator, FOCUS_ORDER};
use super::layout::{
    LayoutManager, RightPanelMode, PANEL_DEBUG, PANEL_INPUT, PANEL_MESSAGES, PANEL_STATUS,
    PANEL_TEXT_VIEWER, STATUS_CENTER, STATUS_LEFT, STATUS_RIGHT,
};
use super::screen::{KeyBinding, Screen, ScreenError};
use super::traits::{component_ref, Component, ComponentRef};
use crate::config::Config;
use crate::events::{EventBus, UiEvent};
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use std::cell::RefCell;
use std::rc::Rc;

/// Command that opens the inline clear confirmation
const CLEAR_COMMAND: &str = "/clear";

/// Main application state for the TUI
pub struct App {
    screen: Screen,
    layout: LayoutManager,
    focus: FocusCoordinator,
    bus: EventBus,
    log_buffer: LogBuffer,

    messages: Rc<RefCell<MessagesPanel>>,
    input: Rc<RefCell<InputLine>>,
    text_viewer: Rc<RefCell<TextViewer>>,
    status: Rc<RefCell<StatusBar>>,

    /// Open modal, if any. Cleared before the dialog is torn down.
    dialog: Option<Rc<RefCell<dyn Dialog>>>,
    /// An inline confirmation currently occupies the input panel
    confirming: bool,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, bus: EventBus, log_buffer: LogBuffer) -> Result<Self> {
        let mut screen = Screen::new();
        let mut layout = LayoutManager::new(config.layout.clone());

        let messages = Rc::new(RefCell::new(MessagesPanel::new()));
        let input = Rc::new(RefCell::new(InputLine::new(bus.clone())));
        let debug = Rc::new(RefCell::new(DebugPanel::new(log_buffer.clone())));
        let text_viewer = Rc::new(RefCell::new(TextViewer::help(bus.clone())));
        let status = Rc::new(RefCell::new(StatusBar::new()));

        layout.set_component(&mut screen, PANEL_MESSAGES, component_ref(&messages))?;
        layout.set_component(&mut screen, PANEL_INPUT, component_ref(&input))?;
        layout.set_component(&mut screen, PANEL_DEBUG, component_ref(&debug))?;
        layout.set_component(&mut screen, PANEL_TEXT_VIEWER, component_ref(&text_viewer))?;
        layout.set_component(&mut screen, PANEL_STATUS, component_ref(&status))?;
        {
            let bar = status.borrow();
            layout.add_sub_panel(&mut screen, PANEL_STATUS, STATUS_LEFT, component_ref(&bar.left()))?;
            layout.add_sub_panel(&mut screen, PANEL_STATUS, STATUS_CENTER, component_ref(&bar.center()))?;
            layout.add_sub_panel(&mut screen, PANEL_STATUS, STATUS_RIGHT, component_ref(&bar.right()))?;
        }

        let mut app = Self {
            screen,
            layout,
            focus: FocusCoordinator::new(),
            bus,
            log_buffer,
            messages,
            input,
            text_viewer,
            status,
            dialog: None,
            confirming: false,
            should_quit: false,
        };
        app.install_global_keybindings()?;
        // Surface appears on the first tick; sync_display points at it then
        app.focus.focus_by_name(&app.layout, &mut app.screen, PANEL_INPUT);
        Ok(app)
    }

    fn install_global_keybindings(&mut self) -> Result<()> {
        let bindings = [
            (KeyCode::Tab, KeyModifiers::NONE, UiEvent::FocusNext),
            (KeyCode::Char('d'), KeyModifiers::CONTROL, UiEvent::ToggleRightPanel),
            (KeyCode::Char('t'), KeyModifiers::CONTROL, UiEvent::SwitchRightPanelMode),
            (KeyCode::Char('z'), KeyModifiers::CONTROL, UiEvent::ToggleZoom),
            (KeyCode::Char('c'), KeyModifiers::CONTROL, UiEvent::RequestQuit),
            (KeyCode::Char('q'), KeyModifiers::CONTROL, UiEvent::RequestQuit),
            (KeyCode::F(1), KeyModifiers::NONE, UiEvent::ToggleHelp),
        ];
        // Alt+1.. jumps straight to a panel in tab order
        let jumps = ('1'..).zip(FOCUS_ORDER).map(|(digit, view)| {
            (
                KeyCode::Char(digit),
                KeyModifiers::ALT,
                UiEvent::FocusView(view.to_string()),
            )
        });
        for (key, modifiers, event) in bindings.into_iter().chain(jumps) {
            self.screen
                .set_keybinding(KeyBinding::global(key, modifiers, self.bus.handler(event)))
                .context("Failed to install global keybinding")?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn has_dialog(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    pub fn messages(&self) -> &Rc<RefCell<MessagesPanel>> {
        &self.messages
    }

    pub fn input(&self) -> &Rc<RefCell<InputLine>> {
        &self.input
    }

    // ─────────────────────────────────────────────────────────────────────
    // Loop hooks
    // ─────────────────────────────────────────────────────────────────────

    /// Lay out and render every panel for a `width` x `height` terminal
    pub fn tick(&mut self, width: u16, height: u16) -> Result<()> {
        self.update_status();
        self.layout
            .refresh(&mut self.screen, width, height)
            .context("Layout refresh failed")?;
        // A dialog holds display focus; panel focus is settled once it closes
        if self.dialog.is_none() {
            if self.focus.focused().is_some() {
                self.focus.reconcile(&self.layout, &mut self.screen);
            } else {
                self.focus.next_panel(&self.layout, &mut self.screen);
            }
        }
        self.focus.sync_display(&self.layout, &mut self.screen);
        if self.dialog.is_some() {
            self.paint_dialog(width, height)?;
        }
        Ok(())
    }

    pub fn draw(&self, f: &mut Frame) {
        self.screen.draw(f);
    }

    /// Route a key press: bound keys first, then the dialog or focused panel
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if let Some(handler) = self.screen.binding_for(&key) {
            return handler();
        }

        if let Some(dialog) = &self.dialog {
            dialog.borrow_mut().handle_key(key);
            return Ok(());
        }

        let Some(component) = self
            .focus
            .focused()
            .and_then(|name| self.layout.panel(name))
            .and_then(|panel| panel.component().cloned())
        else {
            return Ok(());
        };
        let handled = component.borrow_mut().handle_key(key);
        if !handled.was_handled() {
            tracing::trace!(key = ?key.code, "unhandled key");
        }
        Ok(())
    }

    /// Apply one queued event
    pub fn apply(&mut self, event: UiEvent) -> Result<()> {
        if self.dialog.is_some() && Self::blocked_by_dialog(&event) {
            tracing::debug!(?event, "ignored while a dialog is open");
            return Ok(());
        }
        tracing::debug!(?event, "applying UI event");
        match event {
            UiEvent::FocusNext => {
                self.focus.next_panel(&self.layout, &mut self.screen);
            }
            UiEvent::FocusView(view) => {
                if self.focus.focus_by_name(&self.layout, &mut self.screen, &view)
                    == FocusChange::Refused
                {
                    tracing::debug!(view = %view, "focus request refused");
                }
            }
            UiEvent::ToggleRightPanel => {
                let visible = self.layout.toggle_right_panel(&mut self.screen);
                tracing::info!(visible, "right panel toggled");
                self.focus.reconcile(&self.layout, &mut self.screen);
            }
            UiEvent::SwitchRightPanelMode => {
                let mode = self.layout.switch_right_panel_mode(&mut self.screen);
                tracing::info!(mode = %mode, "right panel mode switched");
                self.focus.reconcile(&self.layout, &mut self.screen);
            }
            UiEvent::ToggleZoom => {
                let zoomed = self.layout.toggle_zoom();
                tracing::info!(zoomed, "zoom toggled");
            }
            UiEvent::ToggleHelp => self.toggle_help(),
            UiEvent::RequestQuit => {
                let dialog = Rc::new(RefCell::new(QuitDialog::new(self.bus.clone())));
                self.show_dialog(dialog)?;
            }
            UiEvent::CloseDialog => self.close_dialog()?,
            UiEvent::Quit => self.should_quit = true,
            UiEvent::SubmitInput => self.submit_input()?,
            UiEvent::ConfirmClear(confirmed) => self.finish_clear(confirmed)?,
            UiEvent::SystemMessage(text) => self.messages.borrow_mut().push(&text),
        }
        Ok(())
    }

    /// Events that would move panels out from under an open dialog
    fn blocked_by_dialog(event: &UiEvent) -> bool {
        matches!(
            event,
            UiEvent::FocusNext
                | UiEvent::FocusView(_)
                | UiEvent::ToggleRightPanel
                | UiEvent::SwitchRightPanelMode
                | UiEvent::ToggleZoom
                | UiEvent::ToggleHelp
                | UiEvent::SubmitInput
        )
    }

    // ─────────────────────────────────────────────────────────────────────
    // Right-hand column
    // ─────────────────────────────────────────────────────────────────────

    /// Hide the column if it already shows help, otherwise show help in it
    fn toggle_help(&mut self) {
        if self.layout.is_right_panel_visible()
            && self.layout.right_panel_mode() == RightPanelMode::TextViewer
        {
            self.layout.hide_right_panel(&mut self.screen);
        } else {
            self.text_viewer.borrow_mut().show_help();
            self.layout
                .show_right_panel(&mut self.screen, RightPanelMode::TextViewer);
        }
        self.focus.reconcile(&self.layout, &mut self.screen);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input and inline confirmation
    // ─────────────────────────────────────────────────────────────────────

    fn submit_input(&mut self) -> Result<()> {
        if self.confirming {
            return Ok(());
        }
        let text = self.input.borrow_mut().take();
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        if text == CLEAR_COMMAND {
            let confirm = Rc::new(RefCell::new(Confirmation::clear_messages(self.bus.clone())));
            self.swap_input(component_ref(&confirm))?;
            self.confirming = true;
            self.status.borrow().set_awaiting_answer();
            return Ok(());
        }

        tracing::info!(chars = text.chars().count(), "input submitted");
        self.messages.borrow_mut().push(&format!("> {}", text));
        Ok(())
    }

    fn finish_clear(&mut self, confirmed: bool) -> Result<()> {
        if !self.confirming {
            return Ok(());
        }
        self.confirming = false;
        let input = component_ref(&self.input);
        self.swap_input(input)?;
        self.status.borrow().set_ready();

        if confirmed {
            self.messages.borrow_mut().clear();
            tracing::info!("messages cleared");
        }
        Ok(())
    }

    /// Put `component` in the input panel and keep focus on it
    fn swap_input(&mut self, component: ComponentRef) -> Result<()> {
        self.layout
            .set_component(&mut self.screen, PANEL_INPUT, component)
            .context("Failed to swap input component")?;
        if self.dialog.is_none() {
            self.focus
                .focus_by_name(&self.layout, &mut self.screen, PANEL_INPUT);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Dialogs
    // ─────────────────────────────────────────────────────────────────────

    /// Open `dialog` over the layout, replacing any open one
    pub fn show_dialog(&mut self, dialog: Rc<RefCell<dyn Dialog>>) -> Result<()> {
        self.close_dialog()?;

        let name = dialog.borrow().view_name().to_string();
        let (width, height) = self.layout.last_size();
        let bounds = dialog.borrow().size().centered(width, height);
        self.screen
            .set_view(&name, bounds)
            .with_context(|| format!("Failed to open dialog '{}'", name))?;

        self.layout.suspend_keybindings(&mut self.screen);
        for binding in dialog.borrow().keybindings() {
            let binding = if binding.view.is_empty() {
                binding.scoped_to(&name)
            } else {
                binding
            };
            self.screen.set_keybinding(binding)?;
        }

        self.dialog = Some(dialog);
        self.paint_dialog(width, height)?;
        self.focus.focus_by_name(&self.layout, &mut self.screen, &name);
        tracing::debug!(dialog = %name, "dialog opened");
        Ok(())
    }

    /// Dismiss the open dialog and give the keyboard back to the panels
    pub fn close_dialog(&mut self) -> Result<()> {
        // Cleared first: anything reached from teardown sees no dialog
        let Some(dialog) = self.dialog.take() else {
            return Ok(());
        };
        let name = dialog.borrow().view_name().to_string();

        self.screen.delete_keybindings(&name);
        match self.screen.delete_view(&name) {
            Ok(()) | Err(ScreenError::UnknownView(_)) => {}
            Err(e) => return Err(e.into()),
        }
        self.layout.restore_keybindings(&mut self.screen)?;
        self.focus
            .focus_by_name(&self.layout, &mut self.screen, PANEL_INPUT);
        tracing::debug!(dialog = %name, "dialog closed");
        Ok(())
    }

    /// Keep the dialog centered and repaint its content
    fn paint_dialog(&mut self, width: u16, height: u16) -> Result<()> {
        let Some(dialog) = self.dialog.clone() else {
            return Ok(());
        };
        let mut dialog = dialog.borrow_mut();
        let name = dialog.view_name().to_string();
        let bounds = dialog.size().centered(width, height);
        self.screen.set_view(&name, bounds)?;

        let title = dialog.title();
        let props = dialog.window_properties();
        let surface = self
            .screen
            .view_mut(&name)
            .ok_or_else(|| ScreenError::UnknownView(name.clone()))?;
        surface.title = title;
        surface.props = props;
        if let Some(renderable) = dialog.as_renderable() {
            renderable.render(surface)?;
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Status bar
    // ─────────────────────────────────────────────────────────────────────

    fn update_status(&mut self) {
        let status = self.status.borrow();
        status.set_counts(StatusCounts {
            messages: self.messages.borrow().len(),
            log_entries: self.log_buffer.len(),
        });

        let mut center = String::new();
        if self.layout.is_right_panel_visible() {
            center.push_str(match self.layout.right_panel_mode() {
                RightPanelMode::Debug => "Debug is ON",
                RightPanelMode::TextViewer => "Help",
            });
            if self.layout.is_zoomed() {
                center.push_str(" [zoom]");
            }
        }
        status.set_center(&center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::dialog::QUIT_DIALOG;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc::UnboundedReceiver;

    const W: u16 = 120;
    const H: u16 = 30;

    fn app() -> (App, UnboundedReceiver<UiEvent>) {
        let (bus, rx) = EventBus::channel();
        let mut app = App::new(&Config::default(), bus, LogBuffer::new()).unwrap();
        app.tick(W, H).unwrap();
        (app, rx)
    }

    /// Apply everything handlers queued, then refresh like the loop does
    fn pump(app: &mut App, rx: &mut UnboundedReceiver<UiEvent>) {
        while let Ok(event) = rx.try_recv() {
            app.apply(event).unwrap();
        }
        app.tick(W, H).unwrap();
    }

    fn press(app: &mut App, rx: &mut UnboundedReceiver<UiEvent>, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key(KeyEvent::new(code, modifiers)).unwrap();
        pump(app, rx);
    }

    fn type_line(app: &mut App, rx: &mut UnboundedReceiver<UiEvent>, text: &str) {
        for ch in text.chars() {
            press(app, rx, KeyCode::Char(ch), KeyModifiers::NONE);
        }
        press(app, rx, KeyCode::Enter, KeyModifiers::NONE);
    }

    #[test]
    fn starts_focused_on_input_with_cursor() {
        let (app, _rx) = app();
        assert_eq!(app.focused(), Some(PANEL_INPUT));
        assert_eq!(app.screen().current_view(), Some(PANEL_INPUT));
        assert!(app.screen().cursor_visible());
        assert!(!app.layout().is_right_panel_visible());
    }

    #[test]
    fn typed_lines_land_in_messages() {
        let (mut app, mut rx) = app();
        type_line(&mut app, &mut rx, "hello");
        assert_eq!(app.messages().borrow().len(), 1);
        assert_eq!(app.input().borrow().text(), "");
        let surface = app.screen().view(PANEL_MESSAGES).unwrap();
        assert_eq!(surface.lines(), ["> hello"]);
    }

    #[test]
    fn tab_cycles_visible_panels_only() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.focused(), Some(PANEL_MESSAGES));
        press(&mut app, &mut rx, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.focused(), Some(PANEL_INPUT));

        press(&mut app, &mut rx, KeyCode::Char('d'), KeyModifiers::CONTROL);
        for expected in [PANEL_MESSAGES, PANEL_DEBUG, PANEL_INPUT] {
            press(&mut app, &mut rx, KeyCode::Tab, KeyModifiers::NONE);
            assert_eq!(app.focused(), Some(expected));
        }
    }

    #[test]
    fn alt_digits_jump_to_visible_panels() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Char('2'), KeyModifiers::ALT);
        assert_eq!(app.focused(), Some(PANEL_MESSAGES));
        assert!(!app.screen().cursor_visible());

        // Hidden debug panel refuses focus
        press(&mut app, &mut rx, KeyCode::Char('3'), KeyModifiers::ALT);
        assert_eq!(app.focused(), Some(PANEL_MESSAGES));

        press(&mut app, &mut rx, KeyCode::Char('1'), KeyModifiers::ALT);
        assert_eq!(app.focused(), Some(PANEL_INPUT));
        assert_eq!(app.input().borrow().text(), "");
    }

    #[test]
    fn hiding_the_focused_right_panel_moves_focus() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Char('d'), KeyModifiers::CONTROL);
        press(&mut app, &mut rx, KeyCode::Char('3'), KeyModifiers::ALT);
        assert_eq!(app.focused(), Some(PANEL_DEBUG));

        press(&mut app, &mut rx, KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert!(app.screen().view(PANEL_DEBUG).is_none());
        assert_eq!(app.focused(), Some(PANEL_INPUT));
    }

    #[test]
    fn short_terminal_releases_squeezed_panels() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Char('d'), KeyModifiers::CONTROL);
        press(&mut app, &mut rx, KeyCode::Char('3'), KeyModifiers::ALT);
        assert_eq!(app.focused(), Some(PANEL_DEBUG));

        app.tick(W, 5).unwrap();
        assert!(app.screen().view(PANEL_DEBUG).is_none());
        assert!(app.screen().view(PANEL_MESSAGES).is_none());
        assert!(app.layout().is_panel_visible(PANEL_DEBUG));
        assert_eq!(app.focused(), Some(PANEL_INPUT));
        assert_eq!(app.screen().current_view(), Some(PANEL_INPUT));

        let backend = TestBackend::new(W, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let row: String = (0..W)
            .map(|x| terminal.backend().buffer()[(x, 0)].symbol().to_string())
            .collect();
        assert!(!row.contains("Debug"));

        app.tick(W, H).unwrap();
        assert!(app.screen().view(PANEL_DEBUG).is_some());
    }

    #[test]
    fn switching_modes_keeps_one_right_panel() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Char('d'), KeyModifiers::CONTROL);
        press(&mut app, &mut rx, KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert!(app.screen().view(PANEL_TEXT_VIEWER).is_some());
        assert!(app.screen().view(PANEL_DEBUG).is_none());
        assert_eq!(app.status.borrow().center().borrow().text(), "Help");
    }

    #[test]
    fn help_key_toggles_text_viewer() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::F(1), KeyModifiers::NONE);
        assert!(app.layout().is_panel_visible(PANEL_TEXT_VIEWER));

        // With debug showing, F1 switches to help instead of hiding
        app.apply(UiEvent::SwitchRightPanelMode).unwrap();
        assert!(app.layout().is_panel_visible(PANEL_DEBUG));
        press(&mut app, &mut rx, KeyCode::F(1), KeyModifiers::NONE);
        assert!(app.layout().is_panel_visible(PANEL_TEXT_VIEWER));

        press(&mut app, &mut rx, KeyCode::F(1), KeyModifiers::NONE);
        assert!(!app.layout().is_right_panel_visible());
    }

    #[test]
    fn zoom_widens_the_right_panel() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Char('d'), KeyModifiers::CONTROL);
        let before = app.layout().panel(PANEL_DEBUG).unwrap().rect().width;
        press(&mut app, &mut rx, KeyCode::Char('z'), KeyModifiers::CONTROL);
        let after = app.layout().panel(PANEL_DEBUG).unwrap().rect().width;
        assert!(after > before);
    }

    #[test]
    fn quit_dialog_owns_the_keyboard_until_closed() {
        let (mut app, mut rx) = app();
        let panel_bindings = app.screen().keybindings().len();

        press(&mut app, &mut rx, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.has_dialog());
        assert_eq!(app.screen().current_view(), Some(QUIT_DIALOG));
        // Input's Enter binding is suspended; only globals and the dialog's remain
        assert!(!app
            .screen()
            .keybindings()
            .iter()
            .any(|b| b.view == PANEL_INPUT));

        // Tab does not leave the dialog
        press(&mut app, &mut rx, KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.screen().current_view(), Some(QUIT_DIALOG));

        press(&mut app, &mut rx, KeyCode::Char('n'), KeyModifiers::NONE);
        assert!(!app.has_dialog());
        assert!(app.screen().view(QUIT_DIALOG).is_none());
        assert_eq!(app.screen().keybindings().len(), panel_bindings);
        assert_eq!(app.screen().current_view(), Some(PANEL_INPUT));
        assert!(!app.should_quit());
    }

    #[test]
    fn panel_jumps_are_ignored_under_a_dialog() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Char('c'), KeyModifiers::CONTROL);

        press(&mut app, &mut rx, KeyCode::Char('2'), KeyModifiers::ALT);
        assert_eq!(app.screen().current_view(), Some(QUIT_DIALOG));
        assert_eq!(app.focused(), Some(PANEL_INPUT));

        press(&mut app, &mut rx, KeyCode::Char('y'), KeyModifiers::NONE);
        assert!(app.should_quit());
    }

    #[test]
    fn confirming_the_dialog_quits() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Char('q'), KeyModifiers::CONTROL);
        press(&mut app, &mut rx, KeyCode::Char('Y'), KeyModifiers::SHIFT);
        assert!(app.should_quit());
    }

    #[test]
    fn reopening_a_dialog_replaces_it() {
        let (mut app, mut rx) = app();
        press(&mut app, &mut rx, KeyCode::Char('c'), KeyModifiers::CONTROL);
        press(&mut app, &mut rx, KeyCode::Char('c'), KeyModifiers::CONTROL);
        let dialog_bindings = app
            .screen()
            .keybindings()
            .iter()
            .filter(|b| b.view == QUIT_DIALOG)
            .count();
        assert_eq!(dialog_bindings, 7);
        assert_eq!(
            app.screen().view_names().filter(|n| *n == QUIT_DIALOG).count(),
            1
        );
    }

    #[test]
    fn clear_command_swaps_in_confirmation() {
        let (mut app, mut rx) = app();
        type_line(&mut app, &mut rx, "one");
        type_line(&mut app, &mut rx, "/clear");
        assert!(app.is_confirming());
        assert_eq!(
            app.screen().view(PANEL_INPUT).unwrap().title,
            " Clear all messages? "
        );
        assert_eq!(app.focused(), Some(PANEL_INPUT));
        assert_eq!(app.screen().current_view(), Some(PANEL_INPUT));

        // Typing is not routed to the confirmation
        press(&mut app, &mut rx, KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(app.input().borrow().text(), "");

        press(&mut app, &mut rx, KeyCode::Char('y'), KeyModifiers::NONE);
        assert!(!app.is_confirming());
        assert!(app.messages().borrow().is_empty());
        assert_eq!(app.screen().view(PANEL_INPUT).unwrap().title, " Input ");
        assert_eq!(app.screen().current_view(), Some(PANEL_INPUT));
    }

    #[test]
    fn declining_clear_keeps_messages() {
        let (mut app, mut rx) = app();
        type_line(&mut app, &mut rx, "keep me");
        type_line(&mut app, &mut rx, "/clear");
        press(&mut app, &mut rx, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.is_confirming());
        assert_eq!(app.messages().borrow().len(), 1);

        // Enter submits again once the input is back
        type_line(&mut app, &mut rx, "again");
        assert_eq!(app.messages().borrow().len(), 2);
    }

    #[test]
    fn status_bar_reports_counts() {
        let (mut app, mut rx) = app();
        type_line(&mut app, &mut rx, "a");
        let right = app.screen().view(STATUS_RIGHT).unwrap();
        assert!(right.lines()[0].contains("Msgs: 1"));
        let left = app.screen().view(STATUS_LEFT).unwrap();
        assert_eq!(left.lines()[0], " Ready");
    }

    #[test]
    fn draws_to_a_terminal() {
        let (app, _rx) = app();
        let mut terminal = Terminal::new(TestBackend::new(W, H)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let bottom: String = (0..6).map(|x| buffer[(x, H - 1)].symbol().to_string()).collect();
        assert_eq!(bottom, " Ready");
    }
}
