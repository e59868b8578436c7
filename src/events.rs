// Events that flow from key handlers and background tasks into the UI loop
//
// Nothing outside the loop mutates panels, the layout manager or focus.
// Producers (key bindings, the log layer, timers) only publish a UiEvent;
// the loop drains the channel and applies each one in order.

use tokio::sync::mpsc;

/// Requests applied by the UI loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Tab: move focus to the next visible panel
    FocusNext,

    /// Focus the panel (or dialog) owning this surface
    FocusView(String),

    /// Show/hide the right-hand column
    ToggleRightPanel,

    /// Flip the right-hand column between debug and text-viewer
    SwitchRightPanelMode,

    /// Give the right-hand column most of the width (or take it back)
    ToggleZoom,

    /// Show keymap help in the text viewer, or hide it if already shown
    ToggleHelp,

    /// Open the quit confirmation dialog
    RequestQuit,

    /// Dismiss the open dialog, if any
    CloseDialog,

    /// Leave the application
    Quit,

    /// Enter pressed in the input panel
    SubmitInput,

    /// Answer from the inline `/clear` confirmation
    ConfirmClear(bool),

    /// Append a line to the messages panel
    SystemMessage(String),
}

/// Cloneable sending side of the UI event queue
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl EventBus {
    /// Create the bus and the receiver the UI loop drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn publish(&self, event: UiEvent) -> anyhow::Result<()> {
        self.tx
            .send(event)
            .map_err(|e| anyhow::anyhow!("UI loop is gone, dropped {:?}", e.0))
    }

    /// Key handler that publishes `event` every time it fires
    pub fn handler(&self, event: UiEvent) -> impl Fn() -> anyhow::Result<()> + 'static {
        let bus = self.clone();
        move || bus.publish(event.clone())
    }
}
