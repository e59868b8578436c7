// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - The event loop (keyboard input, timer ticks, bus events)
// - Handing every frame to the in-memory screen for painting

pub mod app;
pub mod components;
pub mod focus;
pub mod layout;
pub mod screen;
pub mod scroll;
pub mod traits;

#[cfg(test)]
mod testing;

use crate::config::{Config, VERSION};
use crate::events::{EventBus, UiEvent};
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal even when the loop fails.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let (bus, mut event_rx) = EventBus::channel();
    let mut app =
        App::new(&config, bus.clone(), log_buffer).context("Failed to build layout")?;
    bus.publish(UiEvent::SystemMessage(format!(
        "panedeck {} - F1 for keys, /clear to clear",
        VERSION
    )))?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    tracing::info!("panedeck started");
    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Each pass lays out and paints the screen, then waits for whichever comes
/// first: terminal input, the redraw tick, or an event on the bus. Events
/// queued by key handlers are drained before the next paint.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        let size = terminal.size().context("Failed to read terminal size")?;
        if let Err(e) = app.tick(size.width, size.height) {
            tracing::warn!(error = %e, "layout refresh failed");
        }

        terminal
            .draw(|f| app.draw(f))
            .context("Failed to draw terminal")?;

        tokio::select! {
            input = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            } => {
                if let Some(input) = input {
                    handle_terminal_event(app, input);
                }
            }

            _ = tick_interval.tick() => {}

            Some(ui_event) = event_rx.recv() => {
                apply_event(app, ui_event);
            }
        }

        while let Ok(ui_event) = event_rx.try_recv() {
            apply_event(app, ui_event);
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Key presses go to the app; resizes are picked up by the next tick
fn handle_terminal_event(app: &mut App, input: Event) {
    if let Event::Key(key) = input {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Err(e) = app.handle_key(key) {
            tracing::warn!(error = %e, "key handler failed");
        }
    }
}

fn apply_event(app: &mut App, ui_event: UiEvent) {
    if let Err(e) = app.apply(ui_event) {
        tracing::warn!(error = %e, "ui event failed");
    }
}
