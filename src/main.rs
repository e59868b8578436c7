// panedeck - panel compositor and focus coordinator for the terminal
//
// Architecture:
// - Screen: in-memory grid of named surfaces, painted to ratatui each frame
// - Layout: a region tree resolved into panel rectangles on every tick
// - Focus: one focused panel at a time, repaired when panels disappear
// - Event bus: key handlers publish UiEvents, the loop applies them

mod cli;
mod config;
mod events;
mod logging;
mod tui;

use anyhow::Result;
use config::Config;
use logging::LogBuffer;

#[tokio::main]
async fn main() -> Result<()> {
    // config --show / --reset / --edit / --path exit early
    if cli::handle_cli() {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // Logs are captured into the buffer shown by the debug panel; stdout
    // belongs to the TUI. The guard must outlive the loop so file logs flush.
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, &log_buffer);

    tracing::debug!(
        right_panel = ?config.layout.right_panel,
        "configuration loaded"
    );

    tui::run_tui(config, log_buffer).await
}
