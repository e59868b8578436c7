// Components module - the UI elements hosted by panels
//
// Panel-hosted components:
// - Messages: scrolling transcript
// - Input: single-line editor (swapped for a Confirmation while one is pending)
// - Debug / Text viewer: the two modes of the right-hand column
// - Status: frameless bar with left/center/right segments
//
// Dialogs are drawn over the layout and never live in a panel.

pub mod confirm;
pub mod debug;
pub mod dialog;
pub mod formatters;
pub mod input;
pub mod messages;
pub mod status;
pub mod text_viewer;

pub use confirm::Confirmation;
pub use debug::DebugPanel;
pub use dialog::{Dialog, DialogSize, QuitDialog};
pub use input::InputLine;
pub use messages::MessagesPanel;
pub use status::{StatusBar, StatusCounts};
pub use text_viewer::TextViewer;
