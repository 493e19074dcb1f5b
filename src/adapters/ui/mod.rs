pub mod payload;
pub mod progress;
pub mod tui;
