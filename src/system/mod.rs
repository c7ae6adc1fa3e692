// System Layer
pub mod filesystem;
pub mod terminal;
pub mod tree_ops;

pub use filesystem::FileSystem;
pub use terminal::{AmbientModes, CrosstermEvents, EventSource, ModeSnapshot, TerminalModes};
pub use tree_ops::TreeEngine;
