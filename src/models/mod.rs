// Data Models
pub mod dir_entry;
pub mod operation;
pub mod panel_state;

pub use dir_entry::{DirEntry, EntryKind};
pub use operation::Operation;
pub use panel_state::PanelState;
