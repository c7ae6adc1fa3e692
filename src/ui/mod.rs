// UI Layer
pub mod classify;
pub mod components;
pub mod layout;
pub mod render;
pub mod theme;

// Re-export layout types for convenience
pub use layout::{ActivePanel, LayoutAreas, LayoutManager, LayoutMode, MIN_HEIGHT, MIN_WIDTH};

// Re-export components
pub use classify::{FileCategory, FileClassifier};
pub use components::{
    ButtonBar, ConfirmState, Dialog, DialogStep, InputFocus, InputState, Panel, PanelStatus,
    StatusBar, WarningScreen,
};
pub use theme::{Theme, ThemeManager};
