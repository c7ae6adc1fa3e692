// UI Components
pub mod button_bar;
pub mod dialog;
pub mod panel;
pub mod status_bar;
pub mod warning;

// Re-export components for convenience
pub use button_bar::ButtonBar;
pub use dialog::{
    ConfirmFocus, ConfirmState, Dialog, DialogGeometry, DialogStep, InputFocus, InputState,
};
pub use panel::{Panel, PanelStatus};
pub use status_bar::StatusBar;
pub use warning::WarningScreen;
