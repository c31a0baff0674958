//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`bars`]: one bar per array slot, colored by the last step applied to it
//! - [`controls`]: algorithm menu, speed gauge and array readouts
//! - [`status`]: status bar with keybindings and playback state
//!
//! Each pane module exports a primary `render_*` function that takes the
//! frame, its area and a borrowed snapshot of the state it needs.

pub mod bars;
pub mod controls;
pub mod status;

pub use bars::render_bars_pane;
pub use controls::{render_controls_pane, ControlsRenderData};
pub use status::{render_status_bar, StatusRenderData};
