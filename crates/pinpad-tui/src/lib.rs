//! PinPad TUI
//!
//! Terminal host for the [`pinpad_core`] widget. The library half holds the
//! application state, the terminal surface and the renderer so they can be
//! driven without a real terminal.

pub mod app;
pub mod cli;
pub mod surface;
pub mod ui;

pub use app::App;
