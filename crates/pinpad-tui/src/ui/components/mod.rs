//! Reusable UI components

pub mod activity_log;
pub mod indicator;
pub mod keypad;
pub mod status_bar;
