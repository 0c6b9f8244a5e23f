//! Screen implementations

pub mod help;
pub mod pin_entry;
