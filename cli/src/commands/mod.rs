//! Command implementations

pub mod rolling_restart;
