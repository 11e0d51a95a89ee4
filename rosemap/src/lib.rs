//! Rosemap library
//!
//! Command implementations behind the `rosemap` binary.

pub mod cli;
pub mod commands;
pub mod utils;
