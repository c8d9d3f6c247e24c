//! # ep-cli
//!
//! Offline analysis of an assignment file, without a server or database.

mod args;
mod commands;

pub use args::{Cli, Command};
pub use commands::{exit_code, run, run_with};
