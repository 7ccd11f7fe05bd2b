//! Command line front end for dynver.
//!
//! The binary in `main.rs` only parses arguments, installs logging and
//! prints; everything else lives here so it can be tested in-process.

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Commands};
pub use commands::run;
pub use error::{CliError, Result};
