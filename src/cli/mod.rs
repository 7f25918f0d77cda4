//! CLI module for rostersync
//!
//! Provides command-line interface for:
//! - contract: print the expected schema
//! - validate: check a saved live schema
//! - decode: decode a saved query result

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{contract, decode, run, run_cli, run_command, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_json_file, write_error, write_response, write_sync_error};
