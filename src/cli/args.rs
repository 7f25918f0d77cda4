//! CLI argument definitions using clap
//!
//! Commands:
//! - rostersync contract --kind <kind>
//! - rostersync validate --kind <kind> --schema <path>
//! - rostersync decode --kind <kind> --input <path> [--pending-only] [--strict-roles]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::vocab::EntityKind;

/// rostersync - validate and decode club roster databases
#[derive(Parser, Debug)]
#[command(name = "rostersync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (database ids, log level)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the expected schema for an entity kind
    Contract {
        /// member, group or event
        #[arg(long)]
        kind: EntityKind,
    },

    /// Validate a saved live schema against its contract
    Validate {
        /// member, group or event
        #[arg(long)]
        kind: EntityKind,

        /// Path to the live schema JSON (database or data source object)
        #[arg(long)]
        schema: PathBuf,
    },

    /// Decode a saved query result into typed records
    Decode {
        /// member, group or event
        #[arg(long)]
        kind: EntityKind,

        /// Path to the query result JSON (`{"results": [...]}`)
        #[arg(long)]
        input: PathBuf,

        /// Only print records that still need to be pushed
        #[arg(long)]
        pending_only: bool,

        /// Fail on role labels outside the vocabulary instead of using Guest
        #[arg(long)]
        strict_roles: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
