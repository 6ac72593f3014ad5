//! CLI module - Command-line interface for subway-facility
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

use crate::models::LineMatch;

pub use commands::{cmd_init_schema, cmd_lookup, cmd_recent, cmd_serve, cmd_stations};

/// subway-facility - Station facility lookup
/// Elevators, escalators, restrooms and other facilities on the subway network
#[derive(Parser)]
#[command(name = "subway-facility")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    #[command(alias = "web")]
    Serve,

    /// Look up facilities by station, line and kind
    #[command(alias = "l")]
    Lookup {
        /// Exact station name
        #[arg(short, long, default_value = "")]
        station: String,

        /// Line name
        #[arg(long, default_value = "")]
        line: String,

        /// Match the line name as a substring instead of exactly
        #[arg(long)]
        contains: bool,

        /// Facility kind ("전체" for all)
        #[arg(short, long, default_value = crate::constants::ALL_KINDS)]
        kind: String,
    },

    /// Show facilities changed in the last 24 hours
    #[command(alias = "history")]
    Recent,

    /// List station names
    #[command(alias = "ls")]
    Stations,

    /// Create default config file
    Init,

    /// Create the station_facilities table on a development database
    InitSchema,
}

impl Cli {
    /// `init` and bare help must work even when the config file is missing,
    /// unparseable or invalid.
    #[must_use]
    pub const fn needs_config(&self) -> bool {
        !matches!(self.command, None | Some(Commands::Init))
    }
}

impl Commands {
    #[must_use]
    pub const fn line_match(contains: bool) -> LineMatch {
        if contains {
            LineMatch::Contains
        } else {
            LineMatch::Exact
        }
    }
}
