//! CLI argument definitions and parsing structures
//!
//! This module defines the command-line interface structure using clap,
//! including the main `Cli` struct and the subcommand enum.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::LogFormat;

/// packcalc - pack allocation for order fulfilment
#[derive(Parser)]
#[command(name = "packcalc")]
#[command(about = "Work out which packs fulfil an order with the least overshoot")]
#[command(long_about = r#"
packcalc chooses how many packs of each size to ship for an order. It never
ships fewer items than ordered, ships as few extra items as possible, and among
equally small shipments uses the fewest packs.

EXAMPLES:
  # Allocate packs for an order using the default catalog
  packcalc calc 12001

  # Use a custom catalog and machine-readable output
  packcalc --pack-sizes 23,31,53 calc 500000 --json

  # Serve the HTTP endpoint
  PACK_SIZES=250,500,1000 packcalc serve --bind 127.0.0.1:8080

  # Show the effective configuration and where each value came from
  packcalc config

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > environment > config file > defaults
  Config file is discovered by searching upward from CWD for .packcalc/config.toml
  Use --config to specify an explicit config file path

ENVIRONMENT:
  PACK_SIZES               Comma-separated pack sizes, e.g. 250,500,1000
  PACKCALC_BIND            Listen address for `serve`
  PACKCALC_MAX_QUANTITY    Largest quantity accepted over HTTP
  PACKCALC_ALLOWED_ORIGIN  Browser origin granted CORS access
  RUST_LOG                 Overrides the log filter
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Comma-separated pack sizes (overrides PACK_SIZES and the config file)
    #[arg(long, global = true, value_name = "LIST")]
    pub pack_sizes: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format (compact or json)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Allocate packs for a single order quantity
    Calc {
        /// Number of items ordered (positive integer)
        #[arg(allow_hyphen_values = true)]
        quantity: String,

        /// Output the allocation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the allocation endpoint over HTTP
    Serve {
        /// Address to listen on (default: 0.0.0.0:8080)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,

        /// Largest quantity accepted per request (default: 10000000)
        #[arg(long, value_name = "N")]
        max_quantity: Option<i64>,

        /// Browser origin allowed to call the endpoint
        #[arg(long, value_name = "ORIGIN")]
        allowed_origin: Option<String>,
    },

    /// Show the effective configuration with source attribution
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Build the CLI command structure for testing
#[must_use]
pub fn build_cli() -> clap::Command {
    <Cli as clap::CommandFactory>::command()
}
