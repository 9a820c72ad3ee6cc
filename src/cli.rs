//! CLI argument definitions for pwexpiry.
//!
//! Uses `clap` derive macros to define the command-line interface.
//! Each subcommand has its own argument struct for type-safe parsing.
//!
//! Threshold flags are taken as strings on purpose: an unparsable
//! `--warn-days` falls back to the default exactly like a bad host
//! property would.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Decide whether a directory identity must change its password, based on
/// a GeneralizedTime expiration attribute such as krbPasswordExpiration.
#[derive(Debug, Parser)]
#[command(name = "pwexpiry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate a single GeneralizedTime expiration value.
    Check(CheckArgs),

    /// Run the expiry step against a JSON user record.
    Evaluate(EvaluateArgs),

    /// Show the step's registration metadata and configuration properties.
    Describe(DescribeArgs),
}

/// Arguments for the `check` subcommand.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// The expiration value, e.g. 20250904000000Z. If omitted, reads from stdin.
    pub value: Option<String>,

    /// Read the value from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub value_env: Option<String>,

    /// Warning window in days; invalid values fall back to 7.
    #[arg(long, value_name = "DAYS", allow_hyphen_values = true)]
    pub warn_days: Option<String>,

    /// Evaluate as of a different current time.
    ///
    /// Accepts relative expressions like "+7d", "-1h", "+30m", absolute
    /// RFC 3339 or GeneralizedTime timestamps, or Unix epoch seconds.
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub now: Option<String>,

    /// Output raw JSON without colors (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `evaluate` subcommand.
#[derive(Debug, clap::Args)]
pub struct EvaluateArgs {
    /// Path to a JSON user record (`null` means no identity is bound).
    #[arg(long, short = 'u', value_name = "FILE")]
    pub user: PathBuf,

    /// Host configuration property, e.g. warnThresholdDays=14. Repeatable.
    #[arg(long = "property", short = 'p', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Attribute holding the expiration value (overrides --property).
    #[arg(long, value_name = "NAME")]
    pub attribute: Option<String>,

    /// Warning window in days (overrides --property); invalid values fall back to 7.
    #[arg(long, value_name = "DAYS", allow_hyphen_values = true)]
    pub warn_days: Option<String>,

    /// Evaluate as of a different current time (see `check --help`).
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub now: Option<String>,

    /// Write the updated user record back to FILE.
    #[arg(long)]
    pub write: bool,

    /// Output raw JSON without colors (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `describe` subcommand.
#[derive(Debug, clap::Args)]
pub struct DescribeArgs {
    /// Output raw JSON without colors (machine-readable).
    #[arg(long)]
    pub json: bool,
}
