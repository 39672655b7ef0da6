//! Command line interface definition

use crate::models::RowsPerPage;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// buildboard - paginated table of buildserver builds
#[derive(Debug, Parser)]
#[command(name = "buildboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch build records from a buildserver and show them as a paginated table")]
#[command(long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./buildboard.json when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API host, overriding the configuration
    #[arg(long, env = "API_HOSTNAME", value_name = "URL")]
    pub api_host: Option<String>,

    /// Route of the build list, overriding the configuration
    #[arg(long, value_name = "PATH")]
    pub builds_route: Option<String>,

    /// Initial rows per page (a number or `all`)
    #[arg(long, value_name = "N|all")]
    pub rows_per_page: Option<RowsPerPage>,

    /// Initial page, starting at 1
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub page: Option<u64>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Keep the table open and read pagination commands from stdin
    #[arg(short, long)]
    pub interactive: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
