/// CLI argument definitions via clap derive.
use clap::{Parser, ValueEnum};

use crate::transit::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// bustimes — upcoming AC Transit arrivals for one or more stops.
#[derive(Debug, Parser)]
#[command(
    name = "bustimes",
    about = "Print upcoming AC Transit bus arrivals, grouped by route, for each stop",
    version,
    after_help = "Pass --no-title among the stop ids to hide the banner. \
                  Stops listed after it are not looked up."
)]
pub struct Cli {
    /// API access token, sent as the `token` query parameter.
    #[arg(long, env = "ACTRANSIT_TOKEN", hide_env_values = true, default_value = "")]
    pub token: String,

    /// Root of the AC Transit REST API.
    #[arg(long, env = "ACTRANSIT_BASE_URL", value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Output format. The JSON formats never print the banner.
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Log requests and their timing to stderr.
    #[arg(long)]
    pub debug: bool,

    /// Stop ids to look up, in order. Options must come before them.
    #[arg(value_name = "STOP_ID", allow_hyphen_values = true)]
    pub stops: Vec<String>,
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Banner, then a location line and bordered table per stop.
    #[default]
    Table,
    /// JSON array of all stops (pretty-printed).
    Json,
    /// Compact single-line JSON array.
    Compact,
    /// Newline-delimited JSON (one stop per line).
    Ndjson,
}
