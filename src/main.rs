#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! bustimes — upcoming AC Transit arrivals for one or more stops.

mod arrivals;
mod cli;
mod commands;
mod errors;
mod transit;
mod types;

use std::io::IsTerminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, OutputCtx, write_error};
use types::ErrorOutput;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let ctx = OutputCtx::new(cli.output, cli.json, cli.debug);

    let mut stdout = std::io::stdout();
    match commands::run(&cli, &ctx, &mut stdout).await {
        Ok(()) => {}
        Err(err) => {
            let error_output = ErrorOutput::from_app_error(&err);
            write_error(&error_output, cli.output, cli.json);
            std::process::exit(err.exit_code());
        }
    }
}

/// Log to stderr so diagnostics never mix with the table on stdout.
/// `--debug` wins over `RUST_LOG`; otherwise `RUST_LOG` or `warn`.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("bustimes=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
