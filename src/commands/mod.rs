/// Run pipeline: scan arguments, build the client, look up each stop.
pub mod arrivals;

use std::io::Write;

use crate::cli::output::{write_banner, write_footer};
use crate::cli::{Cli, Invocation, OutputCtx};
use crate::errors::AppError;
use crate::transit::{TransitClient, TransitConfig};

/// Run one invocation of `bustimes`.
///
/// The banner is decided before anything else, so a bad token still shows it.
///
/// # Errors
///
/// Returns `AppError::Configuration` or `AppError::Client` if no request can
/// be made, `AppError::StopsFailed` if some stops had request failures.
pub async fn run<W: Write>(cli: &Cli, ctx: &OutputCtx, out: &mut W) -> Result<(), AppError> {
    let invocation = Invocation::scan(&cli.stops);
    write_banner(out, invocation.show_banner, ctx);

    if invocation.stops.is_empty() {
        write_footer(out, &[], ctx);
        return Ok(());
    }

    let config = TransitConfig::new(cli.token.as_str())
        .with_base_url(cli.base_url.as_str())
        .with_timeout(cli.timeout);
    config.validate().map_err(AppError::Configuration)?;
    let client = TransitClient::new(&config)?;

    arrivals::run(&invocation.stops, &client, ctx, out).await
}
