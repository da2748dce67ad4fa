/// Per-stop lookup: two requests, aggregate, render.
use std::io::Write;

use tracing::{debug, warn};

use crate::arrivals::StopReport;
use crate::cli::OutputCtx;
use crate::cli::output::{write_footer, write_stop};
use crate::errors::AppError;
use crate::transit::TransitClient;

/// Fetch predictions and the profile for one stop.
///
/// Never fails: request errors are recorded in the report so the caller can
/// show them and move on to the next stop.
pub async fn lookup_stop(client: &TransitClient, stop_id: &str, ctx: &OutputCtx) -> StopReport {
    let mut report = StopReport::new(stop_id);

    let t_predictions = ctx.timer("predictions");
    let predictions = client.predictions(stop_id).await;
    drop(t_predictions);
    match predictions {
        Ok(envelope) => report.add_predictions(&envelope),
        Err(err) => {
            warn!(stop_id, error = %err, "predictions lookup failed");
            report.add_error(err);
        }
    }

    let t_profile = ctx.timer("stop_profile");
    let profile = client.stop_profile(stop_id).await;
    drop(t_profile);
    match profile {
        Ok(profile) => report.add_profile(&profile),
        Err(err) => {
            warn!(stop_id, error = %err, "stop profile lookup failed");
            report.add_error(err);
        }
    }

    report
}

/// Look up each stop in order, writing each as it completes.
///
/// # Errors
///
/// Returns `AppError::StopsFailed` after all stops are written if any had a
/// failed request.
pub async fn run<W: Write>(
    stops: &[String],
    client: &TransitClient,
    ctx: &OutputCtx,
    out: &mut W,
) -> Result<(), AppError> {
    let mut collected = Vec::new();
    let mut failed = 0;

    for stop_id in stops {
        debug!(stop_id = stop_id.as_str(), "looking up stop");
        let report = lookup_stop(client, stop_id, ctx).await;
        if report.failed() {
            failed += 1;
        }
        if let Some(output) = write_stop(out, &report, ctx) {
            collected.push(output);
        }
    }

    write_footer(out, &collected, ctx);

    if failed > 0 {
        return Err(AppError::StopsFailed {
            failed,
            total: stops.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::cli::Cli;
    use crate::cli::args::OutputFormat;
    use crate::transit::client::Endpoint;
    use crate::transit::{TransitConfig, TransitError};

    const PREDICTIONS_PATH: &str = "/transit/actrealtime/prediction";

    fn ctx() -> OutputCtx {
        OutputCtx::new(OutputFormat::Ndjson, false, false)
    }

    fn client_for(server: &MockServer) -> TransitClient {
        let config = TransitConfig::new("tok").with_base_url(format!("{}/transit", server.uri()));
        TransitClient::new(&config).unwrap()
    }

    async fn mount_stop(server: &MockServer, stop_id: &str, predictions: &str, profile: &str) {
        Mock::given(method("GET"))
            .and(path(PREDICTIONS_PATH))
            .and(query_param("stpid", stop_id))
            .respond_with(ResponseTemplate::new(200).set_body_string(predictions))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/transit/stop/{stop_id}/profile")))
            .respond_with(ResponseTemplate::new(200).set_body_string(profile))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_lookup_groups_by_route() {
        let server = MockServer::start().await;
        mount_stop(
            &server,
            "1234",
            r#"{"bustime-response":{"prd":[
                {"rt":"10","des":"Downtown","prdtm":"2024-01-01 14:05"},
                {"rt":"10","des":"Downtown","prdtm":"2024-01-01 14:20"}
            ]}}"#,
            r#"{"PlaceDescription":"Main St & 1st Ave","Street":""}"#,
        )
        .await;

        let report = lookup_stop(&client_for(&server), "1234", &ctx()).await;
        assert!(!report.failed());
        assert_eq!(report.location, "Main St & 1st Ave");
        assert_eq!(
            report.arrivals.unwrap().rows(),
            vec![vec!["10 (Downtown)", "14:05", "14:20"]]
        );
    }

    #[tokio::test]
    async fn test_lookup_skips_malformed_record() {
        let server = MockServer::start().await;
        mount_stop(
            &server,
            "77",
            r#"{"bustime-response":{"prd":[
                {"rt":"10","des":"Downtown","prdtm":"garbage"},
                {"rt":"10","des":"Downtown","prdtm":"2024-01-01 14:20"}
            ]}}"#,
            r#"{"PlaceDescription":"","Street":"Broadway"}"#,
        )
        .await;

        let report = lookup_stop(&client_for(&server), "77", &ctx()).await;
        assert!(!report.failed());
        assert_eq!(report.location, "Broadway");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.arrivals.unwrap().rows(), vec![vec!["10 (Downtown)", "14:20"]]);
    }

    #[tokio::test]
    async fn test_lookup_records_failures_and_keeps_going() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PREDICTIONS_PATH))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/transit/stop/5/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"Street":"Oak St"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let report = lookup_stop(&client_for(&server), "5", &ctx()).await;
        assert!(report.failed());
        assert!(report.arrivals.is_none());
        assert_eq!(report.location, "Oak St");
        assert!(matches!(
            report.errors[0],
            TransitError::UpstreamStatus {
                endpoint: Endpoint::Predictions,
                status: 500
            }
        ));
    }

    #[tokio::test]
    async fn test_run_reports_failed_stops_after_all() {
        let server = MockServer::start().await;
        mount_stop(
            &server,
            "1",
            r#"{"bustime-response":{"prd":[]}}"#,
            r#"{"PlaceDescription":"A"}"#,
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/transit/stop/2/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let stops = vec!["2".to_owned(), "1".to_owned()];
        let result = run(&stops, &client_for(&server), &ctx(), &mut Vec::<u8>::new()).await;
        assert!(matches!(
            result,
            Err(AppError::StopsFailed { failed: 1, total: 2 })
        ));
    }

    #[tokio::test]
    async fn test_halt_on_flag_never_requests_later_stops() {
        let server = MockServer::start().await;
        mount_stop(
            &server,
            "1",
            r#"{"bustime-response":{"prd":[{"rt":"6","des":"Berkeley","prdtm":"2024-01-01 09:00"}]}}"#,
            r#"{"PlaceDescription":"Telegraph & 40th"}"#,
        )
        .await;
        Mock::given(method("GET"))
            .and(path(PREDICTIONS_PATH))
            .and(query_param("stpid", "2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/transit/stop/2/profile"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let base_url = format!("{}/transit", server.uri());
        let cli = Cli::try_parse_from([
            "bustimes",
            "--token",
            "tok",
            "--base-url",
            base_url.as_str(),
            "--output",
            "ndjson",
            "1",
            "--no-title",
            "2",
        ])
        .unwrap();
        let ctx = OutputCtx::new(cli.output, cli.json, cli.debug);

        crate::commands::run(&cli, &ctx, &mut Vec::<u8>::new()).await.unwrap();
        server.verify().await;
    }

    /// Run the whole pipeline with default output against `server`, capturing stdout.
    async fn run_default(server: &MockServer, stops: &[&str]) -> (Result<(), AppError>, String) {
        let base_url = format!("{}/transit", server.uri());
        let mut args = vec!["bustimes", "--token", "tok", "--base-url", base_url.as_str()];
        args.extend_from_slice(stops);
        let cli = Cli::try_parse_from(args).unwrap();
        let ctx = OutputCtx::new(cli.output, cli.json, cli.debug);
        let mut out = Vec::new();
        let result = crate::commands::run(&cli, &ctx, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_default_output_has_banner_and_table() {
        let server = MockServer::start().await;
        mount_stop(
            &server,
            "1234",
            r#"{"bustime-response":{"prd":[
                {"rt":"10","des":"Downtown","prdtm":"2024-01-01 14:05"},
                {"rt":"10","des":"Downtown","prdtm":"2024-01-01 14:20"}
            ]}}"#,
            r#"{"PlaceDescription":"Main St & 1st Ave"}"#,
        )
        .await;

        let (result, stdout) = run_default(&server, &["1234"]).await;
        result.unwrap();
        assert!(stdout.starts_with("\n\n ____"));
        let banner = stdout.find("|____/").unwrap();
        let location = stdout.find(" 🚏 Main St & 1st Ave").unwrap();
        let header = stdout.find("Route").unwrap();
        assert!(banner < location && location < header);
        assert!(stdout.contains("10 (Downtown)"));
        assert!(stdout.contains("14:05"));
        assert!(stdout.contains("14:20"));
        assert!(!stdout.trim_start().starts_with('['));
    }

    #[tokio::test]
    async fn test_no_title_suppresses_banner_in_default_output() {
        let server = MockServer::start().await;
        mount_stop(
            &server,
            "1",
            r#"{"bustime-response":{"prd":[{"rt":"6","des":"Berkeley","prdtm":"2024-01-01 09:00"}]}}"#,
            r#"{"PlaceDescription":"Telegraph & 40th"}"#,
        )
        .await;

        let (result, stdout) = run_default(&server, &["1", "--no-title", "2"]).await;
        result.unwrap();
        assert!(!stdout.contains("|____/"));
        assert!(stdout.contains(" 🚏 Telegraph & 40th"));
        assert!(stdout.contains("6 (Berkeley)"));
        assert_eq!(stdout.matches("🚏").count(), 1);
    }

    #[tokio::test]
    async fn test_failed_stop_still_prints_banner_and_location() {
        let cli = Cli::try_parse_from([
            "bustimes",
            "--token",
            "tok",
            "--base-url",
            "http://127.0.0.1:1/transit",
            "--timeout",
            "2",
            "1234",
        ])
        .unwrap();
        let ctx = OutputCtx::new(cli.output, cli.json, cli.debug);
        let mut out = Vec::new();
        let result = crate::commands::run(&cli, &ctx, &mut out).await;
        let stdout = String::from_utf8(out).unwrap();
        assert!(matches!(result, Err(AppError::StopsFailed { failed: 1, total: 1 })));
        assert!(stdout.contains("|____/"));
        assert!(stdout.contains(" 🚏 "));
        assert!(stdout.contains("error: predictions request failed"));
        assert!(!stdout.contains("token=tok"));
    }

    #[tokio::test]
    async fn test_flag_first_needs_no_token() {
        let cli = Cli::try_parse_from(["bustimes", "--output", "json", "--no-title", "1"]).unwrap();
        let ctx = OutputCtx::new(cli.output, cli.json, cli.debug);
        let mut out = Vec::new();
        assert!(crate::commands::run(&cli, &ctx, &mut out).await.is_ok());
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }

    #[tokio::test]
    async fn test_missing_token_is_configuration_error() {
        let cli = Cli::try_parse_from(["bustimes", "--token", "", "--output", "json", "1"]).unwrap();
        let ctx = OutputCtx::new(cli.output, cli.json, cli.debug);
        let err = crate::commands::run(&cli, &ctx, &mut Vec::<u8>::new()).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert_eq!(err.exit_code(), 2);
    }
}
