//! OmniCheck - Main Entry Point
//!
//! Parses arguments, runs the OmniChat catalogue once and prints the report.
//! Exits with status 1 when any endpoint failed for a reason other than
//! missing authentication.

use std::process::ExitCode;
use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use omnicheck::{Cli, OutputFormat, RunReport, TextReport};
use omnicheck_application::{ResolvedAuth, RunCatalogue};
use omnicheck_domain::catalogue::{KNOWN_ENDPOINT_COUNT, omnichat_catalogue};
use omnicheck_infrastructure::ReqwestHttpClient;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if cli.uses_legacy_token() {
        tracing::warn!("The --token flag is deprecated. Use --clerk or --bearer instead.");
    }

    let settings = cli.settings();
    let auth = ResolvedAuth::resolve(&settings, cli.credentials());
    let client = Arc::new(ReqwestHttpClient::new()?);
    let runner = RunCatalogue::new(client, auth).with_options(cli.validator_options());

    tracing::info!(
        base_url = %settings.base_url,
        "Starting omnicheck v{}",
        env!("CARGO_PKG_VERSION")
    );

    let started_at = Utc::now();
    let context = runner.execute(&omnichat_catalogue()).await?;
    let base_url = settings.base_url;
    let report = RunReport::new(base_url, started_at, context, KNOWN_ENDPOINT_COUNT);

    match cli.format {
        OutputFormat::Text => print!("{}", TextReport::new(&report, cli.verbose)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(if report.has_non_auth_failures {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
