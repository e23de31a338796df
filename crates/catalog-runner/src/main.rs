use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

use catalog_runner::logging::init_logging;
use catalog_runner::webui::{self, WebUiState};
use catalog_runner::{Services, Suite};
use catalog_test_utils::{PgProductStore, Settings};

/// BDD harness for the product catalog API
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Run every feature once and exit
    #[arg(long, conflicts_with = "web_ui")]
    run_tests: bool,

    /// Serve the web UI for triggering runs
    #[arg(long)]
    web_ui: bool,

    /// Feature file or directory
    #[arg(long, default_value = "features")]
    features: PathBuf,

    /// Settings file (toml, yaml or json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Web UI listen address
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if !cli.run_tests && !cli.web_ui {
        println!("Nothing to do: pass --run-tests to run the features or --web-ui to start the web UI");
        return Ok(ExitCode::SUCCESS);
    }

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&settings.log_level)?;
    info!(
        features = %cli.features.display(),
        api_url = %settings.api.base_url,
        report_enabled = settings.report.enabled,
        "Configuration loaded"
    );
    for warning in settings.warnings() {
        warn!("{}", warning);
    }

    let store = PgProductStore::connect(&settings.db)
        .await
        .context("Failed to connect to the database")?;
    let report_path = settings
        .report
        .enabled
        .then(|| PathBuf::from(&settings.report.path));

    let services = Services::new(settings, Arc::new(store.clone()))
        .context("Failed to build the HTTP client")?;
    let suite = Suite::new(Arc::new(services)).context("Failed to register steps")?;

    let outcome = if cli.run_tests {
        run_once(&suite, &cli.features).await
    } else {
        let state = WebUiState::new(Arc::new(suite), cli.features.clone(), report_path);
        webui::serve(cli.listen, state)
            .await
            .map(|_| ExitCode::SUCCESS)
            .context("Web UI failed")
    };

    store.close().await;
    outcome
}

async fn run_once(suite: &Suite, features: &std::path::Path) -> Result<ExitCode> {
    let summary = suite.run(features).await.context("Test run failed")?;
    if summary.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
