//! A complete run: discover features, execute them, write the report.

use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use catalog_test_utils::config::ReportSettings;

use crate::error::RunnerError;
use crate::report::ReportWriter;
use crate::runner::{discover_features, load_feature, ScenarioRunner};
use crate::steps::catalog_steps;
use crate::summary::RunSummary;
use crate::world::{CatalogWorld, Services};

/// The catalog step library bound to a set of services.
pub struct Suite {
    runner: ScenarioRunner<CatalogWorld>,
    report: ReportSettings,
}

impl Suite {
    pub fn new(services: Arc<Services>) -> Result<Self, RunnerError> {
        let registry = catalog_steps()?;
        let report = services.settings.report.clone();
        let runner = ScenarioRunner::new(registry, move || CatalogWorld::new(services.clone()));
        Ok(Self { runner, report })
    }

    /// Runs every feature found under `features`.
    ///
    /// All feature files are parsed before anything executes, so a syntax
    /// error aborts the run without a partial report.
    pub async fn run(&self, features: &Path) -> Result<RunSummary, RunnerError> {
        let paths = discover_features(features)?;
        let parsed = paths
            .iter()
            .map(|path| load_feature(path))
            .collect::<Result<Vec<_>, _>>()?;
        info!(features = parsed.len(), path = %features.display(), "Starting test run");

        let mut report = match ReportWriter::from_settings(&self.report) {
            Ok(report) => report,
            Err(e) => {
                warn!(path = %self.report.path, error = %e, "Report file unavailable, reporting to stdout only");
                ReportWriter::stdout_only(self.report.echo_stdout)
            }
        };
        let mut summary = RunSummary::default();
        for feature in &parsed {
            let feature_summary = self.runner.run_feature(feature, &mut report).await;
            summary.merge(&feature_summary);
        }
        report.finalize(&summary);

        Ok(summary)
    }
}
