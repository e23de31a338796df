//! Plain-text run report.
//!
//! Every step and scenario outcome becomes one line in the report file and,
//! when echo is on, on stdout. [`ReportWriter::finalize`] appends the totals
//! block exactly once. Write failures are logged and otherwise ignored so a
//! full disk never aborts a run.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use catalog_test_utils::config::ReportSettings;

use crate::summary::{RunSummary, ScenarioOutcome, StepOutcome};

pub struct ReportWriter {
    file: Option<BufWriter<File>>,
    path: Option<PathBuf>,
    echo: bool,
}

impl ReportWriter {
    /// Creates (or truncates) the report at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>, echo: bool) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        info!(path = %path.display(), "Report opened");

        Ok(Self {
            file: Some(BufWriter::new(file)),
            path: Some(path.to_path_buf()),
            echo,
        })
    }

    /// A writer without a file; lines only go to stdout when `echo` is set.
    pub fn stdout_only(echo: bool) -> Self {
        Self {
            file: None,
            path: None,
            echo,
        }
    }

    pub fn from_settings(settings: &ReportSettings) -> io::Result<Self> {
        if settings.enabled {
            Self::open(&settings.path, settings.echo_stdout)
        } else {
            Ok(Self::stdout_only(settings.echo_stdout))
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn log_step(&mut self, step: &StepOutcome) {
        self.write_line(&step_line(step));
    }

    pub fn log_scenario(&mut self, scenario: &ScenarioOutcome) {
        self.write_line(&scenario_line(scenario));
    }

    /// Writes the totals block and flushes the file.
    pub fn finalize(mut self, summary: &RunSummary) {
        let block = summary_block(summary);
        if self.echo {
            print!("{}", block);
        }
        if let Some(file) = self.file.as_mut() {
            if let Err(e) = file.write_all(block.as_bytes()).and_then(|_| file.flush()) {
                warn!(error = %e, "Failed to finalize report");
            }
        }
        info!(
            steps = summary.steps.total,
            failed_steps = summary.steps.failed,
            scenarios = summary.scenarios.total,
            failed_scenarios = summary.scenarios.failed,
            "Run finished"
        );
    }

    fn write_line(&mut self, line: &str) {
        if self.echo {
            println!("{}", line);
        }
        if let Some(file) = self.file.as_mut() {
            if let Err(e) = writeln!(file, "{}", line) {
                warn!(error = %e, "Failed to write report line");
            }
        }
    }
}

pub fn step_line(step: &StepOutcome) -> String {
    format!(
        "STEP: {} | STATUS: {} | DETAILS: {}",
        step.name, step.status, step.details
    )
}

pub fn scenario_line(scenario: &ScenarioOutcome) -> String {
    format!("SCENARIO: {} | STATUS: {}", scenario.name, scenario.status)
}

pub fn summary_block(summary: &RunSummary) -> String {
    let steps = &summary.steps;
    let scenarios = &summary.scenarios;
    format!(
        "\n--- FINAL REPORT ---\n\
         TOTAL STEPS: {} | PASSED: {} | FAILED: {} | SKIPPED: {}\n\
         TOTAL SCENARIOS: {} | PASSED: {} | FAILED: {} | SKIPPED: {}\n",
        steps.total,
        steps.passed,
        steps.failed,
        steps.skipped,
        scenarios.total,
        scenarios.passed,
        scenarios.failed,
        scenarios.skipped
    )
}
