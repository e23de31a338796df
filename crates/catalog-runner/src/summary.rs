//! Step and scenario outcomes and their aggregation.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Passed,
    Failed,
    Skipped,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Passed => "PASSED",
            Status::Failed => "FAILED",
            Status::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one executed (or skipped) step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub name: String,
    pub status: Status,
    pub details: String,
}

/// Outcome of one scenario, with its steps in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub status: Status,
    pub steps: Vec<StepOutcome>,
}

impl ScenarioOutcome {
    /// The first failing step, if any
    pub fn failure(&self) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.status == Status::Failed)
    }
}

/// Pass/fail/skip counters for one kind of item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Tally {
    pub fn record(&mut self, status: Status) {
        self.total += 1;
        match status {
            Status::Passed => self.passed += 1,
            Status::Failed => self.failed += 1,
            Status::Skipped => self.skipped += 1,
        }
    }

    pub fn merge(&mut self, other: &Tally) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
        self.skipped += other.skipped;
    }
}

/// Aggregated counters for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub steps: Tally,
    pub scenarios: Tally,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &ScenarioOutcome) {
        for step in &outcome.steps {
            self.steps.record(step.status);
        }
        self.scenarios.record(outcome.status);
    }

    pub fn merge(&mut self, other: &RunSummary) {
        self.steps.merge(&other.steps);
        self.scenarios.merge(&other.scenarios);
    }

    /// True when nothing failed
    pub fn is_success(&self) -> bool {
        self.steps.failed == 0 && self.scenarios.failed == 0
    }
}

impl FromIterator<ScenarioOutcome> for RunSummary {
    fn from_iter<I: IntoIterator<Item = ScenarioOutcome>>(iter: I) -> Self {
        let mut summary = RunSummary::default();
        for outcome in iter {
            summary.record(&outcome);
        }
        summary
    }
}
