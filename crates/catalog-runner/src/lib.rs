//! Scenario runner for the product catalog BDD harness.
//!
//! Feature files are parsed with the Gherkin parser, each step is matched
//! against a [`StepRegistry`] of regular expressions and executed against a
//! world created fresh for every scenario. Outcomes are written to a
//! [`ReportWriter`] and folded into a [`RunSummary`].

pub mod error;
pub mod logging;
pub mod registry;
pub mod report;
pub mod runner;
pub mod steps;
pub mod suite;
pub mod summary;
pub mod webui;
pub mod world;

pub use error::{RunnerError, StepError, StepResult};
pub use registry::{StepArgs, StepFn, StepRegistry};
pub use report::ReportWriter;
pub use runner::{discover_features, load_feature, parse_feature, ScenarioRunner, StepLine};
pub use suite::Suite;
pub use summary::{RunSummary, ScenarioOutcome, Status, StepOutcome, Tally};
pub use world::{CatalogWorld, Services};
