//! Feature discovery and sequential scenario execution.

use cucumber::gherkin::{self, Feature, GherkinEnv};
use futures::FutureExt;
use std::any::Any;
use std::fs;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{RunnerError, StepError};
use crate::registry::StepRegistry;
use crate::report::ReportWriter;
use crate::summary::{RunSummary, ScenarioOutcome, Status, StepOutcome};

/// Scenario tags that mark a scenario as not to be run
pub const SKIP_TAGS: &[&str] = &["skip", "wip"];

const FEATURE_EXTENSION: &str = "feature";

/// A step as it appears in a scenario: keyword, text and any attached
/// data table or doc string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLine {
    pub keyword: String,
    pub text: String,
    pub table: Option<Vec<Vec<String>>>,
    pub docstring: Option<String>,
}

impl StepLine {
    pub fn new(keyword: &str, text: &str) -> Self {
        Self {
            keyword: keyword.trim().to_string(),
            text: text.trim().to_string(),
            table: None,
            docstring: None,
        }
    }

    pub fn with_table(mut self, rows: Vec<Vec<String>>) -> Self {
        self.table = Some(rows);
        self
    }

    pub fn with_docstring(mut self, docstring: impl Into<String>) -> Self {
        self.docstring = Some(docstring.into());
        self
    }

    /// Name used in outcomes and the report, e.g. `Given the test code is "110-010-001"`
    pub fn display_name(&self) -> String {
        if self.keyword.is_empty() {
            self.text.clone()
        } else {
            format!("{} {}", self.keyword, self.text)
        }
    }

    /// Replaces `<column>` placeholders with the values of one Examples row.
    pub fn with_example(&self, header: &[String], row: &[String]) -> Self {
        let fill = |text: &str| substitute(text, header, row);
        Self {
            keyword: self.keyword.clone(),
            text: fill(&self.text),
            table: self.table.as_ref().map(|rows| {
                rows.iter()
                    .map(|cells| cells.iter().map(|cell| fill(cell)).collect())
                    .collect()
            }),
            docstring: self.docstring.as_deref().map(fill),
        }
    }
}

impl From<&gherkin::Step> for StepLine {
    fn from(step: &gherkin::Step) -> Self {
        Self {
            table: step.table.as_ref().map(|table| table.rows.clone()),
            docstring: step.docstring.clone(),
            ..StepLine::new(&step.keyword, &step.value)
        }
    }
}

/// Why a scenario was not run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Tagged,
    NoSteps,
}

/// A runnable scenario. Outlines yield one per Examples row.
struct Concrete {
    name: String,
    steps: Vec<StepLine>,
    tags: Vec<String>,
}

/// Runs scenarios against a fresh world each.
pub struct ScenarioRunner<W> {
    registry: StepRegistry<W>,
    new_world: Box<dyn Fn() -> W + Send + Sync>,
}

impl<W> ScenarioRunner<W> {
    pub fn new<F>(registry: StepRegistry<W>, new_world: F) -> Self
    where
        F: Fn() -> W + Send + Sync + 'static,
    {
        Self {
            registry,
            new_world: Box::new(new_world),
        }
    }

    pub fn registry(&self) -> &StepRegistry<W> {
        &self.registry
    }

    /// Executes `steps` in order against a new world.
    ///
    /// The first failing step fails the scenario and every step after it is
    /// recorded as skipped.
    pub async fn run_scenario(&self, name: &str, steps: &[StepLine]) -> ScenarioOutcome {
        if steps.is_empty() {
            return skipped_scenario(name, steps, SkipReason::NoSteps);
        }

        info!(scenario = %name, steps = steps.len(), "Running scenario");

        let mut world = (self.new_world)();
        let mut outcomes = Vec::with_capacity(steps.len());
        let mut failed = false;

        for step in steps {
            let step_name = step.display_name();

            if failed {
                outcomes.push(StepOutcome {
                    name: step_name,
                    status: Status::Skipped,
                    details: "skipped after an earlier failure".to_string(),
                });
                continue;
            }

            let result = match self.registry.find(&step.text) {
                Some((handler, mut args)) => {
                    args.table = step.table.clone();
                    args.docstring = step.docstring.clone();
                    debug!(step = %step_name, ?args, "Executing step");
                    match AssertUnwindSafe(handler(&mut world, args))
                        .catch_unwind()
                        .await
                    {
                        Ok(result) => result.map_err(|e| e.to_string()),
                        Err(payload) => Err(StepError::Panicked(panic_message(payload)).to_string()),
                    }
                }
                None => Err(format!("undefined step: {}", step.text)),
            };

            match result {
                Ok(()) => outcomes.push(StepOutcome {
                    name: step_name,
                    status: Status::Passed,
                    details: String::new(),
                }),
                Err(details) => {
                    warn!(scenario = %name, step = %step_name, error = %details, "Step failed");
                    failed = true;
                    outcomes.push(StepOutcome {
                        name: step_name,
                        status: Status::Failed,
                        details,
                    });
                }
            }
        }

        let status = if failed { Status::Failed } else { Status::Passed };
        info!(scenario = %name, status = %status, "Scenario finished");

        ScenarioOutcome {
            name: name.to_string(),
            status,
            steps: outcomes,
        }
    }

    /// Runs every scenario of `feature`, writing each outcome to `report`.
    pub async fn run_feature(&self, feature: &Feature, report: &mut ReportWriter) -> RunSummary {
        info!(feature = %feature.name, "Running feature");

        let mut summary = RunSummary::default();
        let background = background_steps(feature.background.as_ref());

        let top_level = feature
            .scenarios
            .iter()
            .map(|scenario| (scenario, background.clone(), Vec::new()));
        let in_rules = feature.rules.iter().flat_map(|rule| {
            let mut steps = background.clone();
            steps.extend(background_steps(rule.background.as_ref()));
            rule.scenarios
                .iter()
                .map(move |scenario| (scenario, steps.clone(), rule.tags.clone()))
        });
        let planned: Vec<_> = top_level.chain(in_rules).collect();

        for (scenario, background, rule_tags) in planned {
            for concrete in concrete_scenarios(scenario, &background) {
                let tagged = feature
                    .tags
                    .iter()
                    .chain(rule_tags.iter())
                    .chain(scenario.tags.iter())
                    .chain(concrete.tags.iter())
                    .any(|tag| is_skip_tag(tag));

                let outcome = if tagged {
                    skipped_scenario(&concrete.name, &concrete.steps, SkipReason::Tagged)
                } else {
                    self.run_scenario(&concrete.name, &concrete.steps).await
                };

                for step in &outcome.steps {
                    report.log_step(step);
                }
                report.log_scenario(&outcome);
                summary.record(&outcome);
            }
        }

        summary
    }
}

/// Records a scenario and all of its steps as skipped.
pub fn skipped_scenario(name: &str, steps: &[StepLine], reason: SkipReason) -> ScenarioOutcome {
    let details = match reason {
        SkipReason::Tagged => "scenario is tagged to be skipped",
        SkipReason::NoSteps => "scenario has no steps",
    };
    info!(scenario = %name, reason = details, "Skipping scenario");

    ScenarioOutcome {
        name: name.to_string(),
        status: Status::Skipped,
        steps: steps
            .iter()
            .map(|step| StepOutcome {
                name: step.display_name(),
                status: Status::Skipped,
                details: details.to_string(),
            })
            .collect(),
    }
}

/// Expands `scenario` into what actually runs, background steps first.
///
/// Outline rows are numbered across all of their Examples blocks, starting
/// at 1. Examples without data rows contribute nothing.
fn concrete_scenarios(scenario: &gherkin::Scenario, background: &[StepLine]) -> Vec<Concrete> {
    let with_background = |steps: Vec<StepLine>| -> Vec<StepLine> {
        background.iter().cloned().chain(steps).collect()
    };

    if scenario.examples.is_empty() {
        return vec![Concrete {
            name: scenario.name.clone(),
            steps: with_background(scenario.steps.iter().map(StepLine::from).collect()),
            tags: Vec::new(),
        }];
    }

    let mut expanded = Vec::new();
    for examples in &scenario.examples {
        let Some((header, rows)) = examples.table.as_ref().and_then(|t| t.rows.split_first()) else {
            continue;
        };
        for row in rows {
            let steps = scenario
                .steps
                .iter()
                .map(|step| StepLine::from(step).with_example(header, row))
                .collect();
            expanded.push(Concrete {
                name: format!("{} (row {})", scenario.name, expanded.len() + 1),
                steps: with_background(steps),
                tags: examples.tags.clone(),
            });
        }
    }
    expanded
}

fn substitute(text: &str, header: &[String], row: &[String]) -> String {
    header
        .iter()
        .zip(row)
        .fold(text.to_string(), |text, (column, value)| {
            text.replace(&format!("<{}>", column), value)
        })
}

fn background_steps(background: Option<&gherkin::Background>) -> Vec<StepLine> {
    background
        .map(|b| b.steps.iter().map(StepLine::from).collect())
        .unwrap_or_default()
}

fn is_skip_tag(tag: &str) -> bool {
    let tag = tag.trim_start_matches('@');
    SKIP_TAGS.iter().any(|skip| tag.eq_ignore_ascii_case(skip))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Parses feature text.
pub fn parse_feature(source: &str, origin: &str) -> Result<Feature, RunnerError> {
    Feature::parse(source, GherkinEnv::default()).map_err(|e| RunnerError::FeatureParse {
        path: origin.to_string(),
        message: e.to_string(),
    })
}

/// Reads and parses one feature file.
pub fn load_feature(path: &Path) -> Result<Feature, RunnerError> {
    let source = fs::read_to_string(path)?;
    parse_feature(&source, &path.display().to_string())
}

/// Lists feature files under `path`, which may be a single file or a
/// directory searched recursively. Results are sorted.
pub fn discover_features(path: &Path) -> Result<Vec<PathBuf>, RunnerError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut found = Vec::new();
    collect_features(path, &mut found)?;
    found.sort();

    if found.is_empty() {
        return Err(RunnerError::NoFeatures(path.display().to_string()));
    }
    Ok(found)
}

fn collect_features(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), RunnerError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_features(&path, found)?;
        } else if path.extension().map_or(false, |ext| ext == FEATURE_EXTENSION) {
            found.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StepResult;
    use crate::registry::StepArgs;
    use futures::future::BoxFuture;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Counter {
        value: i64,
    }

    fn set(world: &mut Counter, args: StepArgs) -> BoxFuture<'_, StepResult> {
        Box::pin(async move {
            world.value = args.captures[0].parse().map_err(|_| StepError::Precondition("number".into()))?;
            Ok(())
        })
    }

    fn add(world: &mut Counter, args: StepArgs) -> BoxFuture<'_, StepResult> {
        Box::pin(async move {
            let n: i64 = args.captures[0].parse().map_err(|_| StepError::Precondition("number".into()))?;
            world.value += n;
            Ok(())
        })
    }

    fn expect(world: &mut Counter, args: StepArgs) -> BoxFuture<'_, StepResult> {
        Box::pin(async move {
            let expected: i64 = args.captures[0].parse().map_err(|_| StepError::Precondition("number".into()))?;
            if world.value != expected {
                return Err(StepError::assertion("value", expected, world.value));
            }
            Ok(())
        })
    }

    fn explode(_world: &mut Counter, _args: StepArgs) -> BoxFuture<'_, StepResult> {
        Box::pin(async move { panic!("boom") })
    }

    fn add_table(world: &mut Counter, args: StepArgs) -> BoxFuture<'_, StepResult> {
        Box::pin(async move {
            let rows = args
                .table
                .ok_or_else(|| StepError::Precondition("no table".into()))?;
            for cell in rows.iter().skip(1).flatten() {
                world.value += cell.parse::<i64>().map_err(|_| StepError::Precondition("number".into()))?;
            }
            Ok(())
        })
    }

    fn add_docstring(world: &mut Counter, args: StepArgs) -> BoxFuture<'_, StepResult> {
        Box::pin(async move {
            let text = args
                .docstring
                .ok_or_else(|| StepError::Precondition("no doc string".into()))?;
            world.value += text.trim().parse::<i64>().map_err(|_| StepError::Precondition("number".into()))?;
            Ok(())
        })
    }

    fn runner() -> ScenarioRunner<Counter> {
        let registry = StepRegistry::new()
            .given(r"^the counter is (-?\d+)$", set)
            .unwrap()
            .when(r"^I add (-?\d+)$", add)
            .unwrap()
            .when(r"^everything explodes$", explode)
            .unwrap()
            .when(r"^I add the amounts below$", add_table)
            .unwrap()
            .when(r"^I add the note$", add_docstring)
            .unwrap()
            .then(r"^the counter should be (-?\d+)$", expect)
            .unwrap();
        ScenarioRunner::new(registry, Counter::default)
    }

    fn lines(steps: &[(&str, &str)]) -> Vec<StepLine> {
        steps.iter().map(|(k, t)| StepLine::new(k, t)).collect()
    }

    fn statuses(outcome: &ScenarioOutcome) -> Vec<Status> {
        outcome.steps.iter().map(|s| s.status).collect()
    }

    #[tokio::test]
    async fn passing_scenario() {
        let outcome = runner()
            .run_scenario(
                "adds",
                &lines(&[
                    ("Given", "the counter is 2"),
                    ("When", "I add 3"),
                    ("Then", "the counter should be 5"),
                ]),
            )
            .await;

        assert_eq!(outcome.status, Status::Passed);
        assert_eq!(statuses(&outcome), vec![Status::Passed; 3]);
        assert_eq!(outcome.steps[0].name, "Given the counter is 2");
    }

    #[tokio::test]
    async fn failure_skips_the_remaining_steps() {
        let outcome = runner()
            .run_scenario(
                "wrong sum",
                &lines(&[
                    ("Given", "the counter is 2"),
                    ("Then", "the counter should be 7"),
                    ("When", "I add 5"),
                    ("Then", "the counter should be 7"),
                ]),
            )
            .await;

        assert_eq!(outcome.status, Status::Failed);
        assert_eq!(
            statuses(&outcome),
            vec![Status::Passed, Status::Failed, Status::Skipped, Status::Skipped]
        );
        assert_eq!(outcome.failure().unwrap().details, "expected value 7, got 2");
    }

    #[tokio::test]
    async fn undefined_steps_fail() {
        let outcome = runner()
            .run_scenario("unknown", &lines(&[("Given", "a step nobody wrote")]))
            .await;
        assert_eq!(outcome.status, Status::Failed);
        assert!(outcome.steps[0].details.contains("undefined step"));
    }

    #[tokio::test]
    async fn panics_become_failures() {
        let outcome = runner()
            .run_scenario(
                "panics",
                &lines(&[("When", "everything explodes"), ("Then", "the counter should be 0")]),
            )
            .await;
        assert_eq!(statuses(&outcome), vec![Status::Failed, Status::Skipped]);
        assert!(outcome.steps[0].details.contains("boom"));
    }

    #[tokio::test]
    async fn keyword_does_not_affect_matching() {
        let outcome = runner()
            .run_scenario("keywords", &lines(&[("Then", "the counter is 4"), ("And", "the counter should be 4")]))
            .await;
        assert_eq!(outcome.status, Status::Passed);
    }

    #[tokio::test]
    async fn every_scenario_gets_a_fresh_world() {
        let runner = runner();
        let first = runner
            .run_scenario("first", &lines(&[("When", "I add 10"), ("Then", "the counter should be 10")]))
            .await;
        let second = runner
            .run_scenario("second", &lines(&[("When", "I add 1"), ("Then", "the counter should be 1")]))
            .await;
        assert_eq!(first.status, Status::Passed);
        assert_eq!(second.status, Status::Passed);
    }

    const FEATURE: &str = r#"Feature: Counting

  Background:
    Given the counter is 1

  Scenario: Adding
    When I add 2
    Then the counter should be 3

  @skip
  Scenario: Tagged away
    When I add 100
    Then the counter should be 101

  Scenario Outline: Outlined
    When I add <n>
    Then the counter should be <total>

    Examples:
      | n | total |
      | 2 | 3     |
      | 5 | 6     |

    @wip
    Examples:
      | n | total |
      | 9 | 10    |

  Scenario: Broken
    Then the counter should be 99
    And I add 1
"#;

    #[tokio::test]
    async fn feature_run_reports_and_tallies() {
        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("report.txt");
        let mut report = ReportWriter::open(&report_path, false).unwrap();

        let feature = parse_feature(FEATURE, "counting.feature").unwrap();
        let summary = runner().run_feature(&feature, &mut report).await;
        report.finalize(&summary);

        assert_eq!(
            (summary.scenarios.total, summary.scenarios.passed, summary.scenarios.failed, summary.scenarios.skipped),
            (6, 3, 1, 2)
        );
        // background step counts once per scenario
        assert_eq!(summary.steps.total, 6 * 3);
        assert_eq!(summary.steps.failed, 1);

        let text = fs::read_to_string(&report_path).unwrap();
        assert!(text.contains("SCENARIO: Adding | STATUS: PASSED"));
        assert!(text.contains("SCENARIO: Tagged away | STATUS: SKIPPED"));
        assert!(text.contains("SCENARIO: Outlined (row 1) | STATUS: PASSED"));
        assert!(text.contains("STEP: Then the counter should be 6 | STATUS: PASSED"));
        assert!(text.contains("SCENARIO: Outlined (row 2) | STATUS: PASSED"));
        assert!(text.contains("SCENARIO: Outlined (row 3) | STATUS: SKIPPED"));
        assert!(!text.contains("<n>"));
        assert!(text.contains("STEP: And I add 1 | STATUS: SKIPPED"));
        assert_eq!(text.matches("--- FINAL REPORT ---").count(), 1);
    }

    #[tokio::test]
    async fn tables_and_doc_strings_reach_the_handlers() {
        let feature = parse_feature(
            r#"Feature: Attachments

  Scenario: Both kinds
    Given the counter is 0
    When I add the amounts below
      | amount |
      | 4      |
      | 6      |
    And I add the note
      """
      5
      """
    Then the counter should be 15
"#,
            "attachments.feature",
        )
        .unwrap();

        let mut report = ReportWriter::stdout_only(false);
        let summary = runner().run_feature(&feature, &mut report).await;
        assert_eq!(summary.scenarios.passed, 1, "{:?}", summary);
    }

    #[test]
    fn outline_rows_fill_placeholders_everywhere() {
        let header = vec!["code".to_string(), "name".to_string()];
        let row = vec!["PRD-1".to_string(), "Mint".to_string()];
        let step = StepLine::new("When", r#"I create "<code>""#)
            .with_table(vec![vec!["name".into()], vec!["<name>".into()]])
            .with_docstring("<name> and <unknown>");

        let filled = step.with_example(&header, &row);
        assert_eq!(filled.text, r#"I create "PRD-1""#);
        assert_eq!(filled.table, Some(vec![vec!["name".to_string()], vec!["Mint".to_string()]]));
        assert_eq!(filled.docstring.as_deref(), Some("Mint and <unknown>"));
    }

    #[test]
    fn malformed_features_are_rejected() {
        let result = parse_feature("this is not gherkin", "broken.feature");
        assert!(matches!(result, Err(RunnerError::FeatureParse { .. })));
    }

    #[test]
    fn discovery_walks_directories_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("inbound");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("b.feature"), FEATURE).unwrap();
        fs::write(dir.path().join("a.feature"), FEATURE).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let found = discover_features(dir.path()).unwrap();
        assert_eq!(found, vec![dir.path().join("a.feature"), nested.join("b.feature")]);

        let single = discover_features(&nested.join("b.feature")).unwrap();
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn empty_directories_have_no_features() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(discover_features(dir.path()), Err(RunnerError::NoFeatures(_))));
    }

    #[test]
    fn skip_tags_ignore_case_and_prefix() {
        assert!(is_skip_tag("@skip"));
        assert!(is_skip_tag("WIP"));
        assert!(!is_skip_tag("smoke"));
    }
}
