//! Step definitions: regular expressions mapped to async handlers.

use futures::future::BoxFuture;
use regex::Regex;
use std::fmt;

use crate::error::{RunnerError, StepResult};

/// An async step handler.
///
/// Receives the scenario's world and the arguments of the matched step.
pub type StepFn<W> = for<'a> fn(&'a mut W, StepArgs) -> BoxFuture<'a, StepResult>;

/// What a step hands to its handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepArgs {
    /// Capture groups in pattern order; unmatched optional groups are empty.
    pub captures: Vec<String>,
    /// Rows of the step's data table, header row included.
    pub table: Option<Vec<Vec<String>>>,
    pub docstring: Option<String>,
}

impl From<Vec<String>> for StepArgs {
    fn from(captures: Vec<String>) -> Self {
        Self {
            captures,
            ..Self::default()
        }
    }
}

struct StepDefinition<W> {
    pattern: Regex,
    handler: StepFn<W>,
}

/// Ordered collection of step definitions.
///
/// Matching ignores the Given/When/Then keyword; when several patterns
/// match a step, the one registered first wins.
pub struct StepRegistry<W> {
    definitions: Vec<StepDefinition<W>>,
}

impl<W> StepRegistry<W> {
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }

    /// Registers `handler` for step text matching `pattern`.
    pub fn step(mut self, pattern: &str, handler: StepFn<W>) -> Result<Self, RunnerError> {
        let pattern = Regex::new(pattern).map_err(|source| RunnerError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.definitions.push(StepDefinition { pattern, handler });
        Ok(self)
    }

    pub fn given(self, pattern: &str, handler: StepFn<W>) -> Result<Self, RunnerError> {
        self.step(pattern, handler)
    }

    pub fn when(self, pattern: &str, handler: StepFn<W>) -> Result<Self, RunnerError> {
        self.step(pattern, handler)
    }

    pub fn then(self, pattern: &str, handler: StepFn<W>) -> Result<Self, RunnerError> {
        self.step(pattern, handler)
    }

    /// Finds the handler for `text` along with its captured arguments.
    ///
    /// The returned arguments carry no table or doc string; the caller
    /// attaches those from the step.
    pub fn find(&self, text: &str) -> Option<(StepFn<W>, StepArgs)> {
        self.definitions.iter().find_map(|definition| {
            let captures = definition.pattern.captures(text)?;
            let captures: Vec<String> = captures
                .iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect();
            Some((definition.handler, StepArgs::from(captures)))
        })
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<W> Default for StepRegistry<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> fmt::Debug for StepRegistry<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.definitions.iter().map(|d| d.pattern.as_str()))
            .finish()
    }
}
