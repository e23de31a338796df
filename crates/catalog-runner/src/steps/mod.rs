//! Step definitions for the product catalog.

pub mod product_steps;
pub mod productdb_steps;

use crate::error::{RunnerError, StepError};
use crate::registry::{StepArgs, StepRegistry};
use crate::world::CatalogWorld;

/// Registry with every catalog step.
pub fn catalog_steps() -> Result<StepRegistry<CatalogWorld>, RunnerError> {
    let registry = product_steps::register(StepRegistry::new())?;
    productdb_steps::register(registry)
}

/// Positional capture, present whenever the pattern matched.
pub(crate) fn arg(args: &StepArgs, index: usize) -> Result<&str, StepError> {
    args.captures
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| StepError::Precondition(format!("missing step argument {}", index + 1)))
}

pub(crate) fn number_arg<T: std::str::FromStr>(args: &StepArgs, index: usize) -> Result<T, StepError> {
    let raw = arg(args, index)?;
    raw.parse()
        .map_err(|_| StepError::InvalidArgument(format!("{:?} is not a number", raw)))
}
