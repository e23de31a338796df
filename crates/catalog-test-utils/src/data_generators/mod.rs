//! Test data generators for the product catalog harness.
//!
//! This module provides the default value table, the test code derivation
//! and the time/random value helpers used to make generated entities unique.

pub mod defaults;
mod dynamic;
mod test_code;

// Re-export all data generators for easy access
pub use dynamic::*;
pub use test_code::*;
