//! Entity builders for product catalog test data.
//!
//! This module provides the fluent product builder, the explicit overrides
//! form of the same construction, and canned product/SKU generators.

mod product;

// Re-export all builders for easy access
pub use product::*;
