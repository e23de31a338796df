//! Test implementations (fakes) of the harness interfaces.
//!
//! These implementations provide higher-fidelity testing capabilities than
//! mocks, but still operate in-memory for testability.

pub mod in_memory_product_store;

// Re-export all implementations for easy access
pub use in_memory_product_store::*;
