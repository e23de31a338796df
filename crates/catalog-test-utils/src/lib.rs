//! Testing utilities for the product catalog.
//!
//! This crate provides the building blocks the BDD harness drives the
//! catalog with: product/SKU test data builders, dynamic value generators,
//! the authenticated HTTP request helper, the database query helper and
//! its in-memory fake, and configuration loading.

pub mod builders;
pub mod client;
pub mod config;
pub mod data_generators;
pub mod error;
pub mod implementations;
pub mod model;
pub mod store;

/// Re-export commonly used types for convenience
pub use mockall;

pub use builders::{generate_sku, ProductBuilder, ProductOverrides};
pub use client::ApiClient;
pub use config::Settings;
pub use data_generators::TestCode;
pub use error::{ConfigError, DbError, HttpError, TestCodeError};
pub use model::{Product, Root, Sku};
pub use store::{PgProductStore, ProductStore};
