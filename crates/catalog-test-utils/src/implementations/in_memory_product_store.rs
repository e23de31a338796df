//! In-memory implementation of the ProductStore trait.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::DbError;
use crate::store::{single_value, ProductStore};

/// A statement recorded by [`InMemoryProductStore::execute`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedStatement {
    pub query: String,
    pub params: Vec<String>,
}

/// Thread-safe scripted product store for testing.
///
/// Scalar queries answer from rows registered per `(query, param)` pair.
/// Statements are recorded, and a statement can be wired to populate rows
/// for later reads.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    rows: Arc<RwLock<HashMap<(String, String), Vec<String>>>>,
    executed: Arc<RwLock<Vec<ExecutedStatement>>>,
    projections: Arc<RwLock<Vec<Projection>>>,
    fail_with: Arc<RwLock<Option<String>>>,
}

/// Maps an executed statement's params onto rows of a scalar query
#[derive(Clone)]
struct Projection {
    statement: String,
    query: String,
    key_index: usize,
    value_index: usize,
}

impl fmt::Debug for InMemoryProductStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryProductStore")
            .field("row_sets", &self.rows.read().len())
            .field("executed", &self.executed.read().len())
            .finish()
    }
}

impl InMemoryProductStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the rows `query` returns for `param`.
    pub fn with_rows(self, query: &str, param: &str, rows: Vec<String>) -> Self {
        self.set_rows(query, param, rows);
        self
    }

    /// Registers a single-row answer.
    pub fn with_value(self, query: &str, param: &str, value: &str) -> Self {
        self.with_rows(query, param, vec![value.to_string()])
    }

    pub fn set_rows(&self, query: &str, param: &str, rows: Vec<String>) {
        self.rows
            .write()
            .insert((query.to_string(), param.to_string()), rows);
    }

    /// When `statement` executes, answer `query` for `params[key_index]`
    /// with `params[value_index]`.
    pub fn project(self, statement: &str, query: &str, key_index: usize, value_index: usize) -> Self {
        self.projections.write().push(Projection {
            statement: statement.to_string(),
            query: query.to_string(),
            key_index,
            value_index,
        });
        self
    }

    /// Makes every subsequent call fail with a query error.
    pub fn fail_with(&self, message: &str) {
        *self.fail_with.write() = Some(message.to_string());
    }

    /// Statements executed so far, in order.
    pub fn executed(&self) -> Vec<ExecutedStatement> {
        self.executed.read().clone()
    }

    fn check_failure(&self) -> Result<(), DbError> {
        match self.fail_with.read().as_ref() {
            Some(message) => Err(DbError::Query(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn fetch_scalar(&self, query: &str, param: &str) -> Result<String, DbError> {
        self.check_failure()?;
        let rows = self
            .rows
            .read()
            .get(&(query.to_string(), param.to_string()))
            .cloned()
            .unwrap_or_default();
        single_value(param, rows)
    }

    async fn execute(&self, query: &str, params: &[String]) -> Result<u64, DbError> {
        self.check_failure()?;
        self.executed.write().push(ExecutedStatement {
            query: query.to_string(),
            params: params.to_vec(),
        });

        let projections = self.projections.read().clone();
        for projection in projections.iter().filter(|p| p.statement == query) {
            if let (Some(key), Some(value)) = (
                params.get(projection.key_index),
                params.get(projection.value_index),
            ) {
                self.set_rows(&projection.query, key, vec![value.clone()]);
            }
        }
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::queries;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn answers_registered_rows() {
        let store = InMemoryProductStore::new().with_value(
            queries::LONG_DESCRIPTION_BY_ID,
            "PRD-1",
            "Vanilla",
        );

        let value = store
            .fetch_scalar(queries::LONG_DESCRIPTION_BY_ID, "PRD-1")
            .await
            .unwrap();
        assert_eq!(value, "Vanilla");

        assert_matches!(
            store.fetch_scalar(queries::LONG_DESCRIPTION_BY_ID, "PRD-2").await,
            Err(DbError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn projected_inserts_become_readable() {
        let store = InMemoryProductStore::new().project(
            queries::INSERT_PRODUCT,
            queries::LONG_DESCRIPTION_BY_ID,
            0,
            4,
        );
        let params: Vec<String> = ["PRD-9", "PRD", "LOREWI", "PH1", "Mint"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        store.execute(queries::INSERT_PRODUCT, &params).await.unwrap();

        assert_eq!(store.executed().len(), 1);
        assert_eq!(
            store
                .fetch_scalar(queries::LONG_DESCRIPTION_BY_ID, "PRD-9")
                .await
                .unwrap(),
            "Mint"
        );
    }

    #[tokio::test]
    async fn injected_failures_surface_as_query_errors() {
        let store = InMemoryProductStore::new();
        store.fail_with("connection reset");

        assert_matches!(
            store.execute(queries::INSERT_PRODUCT, &[]).await,
            Err(DbError::Query(ref m)) if m == "connection reset"
        );
    }
}
