use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::{debug, info};

use super::{single_value, ProductStore};
use crate::config::DatabaseSettings;
use crate::error::DbError;

/// PostgreSQL-backed product store sharing one connection pool
#[derive(Clone, Debug)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Create the pool and establish the first connection.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections.min(settings.max_connections))
            .max_lifetime(Duration::from_secs(settings.max_lifetime_secs))
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
            .connect(&settings.url)
            .await
            .map_err(|e| DbError::Connect(e.to_string()))?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(|e| DbError::Connect(format!("could not ping the database: {}", e)))?;

        info!(max_connections = settings.max_connections, "Connected to PostgreSQL database");
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed PostgreSQL database connection");
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn fetch_scalar(&self, query: &str, param: &str) -> Result<String, DbError> {
        debug!(query, param, "Fetching scalar");
        let rows: Vec<Option<String>> = sqlx::query_scalar(query)
            .bind(param)
            .fetch_all(&self.pool)
            .await?;
        single_value(param, rows)
    }

    async fn execute(&self, query: &str, params: &[String]) -> Result<u64, DbError> {
        debug!(query, params = params.len(), "Executing statement");
        let mut statement = sqlx::query(query);
        for param in params {
            statement = statement.bind(param.as_str());
        }
        let result = statement.execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
