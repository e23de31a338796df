//! Database query helper for verifying catalog state.

mod postgres;

pub use postgres::*;

use async_trait::async_trait;
use mockall::automock;

use crate::error::DbError;

/// SQL used by the catalog steps.
pub mod queries {
    pub const LONG_DESCRIPTION_BY_ID: &str =
        "SELECT longdescription FROM product WHERE productid = $1";
    pub const SHORT_DESCRIPTION_BY_ID: &str =
        "SELECT shortdescription FROM product WHERE productid = $1";
    pub const INSERT_PRODUCT: &str = "INSERT INTO product \
        (productid, productlevel, parentid, parentlevel, longdescription) \
        VALUES ($1, $2, $3, $4, $5)";
}

/// Read/write access to the product table.
#[automock]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Run `query` bound to a single `param` and return its only value.
    async fn fetch_scalar(&self, query: &str, param: &str) -> Result<String, DbError>;

    /// Run a statement with positional `params`, returning rows affected.
    async fn execute(&self, query: &str, params: &[String]) -> Result<u64, DbError>;
}

/// Reduce a scalar query's rows to its single value.
///
/// A NULL column reads as the empty string, which is what the API stores
/// for an omitted optional field.
pub fn single_value<V>(param: &str, mut rows: Vec<V>) -> Result<String, DbError>
where
    V: Into<Option<String>>,
{
    match rows.len() {
        0 => Err(DbError::NotFound {
            param: param.to_string(),
        }),
        1 => {
            let value: Option<String> = rows.remove(0).into();
            Ok(value.unwrap_or_default())
        }
        count => Err(DbError::UnexpectedRows {
            param: param.to_string(),
            count,
        }),
    }
}
