//! Database steps: direct inserts and verification of stored products.

use futures::future::BoxFuture;
use tracing::info;

use catalog_test_utils::data_generators::defaults::{DB_PARENT_ID, DB_PARENT_LEVEL, DB_PRODUCT_LEVEL};
use catalog_test_utils::store::queries;

use super::arg;
use crate::error::{RunnerError, StepError, StepResult};
use crate::registry::{StepArgs, StepRegistry};
use crate::world::CatalogWorld;

pub fn register(
    registry: StepRegistry<CatalogWorld>,
) -> Result<StepRegistry<CatalogWorld>, RunnerError> {
    registry
        .when(
            r#"^I create a product on the database with the following details "([^"]*)" and "([^"]*)"$"#,
            insert_product,
        )?
        .then(
            r#"^the product should be in the database with name "([^"]*)"$"#,
            stored_name_should_be,
        )?
        .then(
            r#"^the product should be in the database with short description "([^"]*)"$"#,
            stored_short_description_should_be,
        )?
        .then(
            r"^the database should hold the description that was sent$",
            stored_description_matches_sent,
        )
}

fn insert_product(world: &mut CatalogWorld, args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let product_id = arg(&args, 0)?.to_string();
        let name = arg(&args, 1)?.to_string();
        let params = vec![
            product_id.clone(),
            DB_PRODUCT_LEVEL.to_string(),
            DB_PARENT_ID.to_string(),
            DB_PARENT_LEVEL.to_string(),
            name.clone(),
        ];

        let affected = world.store().execute(queries::INSERT_PRODUCT, &params).await?;
        info!(product_id = %product_id, rows = affected, "Product inserted");

        world.created_product_id = Some(product_id);
        world.sent_long_description = Some(name);
        Ok(())
    })
}

/// Reads `query` for the created product and compares it with `expected`.
async fn expect_stored(world: &CatalogWorld, query: &str, what: &str, expected: &str) -> StepResult {
    let product_id = world.product_id()?;
    let actual = world.store().fetch_scalar(query, product_id).await?;
    if actual != expected {
        return Err(StepError::assertion(what, expected, actual));
    }
    Ok(())
}

fn stored_name_should_be(world: &mut CatalogWorld, args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let expected = arg(&args, 0)?;
        expect_stored(world, queries::LONG_DESCRIPTION_BY_ID, "product name", expected).await
    })
}

fn stored_short_description_should_be(
    world: &mut CatalogWorld,
    args: StepArgs,
) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let expected = arg(&args, 0)?;
        expect_stored(world, queries::SHORT_DESCRIPTION_BY_ID, "short description", expected).await
    })
}

fn stored_description_matches_sent(
    world: &mut CatalogWorld,
    _args: StepArgs,
) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let sent = world
            .sent_long_description
            .clone()
            .ok_or_else(|| StepError::Precondition("no description has been sent".to_string()))?;
        expect_stored(world, queries::LONG_DESCRIPTION_BY_ID, "description", &sent).await
    })
}
