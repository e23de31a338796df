//! Product draft and API steps.

use futures::future::BoxFuture;

use catalog_test_utils::{generate_sku, ProductBuilder};

use super::{arg, number_arg};
use crate::error::{RunnerError, StepError, StepResult};
use crate::registry::{StepArgs, StepRegistry};
use crate::world::CatalogWorld;

pub fn register(
    registry: StepRegistry<CatalogWorld>,
) -> Result<StepRegistry<CatalogWorld>, RunnerError> {
    registry
        .given(r#"^the test code is "([^"]*)"$"#, the_test_code_is)?
        .given(r"^a product built from the defaults$", a_default_product)?
        .given(r#"^the product has the long description "([^"]*)"$"#, with_long_description)?
        .given(r#"^the product has the short description "([^"]*)"$"#, with_short_description)?
        .given(r"^the product has no optional fields$", without_optional_fields)?
        .given(r"^the product has (\d+) SKUs?$", with_skus)?
        .given(r"^the product codes are recomputed from the test code$", recompute_codes)?
        .when(r"^I create the product through the API$", create_draft_through_api)?
        .when(
            r#"^I create a product with the following details "([^"]*)" and "([^"]*)"$"#,
            create_product_with_details,
        )?
        .then(r"^the response status should be (\d+)$", response_status_should_be)?
        .then(r"^the product should be created successfully$", created_successfully)?
        .then(r#"^the built product code should be "([^"]*)"$"#, built_product_code_should_be)?
        .then(r"^the built product should have (\d+) SKUs?$", built_product_sku_count)
}

fn the_test_code_is(world: &mut CatalogWorld, args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move { world.set_test_code(arg(&args, 0)?) })
}

fn a_default_product(world: &mut CatalogWorld, _args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        world.draft = Some(ProductBuilder::new(&world.test_code));
        Ok(())
    })
}

fn with_long_description(world: &mut CatalogWorld, args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let description = arg(&args, 0)?.to_string();
        world.update_draft(|draft| draft.with_long_description(description));
        Ok(())
    })
}

fn with_short_description(world: &mut CatalogWorld, args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let description = arg(&args, 0)?.to_string();
        world.update_draft(|draft| draft.with_short_description(description));
        Ok(())
    })
}

fn without_optional_fields(world: &mut CatalogWorld, _args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        world.update_draft(ProductBuilder::without_optional_fields);
        Ok(())
    })
}

fn with_skus(world: &mut CatalogWorld, args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let count: usize = number_arg(&args, 0)?;
        let code = world.test_code.clone();
        world.update_draft(|draft| (0..count).fold(draft, |draft, _| draft.with_sku(generate_sku(&code))));
        Ok(())
    })
}

fn recompute_codes(world: &mut CatalogWorld, _args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let code = world.test_code.clone();
        world.update_draft(|draft| draft.with_test_code(&code));
        Ok(())
    })
}

fn create_draft_through_api(world: &mut CatalogWorld, _args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let product = world.current_product();
        world.send_product(product).await
    })
}

fn create_product_with_details(world: &mut CatalogWorld, args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let product = ProductBuilder::new(&world.test_code)
            .with_product_code(arg(&args, 0)?)
            .with_long_description(arg(&args, 1)?)
            .build();
        world.send_product(product).await?;

        let status = world.status()?;
        if status.as_u16() != 201 {
            return Err(StepError::assertion("response status", 201, status.as_u16()));
        }
        Ok(())
    })
}

fn response_status_should_be(world: &mut CatalogWorld, args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let expected: u16 = number_arg(&args, 0)?;
        let actual = world.status()?.as_u16();
        if actual != expected {
            return Err(StepError::assertion("response status", expected, actual));
        }
        Ok(())
    })
}

fn created_successfully(world: &mut CatalogWorld, _args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let actual = world.status()?.as_u16();
        if actual != 200 && actual != 201 {
            return Err(StepError::assertion("response status", "200 or 201", actual));
        }
        Ok(())
    })
}

fn built_product_code_should_be(world: &mut CatalogWorld, args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let expected = arg(&args, 0)?;
        let product = world.current_product();
        if product.product_code != expected {
            return Err(StepError::assertion("product code", expected, &product.product_code));
        }
        Ok(())
    })
}

fn built_product_sku_count(world: &mut CatalogWorld, args: StepArgs) -> BoxFuture<'_, StepResult> {
    Box::pin(async move {
        let expected: usize = number_arg(&args, 0)?;
        let actual = world.current_product().sku.len();
        if actual != expected {
            return Err(StepError::assertion("SKU count", expected, actual));
        }
        Ok(())
    })
}
