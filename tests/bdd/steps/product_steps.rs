use catalog_test_utils::builders::{build_product, products_root};
use catalog_test_utils::generate_sku;
use cucumber::{gherkin::Step, given, then, when};

use crate::steps::world::TestDataWorld;

#[given(expr = "the overrides set the long description to {string}")]
fn override_long_description(world: &mut TestDataWorld, description: String) {
    world.overrides.long_description = Some(description);
}

#[given(expr = "the overrides clear the image URL")]
fn override_image_url(world: &mut TestDataWorld) {
    world.overrides.image_url = Some(String::new());
}

#[given(expr = "the overrides attach {int} generated SKU(s)")]
fn override_skus(world: &mut TestDataWorld, count: usize) {
    let code = world.test_code.clone();
    world
        .overrides
        .skus
        .extend((0..count).map(|_| generate_sku(&code)));
}

#[when("the product is built")]
fn build(world: &mut TestDataWorld) {
    let overrides = std::mem::take(&mut world.overrides);
    world.product = Some(build_product(&world.test_code, overrides));
}

#[when("the products batch is built")]
fn build_root(world: &mut TestDataWorld) {
    world.root = Some(products_root(&world.test_code));
}

#[then(expr = "the product code should be {string}")]
fn product_code(world: &mut TestDataWorld, expected: String) {
    assert_eq!(world.product().product_code, expected);
}

#[then("the product should carry these values:")]
fn product_values(world: &mut TestDataWorld, step: &Step) {
    let product = serde_json::to_value(world.product()).expect("product serializes");
    let table = step.table.as_ref().expect("a table of field/value pairs");
    for row in table.rows.iter().skip(1) {
        let (field, expected) = (&row[0], &row[1]);
        assert_eq!(
            product[field.as_str()].as_str(),
            Some(expected.as_str()),
            "field {}",
            field
        );
    }
}

#[then(expr = "the product should have {int} SKU(s)")]
fn sku_count(world: &mut TestDataWorld, expected: usize) {
    assert_eq!(world.product().sku.len(), expected);
}

#[then(expr = "every identifier should contain {string}")]
fn identifiers_contain(world: &mut TestDataWorld, code: String) {
    let product = world.product();
    assert!(product.product_code.contains(&code));
    assert!(product.short_description.contains(&code));
    assert!(product.barcodes[0].barcode.contains(&code));
    for sku in &product.sku {
        assert!(sku.sku_id.contains(&code));
    }
}

#[then(expr = "the batch should hold {int} products with {int} SKU(s) in total")]
fn batch_shape(world: &mut TestDataWorld, products: usize, skus: usize) {
    let root = world.root.as_ref().expect("no batch has been built");
    assert_eq!(root.products.len(), products);
    assert_eq!(root.products.iter().map(|p| p.sku.len()).sum::<usize>(), skus);
}
