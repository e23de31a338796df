use catalog_test_utils::data_generators::TestVariables;
use catalog_test_utils::{Product, ProductOverrides, Root, TestCode, TestCodeError};
use cucumber::World;

/// State shared between the steps of one scenario
#[derive(Debug, Default, World)]
pub struct TestDataWorld {
    pub test_code: TestCode,
    pub last_error: Option<TestCodeError>,
    pub overrides: ProductOverrides,
    pub product: Option<Product>,
    pub root: Option<Root>,
    pub variables: Option<TestVariables>,
}

impl TestDataWorld {
    pub fn product(&self) -> &Product {
        self.product.as_ref().expect("no product has been built")
    }
}
