//! Product and SKU builders for dynamic test data.

use crate::data_generators::defaults::*;
use crate::data_generators::TestCode;
use crate::model::{
    Barcode, Product, RetailPrice, Root, ScalarUnit, Sku, SkuUom, UnitsPerParent,
};

/// Builder for product payloads.
///
/// Starts from a complete default product derived from a [`TestCode`] and
/// applies overrides in call order. Codes are derived once: calling
/// [`ProductBuilder::with_test_code`] refreshes the product code, short
/// description and primary barcode, but SKUs that were already attached
/// keep the identifiers they were generated with.
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    /// Creates a builder holding the default product for `code`.
    pub fn new(code: &TestCode) -> Self {
        Self {
            product: Product {
                product_code: format!("{}{}", PRODUCT_CODE_PREFIX, code),
                long_description: DEFAULT_LONG_DESCRIPTION.to_string(),
                short_description: format!("{}{}", SHORT_DESCRIPTION_PREFIX, code),
                image_url: DEFAULT_IMAGE_URL.to_string(),
                product_class: DEFAULT_PRODUCT_CLASS.to_string(),
                product_hierarchy_id: DEFAULT_PRODUCT_HIERARCHY_ID.to_string(),
                temperature_class: DEFAULT_TEMPERATURE_CLASS.to_string(),
                storage_area: DEFAULT_STORAGE_AREA.to_string(),
                picking_code_check_required: false,
                putaway_code_check_required: false,
                barcode_scan_required: true,
                barcodes: vec![Barcode {
                    barcode: format!("{}{}", PRODUCT_BARCODE_PREFIX, code),
                    barcode_type: DEFAULT_BARCODE_TYPE.to_string(),
                }],
                sellable: DEFAULT_SELLABLE,
                age_restriction: 0,
                can_taint: false,
                can_be_tainted: false,
                hazardous: "string".to_string(),
                restricted: "string".to_string(),
                family_group: DEFAULT_FAMILY_GROUP.to_string(),
                secure: DEFAULT_SECURE,
                catchweight: true,
                loose: true,
                pre_pick: false,
                in_store_bakery: false,
                security_tagged: false,
                goods_not_ready: false,
                made_to_order: false,
                counter: false,
                organic: true,
                virtual_stock: false,
                always_bag: false,
                sku: Vec::new(),
                substitution_from: DEFAULT_SUBSTITUTION.to_string(),
                substitution_to: DEFAULT_SUBSTITUTION.to_string(),
                substitution_mode: DEFAULT_SUBSTITUTION.to_string(),
            },
        }
    }

    pub fn with_long_description(mut self, description: impl Into<String>) -> Self {
        self.product.long_description = description.into();
        self
    }

    pub fn with_short_description(mut self, description: impl Into<String>) -> Self {
        self.product.short_description = description.into();
        self
    }

    /// Replaces the product code; barcodes are left alone.
    pub fn with_product_code(mut self, product_code: impl Into<String>) -> Self {
        self.product.product_code = product_code.into();
        self
    }

    /// Clears the long description, short description and image URL.
    pub fn without_optional_fields(mut self) -> Self {
        self.product.long_description.clear();
        self.product.short_description.clear();
        self.product.image_url.clear();
        self
    }

    /// Appends a SKU. The first SKU attached is the primary one.
    pub fn with_sku(mut self, sku: Sku) -> Self {
        self.product.sku.push(sku);
        self
    }

    /// Re-derives the product code, short description and primary barcode.
    pub fn with_test_code(mut self, code: &TestCode) -> Self {
        self.product.product_code = format!("{}{}", PRODUCT_CODE_PREFIX, code);
        self.product.short_description = format!("{}{}", SHORT_DESCRIPTION_PREFIX, code);
        let barcode = format!("{}{}", PRODUCT_BARCODE_PREFIX, code);
        match self.product.barcodes.first_mut() {
            Some(primary) => primary.barcode = barcode,
            None => self.product.barcodes.push(Barcode {
                barcode,
                barcode_type: DEFAULT_BARCODE_TYPE.to_string(),
            }),
        }
        self
    }

    /// Peek at the product under construction.
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn build(self) -> Product {
        self.product
    }
}

/// Named overrides applied on top of the default product.
///
/// `None` keeps the default; `Some(String::new())` clears the field.
#[derive(Debug, Clone, Default)]
pub struct ProductOverrides {
    pub product_code: Option<String>,
    pub long_description: Option<String>,
    pub short_description: Option<String>,
    pub image_url: Option<String>,
    pub skus: Vec<Sku>,
}

/// Builds a product from `code` and `overrides` without intermediate state.
pub fn build_product(code: &TestCode, overrides: ProductOverrides) -> Product {
    let ProductOverrides {
        product_code,
        long_description,
        short_description,
        image_url,
        skus,
    } = overrides;

    let mut builder = ProductBuilder::new(code);
    if let Some(product_code) = product_code {
        builder = builder.with_product_code(product_code);
    }
    if let Some(description) = long_description {
        builder = builder.with_long_description(description);
    }
    if let Some(description) = short_description {
        builder = builder.with_short_description(description);
    }
    let mut product = skus
        .into_iter()
        .fold(builder, ProductBuilder::with_sku)
        .build();
    if let Some(image_url) = image_url {
        product.image_url = image_url;
    }
    product
}

/// Generates a SKU whose identifiers are derived from `code`.
pub fn generate_sku(code: &TestCode) -> Sku {
    Sku {
        sku_id: format!("{}{}", SKU_ID_PREFIX, code),
        description: DEFAULT_SKU_DESCRIPTION.to_string(),
        sku_uom: vec![SkuUom {
            unit_of_measure: DEFAULT_UNIT_OF_MEASURE.to_string(),
            height: ScalarUnit::new(50, "MM"),
            width: ScalarUnit::new(60, "MM"),
            depth: ScalarUnit::new(70, "MM"),
            volume: ScalarUnit::new(210, "CC"),
            weight: ScalarUnit::new(100, "G"),
            units_per_parent: vec![UnitsPerParent {
                unit_of_measure: DEFAULT_UNIT_OF_MEASURE.to_string(),
                no_of_units: 23,
            }],
        }],
        supplier_id: DEFAULT_SUPPLIER_ID.to_string(),
        supplier_reference: DEFAULT_SUPPLIER_REFERENCE.to_string(),
        minimum_life_on_receipt: 8,
        minimum_life_on_despatch: 7,
        retail_price: RetailPrice {
            cents_value: DEFAULT_PRICE_CENTS,
            currency: DEFAULT_CURRENCY.to_string(),
        },
        country_of_origin: DEFAULT_COUNTRY_OF_ORIGIN.to_string(),
        sku_barcodes: vec![Barcode {
            barcode: format!("{}{}", SKU_BARCODE_PREFIX, code),
            barcode_type: DEFAULT_BARCODE_TYPE.to_string(),
        }],
    }
}

/// A product carrying only mandatory fields and a single SKU.
pub fn product_with_mandatory_fields(code: &TestCode) -> Product {
    ProductBuilder::new(code)
        .without_optional_fields()
        .with_sku(generate_sku(code))
        .build()
}

/// A default product with two SKUs.
pub fn product_with_multiple_skus(code: &TestCode) -> Product {
    ProductBuilder::new(code)
        .with_sku(generate_sku(code))
        .with_sku(generate_sku(code))
        .build()
}

/// A default product with an optional long description and the given SKUs.
///
/// An empty description keeps the default.
pub fn product_with_custom_fields(code: &TestCode, long_description: &str, skus: Vec<Sku>) -> Product {
    let mut builder = ProductBuilder::new(code);
    if !long_description.is_empty() {
        builder = builder.with_long_description(long_description);
    }
    skus.into_iter().fold(builder, ProductBuilder::with_sku).build()
}

/// A batch holding the mandatory-fields product and the multi-SKU product.
pub fn products_root(code: &TestCode) -> Root {
    Root {
        products: vec![
            product_with_mandatory_fields(code),
            product_with_multiple_skus(code),
        ],
    }
}
