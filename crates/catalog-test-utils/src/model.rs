//! Product catalog message types as accepted by the product API.

use serde::{Deserialize, Serialize};

/// Batch payload containing a list of products
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Root {
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    pub barcode: String,
    pub barcode_type: String,
}

/// Dimensions and other scalar measurements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarUnit {
    pub scalar: i64,
    pub units: String,
}

impl ScalarUnit {
    pub fn new(scalar: i64, units: &str) -> Self {
        Self {
            scalar,
            units: units.to_string(),
        }
    }
}

/// How many units make up the parent unit of measure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitsPerParent {
    pub unit_of_measure: String,
    pub no_of_units: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuUom {
    pub unit_of_measure: String,
    pub height: ScalarUnit,
    pub width: ScalarUnit,
    pub depth: ScalarUnit,
    pub volume: ScalarUnit,
    pub weight: ScalarUnit,
    pub units_per_parent: Vec<UnitsPerParent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetailPrice {
    pub cents_value: i64,
    pub currency: String,
}

/// A sellable variant of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub sku_id: String,
    pub description: String,
    pub sku_uom: Vec<SkuUom>,
    pub supplier_id: String,
    pub supplier_reference: String,
    pub minimum_life_on_receipt: i64,
    pub minimum_life_on_despatch: i64,
    pub retail_price: RetailPrice,
    pub country_of_origin: String,
    pub sku_barcodes: Vec<Barcode>,
}

/// The product message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_code: String,
    pub long_description: String,
    pub short_description: String,
    pub image_url: String,
    pub product_class: String,
    pub product_hierarchy_id: String,
    pub temperature_class: String,
    pub storage_area: String,
    pub picking_code_check_required: bool,
    pub putaway_code_check_required: bool,
    pub barcode_scan_required: bool,
    pub barcodes: Vec<Barcode>,
    pub sellable: bool,
    pub age_restriction: i64,
    pub can_taint: bool,
    pub can_be_tainted: bool,
    pub hazardous: String,
    pub restricted: String,
    pub family_group: String,
    pub secure: bool,
    pub catchweight: bool,
    pub loose: bool,
    pub pre_pick: bool,
    pub in_store_bakery: bool,
    pub security_tagged: bool,
    pub goods_not_ready: bool,
    pub made_to_order: bool,
    pub counter: bool,
    pub organic: bool,
    pub virtual_stock: bool,
    pub always_bag: bool,
    pub sku: Vec<Sku>,
    pub substitution_from: String,
    pub substitution_to: String,
    pub substitution_mode: String,
}

impl Product {
    /// The first barcode, by convention the primary one
    pub fn primary_barcode(&self) -> Option<&Barcode> {
        self.barcodes.first()
    }

    /// The first attached SKU, by convention the primary one
    pub fn primary_sku(&self) -> Option<&Sku> {
        self.sku.first()
    }
}
