//! Default values and constants used across the harness.

/// Site identifier from system config
pub const SITE_ID: &str = "site1Id";
/// DIF identifier from system config
pub const DIF_ID: &str = "DIF";
/// 4-digit default value for the testcase id
pub const TC_ID: &str = "0000";
/// 2-digit default value for the variant
pub const VARIANT_NN: &str = "00";

pub const PRODUCT_CODE_PREFIX: &str = "PRD-";
pub const SHORT_DESCRIPTION_PREFIX: &str = "desc";
pub const PRODUCT_BARCODE_PREFIX: &str = "421";
pub const SKU_ID_PREFIX: &str = "SKU-";
pub const SKU_BARCODE_PREFIX: &str = "SKU";

pub const DEFAULT_LONG_DESCRIPTION: &str = "Automated test product";
pub const DEFAULT_IMAGE_URL: &str = "https://images.example.com/products/default.png";
pub const DEFAULT_PRODUCT_CLASS: &str = "GROCERY";
pub const DEFAULT_PRODUCT_HIERARCHY_ID: &str = "LOREWI";
pub const DEFAULT_TEMPERATURE_CLASS: &str = "AMBIENT";
pub const DEFAULT_STORAGE_AREA: &str = "DRY";
pub const DEFAULT_SELLABLE: bool = true;
pub const DEFAULT_SECURE: bool = false;
pub const DEFAULT_FAMILY_GROUP: &str = "Family Group 1";
pub const DEFAULT_SUBSTITUTION: &str = "DEFAULT";
pub const DEFAULT_BARCODE_TYPE: &str = "EACH";

pub const DEFAULT_SKU_DESCRIPTION: &str = "Product SKU";
pub const DEFAULT_UNIT_OF_MEASURE: &str = "EACH";
pub const DEFAULT_SUPPLIER_ID: &str = "Gelato Inc";
pub const DEFAULT_SUPPLIER_REFERENCE: &str = "stracciatella 500ml";
pub const DEFAULT_CURRENCY: &str = "GBP";
pub const DEFAULT_PRICE_CENTS: i64 = 123;
pub const DEFAULT_COUNTRY_OF_ORIGIN: &str = "GBR";

/// Product level and parent hierarchy used for direct database inserts
pub const DB_PRODUCT_LEVEL: &str = "PRD";
pub const DB_PARENT_ID: &str = "LOREWI";
pub const DB_PARENT_LEVEL: &str = "PH1";
