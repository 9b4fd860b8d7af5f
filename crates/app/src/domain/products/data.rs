//! Products Data

use crate::domain::products::records::{
    Category, FragranceType, ProductStatus, ProductUuid, TesterUuid,
};

/// Stock threshold used when none is given.
pub const DEFAULT_MINIMUM_STOCK: u32 = 10;

/// Size label used for testers when none is given.
pub const DEFAULT_TESTER_SIZE: &str = "5 ml";

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub details: ProductDetailsData,
}

/// Product Update Data
///
/// Updates replace every editable field; the SKU never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub details: ProductDetailsData,
}

/// Editable product fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetailsData {
    pub name: String,
    pub brand_name: String,
    pub description: Option<String>,
    pub category: Category,
    pub fragrance_type: FragranceType,
    pub notes: Option<String>,
    pub price: u64,
    pub discount_percentage: u8,
    pub stock_quantity: u32,
    pub minimum_stock: Option<u32>,
    pub status: ProductStatus,
}

/// New Tester Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewTester {
    pub uuid: TesterUuid,
    pub name: String,
    pub price: u64,
    pub size: Option<String>,
}
