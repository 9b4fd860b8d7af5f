//! Cart Data

use crate::domain::{
    carts::records::{CartLineRecord, CartLineUuid},
    products::records::{ProductUuid, TesterUuid},
};

/// New Cart Line Data
///
/// Adding a line whose product, tester and size match an existing line adds
/// to that line's quantity instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    pub uuid: CartLineUuid,
    pub product_uuid: ProductUuid,
    pub tester_uuid: Option<TesterUuid>,
    pub size: String,
    pub quantity: u32,
    pub unit_price: u64,
}

/// Result of importing one guest cart line.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// No server line existed for the variant; the guest line was stored.
    Added(CartLineRecord),

    /// A server line already exists for the variant and was left untouched.
    Conflict {
        guest: CartLineUuid,
        existing: CartLineRecord,
    },
}
