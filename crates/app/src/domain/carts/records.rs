//! Cart Records

use aura::PricedLine;
use jiff::Timestamp;

use crate::{
    domain::products::records::{ProductUuid, TesterUuid},
    identity::UserUuid,
    uuids::TypedUuid,
};

/// Cart Line UUID
pub type CartLineUuid = TypedUuid<CartLineRecord>;

/// Cart Line Record
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineRecord {
    pub uuid: CartLineUuid,
    pub owner_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub tester_uuid: Option<TesterUuid>,
    pub tester_name: Option<String>,
    pub size: String,
    pub quantity: u32,
    pub unit_price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PricedLine for CartLineRecord {
    fn unit_price(&self) -> u64 {
        self.unit_price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}
