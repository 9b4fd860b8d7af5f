//! Order Records

use std::{fmt, str::FromStr};

use aura::{PaymentMethod, PricedLine};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        UnknownVariant,
        carts::records::{CartLineRecord, CartLineUuid},
        customers::data::Contact,
        products::records::{ProductUuid, TesterUuid},
    },
    identity::UserUuid,
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Fulfilment state, moved by the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("order status", s))
    }
}

/// Settlement state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            other => Err(UnknownVariant::new("payment status", other)),
        }
    }
}

/// A cart line as it was when the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub line_uuid: CartLineUuid,
    pub product_uuid: ProductUuid,
    pub tester_uuid: Option<TesterUuid>,
    pub product_name: String,
    pub tester_name: Option<String>,
    pub size: String,
    pub quantity: u32,
    pub unit_price: u64,
}

impl From<&CartLineRecord> for OrderItem {
    fn from(line: &CartLineRecord) -> Self {
        Self {
            line_uuid: line.uuid,
            product_uuid: line.product_uuid,
            tester_uuid: line.tester_uuid,
            product_name: line.product_name.clone(),
            tester_name: line.tester_name.clone(),
            size: line.size.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

impl PricedLine for OrderItem {
    fn unit_price(&self) -> u64 {
        self.unit_price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Order Record
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub owner_uuid: UserUuid,
    pub contact: Contact,
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub cod_surcharge: u64,
    pub total: u64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub transaction_reference: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Back-office order counts and revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderStatistics {
    pub total_orders: u64,
    pub pending: u64,
    pub processing: u64,
    pub shipped: u64,
    pub delivered: u64,
    pub cancelled: u64,

    /// Sum of totals of paid orders.
    pub revenue: u64,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn order_items_serialize_with_stable_field_names() -> TestResult {
        let item = OrderItem {
            line_uuid: CartLineUuid::new(),
            product_uuid: ProductUuid::new(),
            tester_uuid: None,
            product_name: "Oud Royale".to_string(),
            tester_name: None,
            size: "100 ml".to_string(),
            quantity: 2,
            unit_price: 100_00,
        };

        let json = serde_json::to_value(&item)?;

        assert_eq!(json["product_name"], "Oud Royale");
        assert_eq!(json["unit_price"], 10_000);
        assert!(json["tester_uuid"].is_null(), "missing tester should be null");
        assert_eq!(serde_json::from_value::<OrderItem>(json)?, item);

        Ok(())
    }

    #[test]
    fn statuses_parse_their_storage_names() -> TestResult {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
        }

        assert_eq!("failed".parse::<PaymentStatus>()?, PaymentStatus::Failed);
        assert!("refunded".parse::<PaymentStatus>().is_err());

        Ok(())
    }
}
