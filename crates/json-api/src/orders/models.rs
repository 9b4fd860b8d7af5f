//! Order request and response bodies.

use aura::CurrencyConversion;
use aura_app::domain::{
    customers::data::Contact,
    orders::{
        data::LineSelection,
        records::{OrderItem, OrderRecord, OrderStatistics},
    },
};
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::MoneyResponse;

/// Delivery contact, as sent at checkout and echoed back on orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactBody {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub city: String,
    pub address: String,
    pub postal_code: String,
}

impl From<ContactBody> for Contact {
    fn from(body: ContactBody) -> Self {
        Contact {
            name: body.name,
            phone: body.phone,
            email: body.email,
            city: body.city,
            address: body.address,
            postal_code: body.postal_code,
        }
    }
}

impl From<Contact> for ContactBody {
    fn from(contact: Contact) -> Self {
        ContactBody {
            name: contact.name,
            phone: contact.phone,
            email: contact.email,
            city: contact.city,
            address: contact.address,
            postal_code: contact.postal_code,
        }
    }
}

/// The literal `"all"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AllLines {
    All,
}

/// Which cart lines to order: `"all"` or a list of line ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum SelectionRequest {
    All(AllLines),
    Lines(Vec<Uuid>),
}

impl From<SelectionRequest> for LineSelection {
    fn from(selection: SelectionRequest) -> Self {
        match selection {
            SelectionRequest::All(AllLines::All) => LineSelection::All,
            SelectionRequest::Lines(lines) => {
                LineSelection::Only(lines.into_iter().map(Into::into).collect())
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_uuid: Uuid,
    pub tester_uuid: Option<Uuid>,
    pub product_name: String,
    pub tester_name: Option<String>,
    pub size: String,
    pub quantity: u32,
    pub unit_price: MoneyResponse,
}

impl OrderItemResponse {
    fn new(item: OrderItem, conversion: &CurrencyConversion) -> Result<Self, StatusError> {
        Ok(Self {
            product_uuid: item.product_uuid.into(),
            tester_uuid: item.tester_uuid.map(Uuid::from),
            unit_price: MoneyResponse::new(conversion, item.unit_price)?,
            product_name: item.product_name,
            tester_name: item.tester_name,
            size: item.size,
            quantity: item.quantity,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub owner_uuid: Uuid,
    pub contact: ContactBody,
    pub items: Vec<OrderItemResponse>,
    pub subtotal: MoneyResponse,
    pub shipping_fee: MoneyResponse,
    pub cod_surcharge: MoneyResponse,
    pub total: MoneyResponse,

    /// `cash_on_delivery` or `bank_transfer`
    pub payment_method: String,

    /// `pending`, `paid` or `failed`
    pub payment_status: String,

    /// `pending`, `processing`, `shipped`, `delivered` or `cancelled`
    pub order_status: String,

    /// Gateway reference of the approved payment, if any
    pub transaction_reference: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl OrderResponse {
    pub(crate) fn new(
        order: OrderRecord,
        conversion: &CurrencyConversion,
    ) -> Result<Self, StatusError> {
        Ok(Self {
            uuid: order.uuid.into(),
            owner_uuid: order.owner_uuid.into(),
            subtotal: MoneyResponse::new(conversion, order.subtotal)?,
            shipping_fee: MoneyResponse::new(conversion, order.shipping_fee)?,
            cod_surcharge: MoneyResponse::new(conversion, order.cod_surcharge)?,
            total: MoneyResponse::new(conversion, order.total)?,
            payment_method: order.payment_method.to_string(),
            payment_status: order.payment_status.to_string(),
            order_status: order.order_status.to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemResponse::new(item, conversion))
                .collect::<Result<_, _>>()?,
            contact: order.contact.into(),
            transaction_reference: order.transaction_reference,
        })
    }

    pub(crate) fn many(
        orders: Vec<OrderRecord>,
        conversion: &CurrencyConversion,
    ) -> Result<Vec<Self>, StatusError> {
        orders
            .into_iter()
            .map(|order| Self::new(order, conversion))
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatisticsResponse {
    pub total_orders: u64,
    pub pending: u64,
    pub processing: u64,
    pub shipped: u64,
    pub delivered: u64,
    pub cancelled: u64,

    /// Sum of totals of paid orders
    pub revenue: MoneyResponse,
}

impl OrderStatisticsResponse {
    pub(crate) fn new(
        statistics: OrderStatistics,
        conversion: &CurrencyConversion,
    ) -> Result<Self, StatusError> {
        Ok(Self {
            total_orders: statistics.total_orders,
            pending: statistics.pending,
            processing: statistics.processing,
            shipped: statistics.shipped,
            delivered: statistics.delivered,
            cancelled: statistics.cancelled,
            revenue: MoneyResponse::new(conversion, statistics.revenue)?,
        })
    }
}
