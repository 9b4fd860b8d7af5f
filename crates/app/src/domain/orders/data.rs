//! Order Data

use aura::PaymentMethod;

use crate::{
    domain::{
        carts::records::CartLineUuid,
        customers::data::Contact,
        orders::records::{OrderStatus, OrderUuid, PaymentStatus},
    },
    identity::UserUuid,
};

/// Which of the owner's cart lines an order consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineSelection {
    /// Every line in the cart.
    All,

    /// Exactly these lines; every one must exist.
    Only(Vec<CartLineUuid>),
}

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub contact: Contact,
    pub payment_method: PaymentMethod,
    pub selection: LineSelection,
}

/// Order listing filter. Unset fields match everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderFilter {
    pub owner: Option<UserUuid>,
    pub order_status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

/// Back-office order update. The two statuses move independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderUpdate {
    pub order_status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
}

impl OrderUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order_status.is_none() && self.payment_status.is_none()
    }
}
