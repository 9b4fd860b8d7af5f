//! Payment Records

use std::fmt;

use uuid::Uuid;

use crate::{
    domain::orders::records::{OrderUuid, PaymentStatus},
    identity::UserUuid,
};

/// Reference issued by the simulated gateway for an approved charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReference(String);

impl TransactionReference {
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("SIM-{}", Uuid::now_v7().simple()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The payment-relevant columns of a locked order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayableOrder {
    pub uuid: OrderUuid,
    pub owner_uuid: UserUuid,
    pub total: u64,
    pub payment_status: PaymentStatus,
}

/// Outcome of an approved charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub order: OrderUuid,
    pub reference: TransactionReference,
    pub amount: u64,
    pub card_last_four: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn references_are_prefixed_and_unique() {
        let first = TransactionReference::generate();
        let second = TransactionReference::generate();

        assert!(first.as_str().starts_with("SIM-"), "got {first}");
        assert_ne!(first, second);
    }
}
