//! Customer Records

use jiff::Timestamp;

use crate::{domain::customers::data::Contact, identity::UserUuid};

/// Customer Record
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub owner_uuid: UserUuid,
    pub contact: Contact,
    pub total_spent: u64,
    pub total_orders: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user's ledger totals; zero for users who have never ordered.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerBalance {
    pub owner_uuid: UserUuid,
    pub contact: Option<Contact>,
    pub total_spent: u64,
    pub total_orders: u64,
}

impl LedgerBalance {
    #[must_use]
    pub fn empty(owner_uuid: UserUuid) -> Self {
        Self {
            owner_uuid,
            contact: None,
            total_spent: 0,
            total_orders: 0,
        }
    }
}

impl From<CustomerRecord> for LedgerBalance {
    fn from(record: CustomerRecord) -> Self {
        Self {
            owner_uuid: record.owner_uuid,
            contact: Some(record.contact),
            total_spent: record.total_spent,
            total_orders: record.total_orders,
        }
    }
}
