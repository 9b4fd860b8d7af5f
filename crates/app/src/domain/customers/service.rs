//! Customers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::customers::{
        errors::CustomersServiceError,
        records::{CustomerRecord, LedgerBalance},
        repository::PgCustomersRepository,
    },
    identity::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn get_by_owner(&self, owner: UserUuid) -> Result<LedgerBalance, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customer = self.repository.get_customer(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(customer.map_or_else(|| LedgerBalance::empty(owner), LedgerBalance::from))
    }

    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let customers = self.repository.list_customers(&mut tx).await?;

        tx.commit().await?;

        Ok(customers)
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// The owner's ledger totals, zero if they have never ordered.
    async fn get_by_owner(&self, owner: UserUuid) -> Result<LedgerBalance, CustomersServiceError>;

    /// All customers, most recently active first.
    async fn list_customers(&self) -> Result<Vec<CustomerRecord>, CustomersServiceError>;
}
