//! Customers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    domain::{
        columns::{to_db_amount, try_get_total},
        customers::{data::Contact, records::CustomerRecord},
    },
    identity::UserUuid,
};

const UPSERT_ON_ORDER_SQL: &str = include_str!("sql/upsert_on_order.sql");
const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");
const LIST_CUSTOMERS_SQL: &str = include_str!("sql/list_customers.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCustomersRepository;

impl PgCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Record an order against the owner's ledger, creating it on first use.
    pub(crate) async fn upsert_on_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        contact: &Contact,
        total: u64,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(UPSERT_ON_ORDER_SQL)
            .bind(owner.into_uuid())
            .bind(&contact.name)
            .bind(&contact.phone)
            .bind(&contact.email)
            .bind(&contact.city)
            .bind(&contact.address)
            .bind(&contact.postal_code)
            .bind(to_db_amount(total, "total_spent")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<Option<CustomerRecord>, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(GET_CUSTOMER_SQL)
            .bind(owner.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_customers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CustomerRecord>, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(LIST_CUSTOMERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CustomerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            owner_uuid: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            contact: Contact {
                name: row.try_get("name")?,
                phone: row.try_get("phone")?,
                email: row.try_get("email")?,
                city: row.try_get("city")?,
                address: row.try_get("address")?,
                postal_code: row.try_get("postal_code")?,
            },
            total_spent: try_get_total(row, "total_spent")?,
            total_orders: try_get_total(row, "total_orders")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
