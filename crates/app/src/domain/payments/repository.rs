//! Payments Repository

use sqlx::{Postgres, Row, Transaction, query};

use crate::{
    domain::{
        columns::{try_get_amount, try_get_parsed},
        orders::records::{OrderUuid, PaymentStatus},
        payments::records::{PayableOrder, TransactionReference},
    },
    identity::UserUuid,
};

const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const RECORD_PAYMENT_SQL: &str = include_str!("sql/record_payment.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPaymentsRepository;

impl PgPaymentsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock the order row for the rest of the transaction.
    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<PayableOrder, sqlx::Error> {
        let row = query(LOCK_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        Ok(PayableOrder {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            owner_uuid: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            total: try_get_amount(&row, "total")?,
            payment_status: try_get_parsed(&row, "payment_status")?,
        })
    }

    pub(crate) async fn record_payment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: PaymentStatus,
        reference: Option<&TransactionReference>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(RECORD_PAYMENT_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(reference.map(TransactionReference::as_str))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
