//! Orders Repository

use aura::{PaymentMethod, Quote};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};

use crate::{
    domain::{
        columns::{to_db_amount, try_get_amount, try_get_parsed, try_get_total},
        customers::data::Contact,
        orders::{
            data::{OrderFilter, OrderUpdate},
            records::{
                OrderItem, OrderRecord, OrderStatistics, OrderStatus, OrderUuid, PaymentStatus,
            },
        },
    },
    identity::UserUuid,
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const UPDATE_ORDER_SQL: &str = include_str!("sql/update_order.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");
const ORDER_STATISTICS_SQL: &str = include_str!("sql/order_statistics.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[expect(clippy::too_many_arguments, reason = "mirrors the order row")]
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        owner: UserUuid,
        contact: &Contact,
        quote: &Quote,
        payment_method: PaymentMethod,
        items: &[OrderItem],
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(owner.into_uuid())
            .bind(&contact.name)
            .bind(&contact.phone)
            .bind(&contact.email)
            .bind(&contact.city)
            .bind(&contact.address)
            .bind(&contact.postal_code)
            .bind(to_db_amount(quote.subtotal, "subtotal")?)
            .bind(to_db_amount(quote.shipping, "shipping_fee")?)
            .bind(to_db_amount(quote.surcharge, "cod_surcharge")?)
            .bind(to_db_amount(quote.total, "total")?)
            .bind(payment_method.as_str())
            .bind(Json(items))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: OrderFilter,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(filter.owner.map(UserUuid::into_uuid))
            .bind(filter.order_status.map(OrderStatus::as_str))
            .bind(filter.payment_status.map(PaymentStatus::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(UPDATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(update.order_status.map(OrderStatus::as_str))
            .bind(update.payment_status.map(PaymentStatus::as_str))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn order_statistics(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<OrderStatistics, sqlx::Error> {
        let row = query(ORDER_STATISTICS_SQL).fetch_one(&mut **tx).await?;

        Ok(OrderStatistics {
            total_orders: try_get_total(&row, "total_orders")?,
            pending: try_get_total(&row, "pending")?,
            processing: try_get_total(&row, "processing")?,
            shipped: try_get_total(&row, "shipped")?,
            delivered: try_get_total(&row, "delivered")?,
            cancelled: try_get_total(&row, "cancelled")?,
            revenue: try_get_total(&row, "revenue")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(items) = row.try_get::<Json<Vec<OrderItem>>, _>("items")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            owner_uuid: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            contact: Contact {
                name: row.try_get("customer_name")?,
                phone: row.try_get("phone")?,
                email: row.try_get("email")?,
                city: row.try_get("city")?,
                address: row.try_get("address")?,
                postal_code: row.try_get("postal_code")?,
            },
            subtotal: try_get_amount(row, "subtotal")?,
            shipping_fee: try_get_amount(row, "shipping_fee")?,
            cod_surcharge: try_get_amount(row, "cod_surcharge")?,
            total: try_get_amount(row, "total")?,
            payment_method: try_get_parsed(row, "payment_method")?,
            payment_status: try_get_parsed(row, "payment_status")?,
            order_status: try_get_parsed(row, "order_status")?,
            items,
            transaction_reference: row.try_get("transaction_reference")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
