//! Cart Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    domain::{
        carts::{
            data::NewCartLine,
            records::{CartLineRecord, CartLineUuid},
        },
        columns::{to_db_amount, to_db_count, try_get_amount, try_get_count},
        products::records::{ProductUuid, TesterUuid},
    },
    identity::UserUuid,
};

const LIST_LINES_SQL: &str = include_str!("sql/list_lines.sql");
const FIND_LINE_BY_VARIANT_SQL: &str = include_str!("sql/find_line_by_variant.sql");
const LOCK_LINES_SQL: &str = include_str!("sql/lock_lines.sql");
const UPSERT_LINE_SQL: &str = include_str!("sql/upsert_line.sql");
const INSERT_LINE_IF_ABSENT_SQL: &str = include_str!("sql/insert_line_if_absent.sql");
const UPDATE_QUANTITY_SQL: &str = include_str!("sql/update_quantity.sql");
const DELETE_LINE_SQL: &str = include_str!("sql/delete_line.sql");
const DELETE_LINES_SQL: &str = include_str!("sql/delete_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(LIST_LINES_SQL)
            .bind(owner.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_line_by_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        line: &NewCartLine,
    ) -> Result<CartLineRecord, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(FIND_LINE_BY_VARIANT_SQL)
            .bind(owner.into_uuid())
            .bind(line.product_uuid.into_uuid())
            .bind(line.tester_uuid.map(TesterUuid::into_uuid))
            .bind(&line.size)
            .fetch_one(&mut **tx)
            .await
    }

    /// Lock the owner's lines, or only `selection` when given, for checkout.
    pub(crate) async fn lock_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        selection: Option<&[CartLineUuid]>,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        let selection: Option<Vec<Uuid>> =
            selection.map(|lines| lines.iter().map(|line| line.into_uuid()).collect());

        query_as::<Postgres, CartLineRecord>(LOCK_LINES_SQL)
            .bind(owner.into_uuid())
            .bind(selection)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        line: &NewCartLine,
    ) -> Result<CartLineRecord, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(UPSERT_LINE_SQL)
            .bind(line.uuid.into_uuid())
            .bind(owner.into_uuid())
            .bind(line.product_uuid.into_uuid())
            .bind(line.tester_uuid.map(TesterUuid::into_uuid))
            .bind(&line.size)
            .bind(to_db_count(line.quantity, "quantity")?)
            .bind(to_db_amount(line.unit_price, "unit_price")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Insert `line` unless the owner already has a line for the same variant.
    pub(crate) async fn insert_line_if_absent(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        line: &NewCartLine,
    ) -> Result<Option<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(INSERT_LINE_IF_ABSENT_SQL)
            .bind(line.uuid.into_uuid())
            .bind(owner.into_uuid())
            .bind(line.product_uuid.into_uuid())
            .bind(line.tester_uuid.map(TesterUuid::into_uuid))
            .bind(&line.size)
            .bind(to_db_count(line.quantity, "quantity")?)
            .bind(to_db_amount(line.unit_price, "unit_price")?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<CartLineRecord, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(UPDATE_QUANTITY_SQL)
            .bind(line.into_uuid())
            .bind(owner.into_uuid())
            .bind(to_db_count(quantity, "quantity")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        line: CartLineUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_LINE_SQL)
            .bind(line.into_uuid())
            .bind(owner.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: UserUuid,
        lines: &[CartLineUuid],
    ) -> Result<u64, sqlx::Error> {
        let lines: Vec<Uuid> = lines.iter().map(|line| line.into_uuid()).collect();

        let rows_affected = query(DELETE_LINES_SQL)
            .bind(owner.into_uuid())
            .bind(lines)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartLineUuid::from_uuid(row.try_get("uuid")?),
            owner_uuid: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            tester_uuid: row
                .try_get::<Option<Uuid>, _>("tester_uuid")?
                .map(TesterUuid::from_uuid),
            tester_name: row.try_get("tester_name")?,
            size: row.try_get("size")?,
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
