//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    columns::{to_db_amount, to_db_count, try_get_amount, try_get_count, try_get_parsed, try_get_total},
    products::{
        data::{DEFAULT_MINIMUM_STOCK, NewTester, ProductDetailsData},
        records::{
            Category, Collections, ProductRecord, ProductUuid, TesterRecord, TesterUuid,
        },
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const LIST_TESTERS_SQL: &str = include_str!("sql/list_testers.sql");
const CREATE_TESTER_SQL: &str = include_str!("sql/create_tester.sql");
const COUNT_COLLECTIONS_SQL: &str = include_str!("sql/count_collections.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: Option<Category>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .bind(category.map(Category::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        sku: &str,
        details: &ProductDetailsData,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(&details.name)
            .bind(&details.brand_name)
            .bind(&details.description)
            .bind(details.category.as_str())
            .bind(details.fragrance_type.as_str())
            .bind(&details.notes)
            .bind(to_db_amount(details.price, "price")?)
            .bind(i16::from(details.discount_percentage))
            .bind(sku)
            .bind(to_db_count(details.stock_quantity, "stock_quantity")?)
            .bind(to_db_count(
                details.minimum_stock.unwrap_or(DEFAULT_MINIMUM_STOCK),
                "minimum_stock",
            )?)
            .bind(details.status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        details: &ProductDetailsData,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(&details.name)
            .bind(&details.brand_name)
            .bind(&details.description)
            .bind(details.category.as_str())
            .bind(details.fragrance_type.as_str())
            .bind(&details.notes)
            .bind(to_db_amount(details.price, "price")?)
            .bind(i16::from(details.discount_percentage))
            .bind(to_db_count(details.stock_quantity, "stock_quantity")?)
            .bind(to_db_count(
                details.minimum_stock.unwrap_or(DEFAULT_MINIMUM_STOCK),
                "minimum_stock",
            )?)
            .bind(details.status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_testers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Vec<TesterRecord>, sqlx::Error> {
        query_as::<Postgres, TesterRecord>(LIST_TESTERS_SQL)
            .bind(product.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_tester(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        tester: &NewTester,
        size: &str,
    ) -> Result<TesterRecord, sqlx::Error> {
        query_as::<Postgres, TesterRecord>(CREATE_TESTER_SQL)
            .bind(tester.uuid.into_uuid())
            .bind(product.into_uuid())
            .bind(&tester.name)
            .bind(to_db_amount(tester.price, "price")?)
            .bind(size)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_collections(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Collections, sqlx::Error> {
        let row = query(COUNT_COLLECTIONS_SQL).fetch_one(&mut **tx).await?;

        Ok(Collections {
            all: try_get_total(&row, "all_products")?,
            mens: try_get_total(&row, "mens")?,
            womens: try_get_total(&row, "womens")?,
            unisex: try_get_total(&row, "unisex")?,
            special_offer: try_get_total(&row, "special_offer")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let discount: i16 = row.try_get("discount_percentage")?;

        let discount_percentage =
            u8::try_from(discount).map_err(|e| sqlx::Error::ColumnDecode {
                index: "discount_percentage".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            brand_name: row.try_get("brand_name")?,
            description: row.try_get("description")?,
            category: try_get_parsed(row, "category")?,
            fragrance_type: try_get_parsed(row, "fragrance_type")?,
            notes: row.try_get("notes")?,
            price: try_get_amount(row, "price")?,
            discount_percentage,
            sku: row.try_get("sku")?,
            stock_quantity: try_get_count(row, "stock_quantity")?,
            minimum_stock: try_get_count(row, "minimum_stock")?,
            status: try_get_parsed(row, "status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TesterRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: TesterUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            size: row.try_get("size")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
