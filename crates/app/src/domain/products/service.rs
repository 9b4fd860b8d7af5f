//! Products service.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use rand::{Rng, distributions::Alphanumeric};
use tracing::debug;

use crate::{
    cache::TaggedCache,
    database::Db,
    domain::{
        columns::MAX_DB_COUNT,
        products::{
            cache::{CatalogEntry, CatalogKey, PRODUCT_LIST_TAG, product_tag},
            data::{DEFAULT_TESTER_SIZE, NewProduct, NewTester, ProductDetailsData, ProductUpdate},
            errors::ProductsServiceError,
            records::{
                Category, Collections, ProductDetails, ProductRecord, ProductUuid, TesterRecord,
            },
            repository::PgProductsRepository,
        },
    },
};

const MAX_NAME_LEN: usize = 255;

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    cache: Arc<TaggedCache<CatalogKey, CatalogEntry>>,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db, cache_ttl: Duration) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            cache: Arc::new(TaggedCache::new(cache_ttl)),
        }
    }

    /// Cache a read that started at generation `seen`.
    fn remember(&self, key: CatalogKey, entry: CatalogEntry, seen: u64) {
        let tags = key.tags();

        if self.cache.insert_if_current(key, entry, tags, seen) {
            debug!(?key, entries = self.cache.len(), "catalog cache filled");
        } else {
            debug!(?key, "catalog changed during read; not cached");
        }
    }

    fn forget_product(&self, product: ProductUuid) {
        self.cache.invalidate_tag(PRODUCT_LIST_TAG);
        self.cache.invalidate_tag(&product_tag(product));
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let key = CatalogKey::Products { category };

        if let Some(CatalogEntry::Products(products)) = self.cache.get(&key) {
            debug!(?key, "catalog cache hit");

            return Ok(products);
        }

        let seen = self.cache.generation();
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, category).await?;

        tx.commit().await?;

        self.remember(key, CatalogEntry::Products(products.clone()), seen);

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductDetails, ProductsServiceError> {
        let key = CatalogKey::Product(product);

        if let Some(CatalogEntry::Product(details)) = self.cache.get(&key) {
            debug!(?key, "catalog cache hit");

            return Ok(details);
        }

        let seen = self.cache.generation();
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_product(&mut tx, product).await?;
        let testers = self.repository.list_testers(&mut tx, product).await?;

        tx.commit().await?;

        let details = ProductDetails {
            product: record,
            testers,
        };

        self.remember(key, CatalogEntry::Product(details.clone()), seen);

        Ok(details)
    }

    async fn collections(&self) -> Result<Collections, ProductsServiceError> {
        let key = CatalogKey::Collections;

        if let Some(CatalogEntry::Collections(collections)) = self.cache.get(&key) {
            debug!(?key, "catalog cache hit");

            return Ok(collections);
        }

        let seen = self.cache.generation();
        let mut tx = self.db.begin().await?;

        let collections = self.repository.count_collections(&mut tx).await?;

        tx.commit().await?;

        self.remember(key, CatalogEntry::Collections(collections), seen);

        Ok(collections)
    }

    async fn create_product(&self, product: NewProduct) -> Result<ProductRecord, ProductsServiceError> {
        let details = normalize(product.details)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, product.uuid, &generate_sku(), &details)
            .await?;

        tx.commit().await?;

        self.cache.invalidate_tag(PRODUCT_LIST_TAG);

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let details = normalize(update.details)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &details)
            .await?;

        tx.commit().await?;

        self.forget_product(product);

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        self.forget_product(product);

        Ok(())
    }

    async fn add_tester(
        &self,
        product: ProductUuid,
        tester: NewTester,
    ) -> Result<TesterRecord, ProductsServiceError> {
        let name = tester.name.trim();

        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(ProductsServiceError::InvalidField("name"));
        }

        i64::try_from(tester.price)?;

        let size = tester
            .size
            .as_deref()
            .map(str::trim)
            .filter(|size| !size.is_empty())
            .unwrap_or(DEFAULT_TESTER_SIZE)
            .to_string();

        let tester = NewTester {
            name: name.to_string(),
            ..tester
        };

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_tester(&mut tx, product, &tester, &size)
            .await
            .map_err(|error| match ProductsServiceError::from(error) {
                ProductsServiceError::InvalidReference => ProductsServiceError::NotFound,
                other => other,
            })?;

        tx.commit().await?;

        self.forget_product(product);

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves active products, optionally limited to one collection.
    async fn list_products(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product with its testers.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductDetails, ProductsServiceError>;

    /// Active product counts per collection.
    async fn collections(&self) -> Result<Collections, ProductsServiceError>;

    /// Creates a new product, assigning it a generated SKU.
    async fn create_product(&self, product: NewProduct) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces the editable fields of a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Deletes a product with the given UUID. Placed orders are unaffected.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;

    /// Adds a tester variant to a product.
    async fn add_tester(
        &self,
        product: ProductUuid,
        tester: NewTester,
    ) -> Result<TesterRecord, ProductsServiceError>;
}

fn normalize(details: ProductDetailsData) -> Result<ProductDetailsData, ProductsServiceError> {
    let name = details.name.trim().to_string();
    let brand_name = details.brand_name.trim().to_string();

    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(ProductsServiceError::InvalidField("name"));
    }

    if brand_name.is_empty() || brand_name.len() > MAX_NAME_LEN {
        return Err(ProductsServiceError::InvalidField("brand_name"));
    }

    if details.discount_percentage > 100 {
        return Err(ProductsServiceError::InvalidField("discount_percentage"));
    }

    if details.stock_quantity > MAX_DB_COUNT {
        return Err(ProductsServiceError::InvalidField("stock_quantity"));
    }

    if details.minimum_stock.is_some_and(|minimum| minimum > MAX_DB_COUNT) {
        return Err(ProductsServiceError::InvalidField("minimum_stock"));
    }

    i64::try_from(details.price)?;

    Ok(ProductDetailsData {
        name,
        brand_name,
        description: non_blank(details.description),
        notes: non_blank(details.notes),
        ..details
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn generate_sku() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|byte| char::from(byte).to_ascii_uppercase())
        .collect();

    format!("SKU-{suffix}")
}
