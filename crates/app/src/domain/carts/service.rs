//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::{ImportOutcome, NewCartLine},
            errors::CartsServiceError,
            records::{CartLineRecord, CartLineUuid},
            repository::PgCartLinesRepository,
        },
        columns::MAX_DB_COUNT,
    },
    identity::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    repository: PgCartLinesRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartLinesRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn add_line(
        &self,
        owner: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLineRecord, CartsServiceError> {
        let line = validate_line(line)?;

        let mut tx = self.db.begin().await?;

        let stored = self.repository.upsert_line(&mut tx, owner, &line).await?;

        tx.commit().await?;

        Ok(stored)
    }

    async fn update_quantity(
        &self,
        owner: UserUuid,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<CartLineRecord, CartsServiceError> {
        let quantity = check_quantity(quantity)?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_quantity(&mut tx, owner, line, quantity)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn remove_line(&self, owner: UserUuid, line: CartLineUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_line(&mut tx, owner, line).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn list_lines(&self, owner: UserUuid) -> Result<Vec<CartLineRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self.repository.list_lines(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(lines)
    }

    async fn import_lines(
        &self,
        owner: UserUuid,
        lines: Vec<NewCartLine>,
    ) -> Result<Vec<ImportOutcome>, CartsServiceError> {
        let lines = lines
            .into_iter()
            .map(validate_line)
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.db.begin().await?;

        let mut outcomes = Vec::with_capacity(lines.len());

        for line in lines {
            let outcome = match self
                .repository
                .insert_line_if_absent(&mut tx, owner, &line)
                .await?
            {
                Some(added) => ImportOutcome::Added(added),
                None => ImportOutcome::Conflict {
                    guest: line.uuid,
                    existing: self
                        .repository
                        .find_line_by_variant(&mut tx, owner, &line)
                        .await?,
                },
            };

            outcomes.push(outcome);
        }

        tx.commit().await?;

        Ok(outcomes)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a line to the owner's cart, merging with an existing line for the
    /// same product, tester and size.
    async fn add_line(
        &self,
        owner: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLineRecord, CartsServiceError>;

    /// Set the quantity of one of the owner's lines.
    async fn update_quantity(
        &self,
        owner: UserUuid,
        line: CartLineUuid,
        quantity: u32,
    ) -> Result<CartLineRecord, CartsServiceError>;

    /// Remove one of the owner's lines.
    async fn remove_line(&self, owner: UserUuid, line: CartLineUuid) -> Result<(), CartsServiceError>;

    /// The owner's lines, newest first.
    async fn list_lines(&self, owner: UserUuid) -> Result<Vec<CartLineRecord>, CartsServiceError>;

    /// Store guest cart lines after sign-in. Lines that collide with an
    /// existing server line are reported, never merged.
    async fn import_lines(
        &self,
        owner: UserUuid,
        lines: Vec<NewCartLine>,
    ) -> Result<Vec<ImportOutcome>, CartsServiceError>;
}

/// Quantities run from one up to what the `INTEGER` column holds.
fn check_quantity(quantity: u32) -> Result<u32, CartsServiceError> {
    if quantity == 0 || quantity > MAX_DB_COUNT {
        return Err(CartsServiceError::InvalidQuantity);
    }

    Ok(quantity)
}

fn validate_line(line: NewCartLine) -> Result<NewCartLine, CartsServiceError> {
    check_quantity(line.quantity)?;

    let size = line.size.trim();

    if size.is_empty() {
        return Err(CartsServiceError::InvalidSize);
    }

    i64::try_from(line.unit_price)?;

    Ok(NewCartLine {
        size: size.to_string(),
        ..line
    })
}
