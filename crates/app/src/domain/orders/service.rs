//! Orders service.
//!
//! Placing an order is the one multi-table write in the app: the selected cart
//! lines are locked, priced, snapshotted into the order, recorded on the
//! customer ledger and removed from the cart in a single transaction.

use std::sync::Arc;

use async_trait::async_trait;
use aura::{CheckoutFees, QuoteError, quote};
use mockall::automock;
use rustc_hash::FxHashSet;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{records::CartLineUuid, repository::PgCartLinesRepository},
        customers::repository::PgCustomersRepository,
        orders::{
            data::{LineSelection, NewOrder, OrderFilter, OrderUpdate},
            errors::OrdersServiceError,
            records::{OrderItem, OrderRecord, OrderStatistics, OrderUuid},
            repository::PgOrdersRepository,
        },
    },
    events::{DomainEvent, EventPublisher},
    identity::UserUuid,
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    fees: CheckoutFees,
    events: Arc<dyn EventPublisher>,
    repository: PgOrdersRepository,
    cart_lines: PgCartLinesRepository,
    customers: PgCustomersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, fees: CheckoutFees, events: Arc<dyn EventPublisher>) -> Self {
        Self {
            db,
            fees,
            events,
            repository: PgOrdersRepository::new(),
            cart_lines: PgCartLinesRepository::new(),
            customers: PgCustomersRepository::new(),
        }
    }
}

impl std::fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .field("fees", &self.fees)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(
        &self,
        owner: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let contact = order.contact.normalized()?;

        let selection: Option<Vec<CartLineUuid>> = match order.selection {
            LineSelection::All => None,
            LineSelection::Only(lines) => {
                let mut seen = FxHashSet::default();

                Some(lines.into_iter().filter(|line| seen.insert(*line)).collect())
            }
        };

        let mut tx = self.db.begin().await?;

        let lines = self
            .cart_lines
            .lock_lines(&mut tx, owner, selection.as_deref())
            .await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        if let Some(selected) = &selection
            && selected.len() != lines.len()
        {
            return Err(OrdersServiceError::NotFound);
        }

        let quote = quote(&lines, order.payment_method, &self.fees).map_err(|error| match error {
            QuoteError::NoLines => OrdersServiceError::EmptyCart,
            other => OrdersServiceError::Pricing(other),
        })?;

        let items: Vec<OrderItem> = lines.iter().map(OrderItem::from).collect();
        let consumed: Vec<CartLineUuid> = lines.iter().map(|line| line.uuid).collect();

        let placed = self
            .repository
            .create_order(
                &mut tx,
                order.uuid,
                owner,
                &contact,
                &quote,
                order.payment_method,
                &items,
            )
            .await?;

        self.customers
            .upsert_on_order(&mut tx, owner, &contact, quote.total)
            .await?;

        self.cart_lines
            .delete_lines(&mut tx, owner, &consumed)
            .await?;

        tx.commit().await?;

        info!(
            order = %placed.uuid,
            owner = %owner,
            total = placed.total,
            method = %placed.payment_method,
            "order placed"
        );

        self.events.publish(DomainEvent::OrderPlaced {
            order: placed.uuid,
            owner,
            total: placed.total,
            lines: placed.items.len(),
        });

        Ok(placed)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.repository.get_order(&mut tx, order).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx, filter).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_order(
        &self,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if update.is_empty() {
            return Err(OrdersServiceError::EmptyUpdate);
        }

        let mut tx = self.db.begin().await?;

        let updated = self.repository.update_order(&mut tx, order, update).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn get_order_statistics(&self) -> Result<OrderStatistics, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let statistics = self.repository.order_statistics(&mut tx).await?;

        tx.commit().await?;

        Ok(statistics)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the selected cart lines into an order.
    async fn place_order(
        &self,
        owner: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders matching `filter`, newest first.
    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Move an order's fulfilment and/or payment status.
    async fn update_order(
        &self,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Delete an order. The customer ledger is not adjusted.
    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;

    /// Order counts by status and revenue from paid orders.
    async fn get_order_statistics(&self) -> Result<OrderStatistics, OrdersServiceError>;
}
