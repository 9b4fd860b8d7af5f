//! Payments service.
//!
//! Charges a placed order through the simulated gateway. The order row stays
//! locked from the owner check until the new payment status is written.

use std::sync::Arc;

use async_trait::async_trait;
use aura::{CardInstrument, GatewayDecision, SimulatedGateway};
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        orders::records::{OrderUuid, PaymentStatus},
        payments::{
            errors::PaymentsServiceError,
            records::{PaymentReceipt, TransactionReference},
            repository::PgPaymentsRepository,
        },
    },
    events::{DomainEvent, EventPublisher},
    identity::UserUuid,
};

#[derive(Clone)]
pub struct PgPaymentsService {
    db: Db,
    gateway: SimulatedGateway,
    events: Arc<dyn EventPublisher>,
    repository: PgPaymentsRepository,
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(db: Db, gateway: SimulatedGateway, events: Arc<dyn EventPublisher>) -> Self {
        Self {
            db,
            gateway,
            events,
            repository: PgPaymentsRepository::new(),
        }
    }
}

impl std::fmt::Debug for PgPaymentsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPaymentsService")
            .field("db", &self.db)
            .field("gateway", &self.gateway)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    async fn authorize(
        &self,
        owner: UserUuid,
        order: OrderUuid,
        instrument: CardInstrument,
    ) -> Result<PaymentReceipt, PaymentsServiceError> {
        instrument.validate()?;

        let mut tx = self.db.begin().await?;

        let payable = self.repository.lock_order(&mut tx, order).await?;

        if payable.owner_uuid != owner {
            return Err(PaymentsServiceError::Unauthorized);
        }

        if payable.payment_status == PaymentStatus::Paid {
            return Err(PaymentsServiceError::AlreadyPaid);
        }

        match self.gateway.authorize(&instrument)? {
            GatewayDecision::Approved => {
                let reference = TransactionReference::generate();

                self.repository
                    .record_payment(&mut tx, order, PaymentStatus::Paid, Some(&reference))
                    .await?;

                tx.commit().await?;

                info!(
                    order = %order,
                    reference = %reference,
                    amount = payable.total,
                    "payment authorized"
                );

                self.events.publish(DomainEvent::PaymentAuthorized {
                    order,
                    reference: reference.clone(),
                    amount: payable.total,
                });

                Ok(PaymentReceipt {
                    order,
                    reference,
                    amount: payable.total,
                    card_last_four: instrument.last_four(),
                })
            }
            GatewayDecision::Declined => {
                self.repository
                    .record_payment(&mut tx, order, PaymentStatus::Failed, None)
                    .await?;

                tx.commit().await?;

                warn!(order = %order, amount = payable.total, "payment declined");

                self.events.publish(DomainEvent::PaymentFailed {
                    order,
                    amount: payable.total,
                });

                Err(PaymentsServiceError::Declined)
            }
        }
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Charge `order` with `instrument` on behalf of its owner.
    ///
    /// A declined charge marks the order as failed; it can be retried.
    async fn authorize(
        &self,
        owner: UserUuid,
        order: OrderUuid,
        instrument: CardInstrument,
    ) -> Result<PaymentReceipt, PaymentsServiceError>;
}
