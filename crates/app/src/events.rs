//! Domain Events

use mockall::automock;
use tracing::info;

use crate::{
    domain::{orders::records::OrderUuid, payments::records::TransactionReference},
    identity::UserUuid,
};

/// Something that happened after a transaction committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    OrderPlaced {
        order: OrderUuid,
        owner: UserUuid,
        total: u64,
        lines: usize,
    },
    PaymentAuthorized {
        order: OrderUuid,
        reference: TransactionReference,
        amount: u64,
    },
    PaymentFailed {
        order: OrderUuid,
        amount: u64,
    },
}

impl DomainEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OrderPlaced { .. } => "order.placed",
            Self::PaymentAuthorized { .. } => "payment.authorized",
            Self::PaymentFailed { .. } => "payment.failed",
        }
    }
}

#[automock]
pub trait EventPublisher: Send + Sync {
    /// Publish a committed event. Publishing never fails the caller.
    fn publish(&self, event: DomainEvent);
}

/// Writes events to the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl EventPublisher for TracingEventPublisher {
    fn publish(&self, event: DomainEvent) {
        let name = event.name();

        match event {
            DomainEvent::OrderPlaced {
                order,
                owner,
                total,
                lines,
            } => info!(
                event = name,
                order = %order,
                owner = %owner,
                total,
                lines,
                "order placed"
            ),
            DomainEvent::PaymentAuthorized {
                order,
                reference,
                amount,
            } => info!(
                event = name,
                order = %order,
                reference = %reference,
                amount,
                "payment authorized"
            ),
            DomainEvent::PaymentFailed { order, amount } => {
                info!(event = name, order = %order, amount, "payment failed");
            }
        }
    }
}
