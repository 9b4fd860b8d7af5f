//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use aura_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::EmptyCart => {
            StatusError::unprocessable_entity().brief("Cart is empty")
        }
        OrdersServiceError::InvalidContact(source) => {
            StatusError::bad_request().brief(format!("Invalid contact: {source}"))
        }
        OrdersServiceError::EmptyUpdate => {
            StatusError::bad_request().brief("Nothing to update")
        }
        OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order"),
        OrdersServiceError::Pricing(source) => {
            error!("failed to price order: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
