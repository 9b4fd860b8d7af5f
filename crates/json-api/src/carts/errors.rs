//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use aura_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart line not found"),
        CartsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Cart line already exists")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be between 1 and 2147483647")
        }
        CartsServiceError::InvalidSize => StatusError::bad_request().brief("Size is required"),
        CartsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown product or tester")
        }
        CartsServiceError::InvalidPrice(_) => {
            StatusError::bad_request().brief("Invalid unit price")
        }
        CartsServiceError::MissingRequiredData | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart line")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
