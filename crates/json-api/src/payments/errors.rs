//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use aura_app::domain::payments::PaymentsServiceError;

pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        PaymentsServiceError::Unauthorized => {
            StatusError::forbidden().brief("Order belongs to another customer")
        }
        PaymentsServiceError::AlreadyPaid => StatusError::conflict().brief("Order already paid"),
        PaymentsServiceError::Declined => {
            StatusError::payment_required().brief("Payment declined")
        }
        PaymentsServiceError::InvalidInstrument(source) => {
            StatusError::bad_request().brief(format!("Invalid card: {source}"))
        }
        PaymentsServiceError::InvalidData => StatusError::bad_request().brief("Invalid payment"),
        PaymentsServiceError::Sql(source) => {
            error!("payment storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
