//! Authorize Payment Handler

use std::{fmt, sync::Arc};

use aura::{CardInstrument, CurrencyConversion};
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aura_app::domain::payments::records::PaymentReceipt;

use crate::{
    extensions::*, money::MoneyResponse, payments::errors::into_status_error, state::State,
};

/// Card details. Never logged.
#[derive(Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentRequest {
    /// 13 to 19 digits, optionally grouped with spaces
    pub number: String,

    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,

    /// Name on the card
    pub holder: String,
}

impl fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentRequest")
            .field("holder", &self.holder)
            .finish_non_exhaustive()
    }
}

impl From<PaymentRequest> for CardInstrument {
    fn from(request: PaymentRequest) -> Self {
        CardInstrument {
            number: request.number,
            expiry: request.expiry,
            cvv: request.cvv,
            holder: request.holder,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentResponse {
    pub order_uuid: Uuid,
    pub transaction_reference: String,
    pub amount: MoneyResponse,
    pub card_last_four: String,
}

impl PaymentResponse {
    fn new(
        receipt: PaymentReceipt,
        conversion: &CurrencyConversion,
    ) -> Result<Self, StatusError> {
        Ok(Self {
            order_uuid: receipt.order.into(),
            transaction_reference: receipt.reference.to_string(),
            amount: MoneyResponse::new(conversion, receipt.amount)?,
            card_last_four: receipt.card_last_four,
        })
    }
}

/// Authorize Payment Handler
///
/// Charges one of the caller's orders through the simulated gateway. A
/// declined card marks the order as failed; it can be paid again.
#[endpoint(
    tags("payments"),
    summary = "Authorize Payment",
    responses(
        (status_code = StatusCode::OK, description = "Payment approved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed card details"),
        (status_code = StatusCode::PAYMENT_REQUIRED, description = "Payment declined"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another customer"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order already paid"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<PaymentRequest>,
    depot: &mut Depot,
) -> Result<Json<PaymentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;

    let receipt = state
        .app
        .payments
        .authorize(caller.user, order.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(PaymentResponse::new(receipt, &state.conversion)?))
}
