//! My Ledger Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aura_app::domain::customers::records::LedgerBalance;

use crate::{
    customers::errors::into_status_error, extensions::*, money::MoneyResponse,
    orders::models::ContactBody, state::State,
};

/// Lifetime totals for one customer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LedgerResponse {
    pub owner_uuid: Uuid,

    /// Contact from the most recent order; absent before the first order
    pub contact: Option<ContactBody>,
    pub total_spent: MoneyResponse,
    pub total_orders: u64,
}

/// My Ledger Handler
///
/// A customer who has never ordered gets zero totals, not a 404.
#[endpoint(
    tags("customers"),
    summary = "My Ledger",
    responses(
        (status_code = StatusCode::OK, description = "The caller's ledger"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<LedgerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;

    let LedgerBalance {
        owner_uuid,
        contact,
        total_spent,
        total_orders,
    } = state
        .app
        .customers
        .get_by_owner(caller.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(LedgerResponse {
        owner_uuid: owner_uuid.into(),
        contact: contact.map(ContactBody::from),
        total_spent: MoneyResponse::new(&state.conversion, total_spent)?,
        total_orders,
    }))
}
