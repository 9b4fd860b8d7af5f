//! List Customers Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aura::CurrencyConversion;
use aura_app::domain::customers::records::CustomerRecord;

use crate::{
    customers::errors::into_status_error, extensions::*, money::MoneyResponse,
    orders::models::ContactBody, state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub owner_uuid: Uuid,
    pub contact: ContactBody,
    pub total_spent: MoneyResponse,
    pub total_orders: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl CustomerResponse {
    fn new(customer: CustomerRecord, conversion: &CurrencyConversion) -> Result<Self, StatusError> {
        Ok(Self {
            owner_uuid: customer.owner_uuid.into(),
            contact: customer.contact.into(),
            total_spent: MoneyResponse::new(conversion, customer.total_spent)?,
            total_orders: customer.total_orders,
            created_at: customer.created_at.to_string(),
            updated_at: customer.updated_at.to_string(),
        })
    }
}

/// List Customers Handler
///
/// Admin only. Most recently active first.
#[endpoint(
    tags("customers"),
    summary = "List Customers",
    responses(
        (status_code = StatusCode::OK, description = "Customer ledgers"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<CustomerResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customers = state
        .app
        .customers
        .list_customers()
        .await
        .map_err(into_status_error)?;

    let customers = customers
        .into_iter()
        .map(|customer| CustomerResponse::new(customer, &state.conversion))
        .collect::<Result<_, _>>()?;

    Ok(Json(customers))
}
