//! My Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use aura_app::domain::orders::data::OrderFilter;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// My Orders Handler
///
/// The caller's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "My Orders",
    responses(
        (status_code = StatusCode::OK, description = "The caller's orders"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(OrderFilter {
            owner: Some(caller.user),
            ..OrderFilter::default()
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderResponse::many(orders, &state.conversion)?))
}
