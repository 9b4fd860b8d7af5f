//! Update Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aura_app::domain::orders::{
    data::OrderUpdate,
    records::{OrderStatus, PaymentStatus},
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Update Order Request
///
/// The two statuses move independently; at least one must be given.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderRequest {
    pub order_status: Option<String>,
    pub payment_status: Option<String>,
}

impl UpdateOrderRequest {
    fn into_update(self) -> Result<OrderUpdate, StatusError> {
        Ok(OrderUpdate {
            order_status: self
                .order_status
                .as_deref()
                .map(str::parse::<OrderStatus>)
                .transpose()
                .or_400("Unknown order status")?,
            payment_status: self
                .payment_status
                .as_deref()
                .map(str::parse::<PaymentStatus>)
                .transpose()
                .or_400("Unknown payment status")?,
        })
    }
}

/// Update Order Handler
///
/// Admin only.
#[endpoint(
    tags("orders"),
    summary = "Update Order",
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status or nothing to update"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let update = json.into_inner().into_update()?;

    let order = state
        .app
        .orders
        .update_order(order.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderResponse::new(order, &state.conversion)?))
}
