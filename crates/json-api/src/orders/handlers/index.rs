//! List Orders Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use uuid::Uuid;

use aura_app::domain::orders::{
    data::OrderFilter,
    records::{OrderStatus, PaymentStatus},
};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// List Orders Handler
///
/// Admin only. Every filter is optional.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    responses(
        (status_code = StatusCode::OK, description = "Matching orders, newest first"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status filter"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    owner: QueryParam<Uuid, false>,
    order_status: QueryParam<String, false>,
    payment_status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = OrderFilter {
        owner: owner.into_inner().map(Into::into),
        order_status: order_status
            .into_inner()
            .map(|value| value.parse::<OrderStatus>())
            .transpose()
            .or_400("Unknown order status")?,
        payment_status: payment_status
            .into_inner()
            .map(|value| value.parse::<PaymentStatus>())
            .transpose()
            .or_400("Unknown payment status")?,
    };

    let orders = state
        .app
        .orders
        .list_orders(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderResponse::many(orders, &state.conversion)?))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use aura_app::domain::orders::records::OrderUuid;

    use crate::{
        identity,
        test_helpers::{AsCaller, CUSTOMER, Mocks, make_order},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("orders")
            .hoop(identity::require_admin)
            .get(handler)
    }

    #[tokio::test]
    async fn filters_are_passed_through() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_orders()
            .once()
            .withf(|filter| {
                *filter
                    == OrderFilter {
                        owner: Some(CUSTOMER),
                        order_status: Some(OrderStatus::Shipped),
                        payment_status: Some(PaymentStatus::Paid),
                    }
            })
            .return_once(|_| Ok(vec![make_order(OrderUuid::new())]));

        let mut res = TestClient::get(format!(
            "http://example.com/orders?owner={CUSTOMER}&order_status=shipped&payment_status=paid"
        ))
        .as_admin()
        .send(&mocks.into_service(route()))
        .await;

        let orders: Vec<OrderResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(orders.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn no_filters_lists_everything() {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_orders()
            .once()
            .withf(|filter| *filter == OrderFilter::default())
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/orders")
            .as_admin()
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn unknown_status_returns_400() {
        let mut mocks = Mocks::default();

        mocks.orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/orders?order_status=lost")
            .as_admin()
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn customers_are_forbidden() {
        let mut mocks = Mocks::default();

        mocks.orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/orders")
            .as_customer()
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
    }
}
