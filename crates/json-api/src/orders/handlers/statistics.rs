//! Order Statistics Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderStatisticsResponse},
    state::State,
};

/// Order Statistics Handler
///
/// Admin only.
#[endpoint(
    tags("orders"),
    summary = "Order Statistics",
    responses(
        (status_code = StatusCode::OK, description = "Order counts and revenue"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<OrderStatisticsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let statistics = state
        .app
        .orders
        .get_order_statistics()
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderStatisticsResponse::new(statistics, &state.conversion)?))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use aura_app::domain::orders::records::OrderStatistics;

    use crate::{
        identity,
        test_helpers::{AsCaller, Mocks},
    };

    use super::*;

    #[tokio::test]
    async fn returns_counts_and_revenue() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order_statistics()
            .once()
            .return_once(|| {
                Ok(OrderStatistics {
                    total_orders: 3,
                    pending: 2,
                    delivered: 1,
                    revenue: 201_79,
                    ..OrderStatistics::default()
                })
            });

        let route = Router::with_path("orders/statistics")
            .hoop(identity::require_admin)
            .get(handler);

        let mut res = TestClient::get("http://example.com/orders/statistics")
            .as_admin()
            .send(&mocks.into_service(route))
            .await;

        let statistics: OrderStatisticsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(statistics.total_orders, 3);
        assert_eq!(statistics.pending, 2);
        assert_eq!(statistics.delivered, 1);
        assert_eq!(statistics.revenue.amount, 201_79);

        Ok(())
    }
}
