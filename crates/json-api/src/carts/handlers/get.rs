//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{
        errors::into_status_error,
        models::{CartLineResponse, line_total},
    },
    extensions::*,
    money::MoneyResponse,
    state::State,
};

/// The caller's cart.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Newest first
    pub lines: Vec<CartLineResponse>,

    /// Sum of line totals, before shipping and surcharges
    pub subtotal: MoneyResponse,
}

/// Get Cart Handler
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "The caller's cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing caller identity"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;

    let lines = state
        .app
        .carts
        .list_lines(caller.user)
        .await
        .map_err(into_status_error)?;

    let mut subtotal: u64 = 0;

    for line in &lines {
        subtotal = subtotal
            .checked_add(line_total(line)?)
            .ok_or("cart subtotal overflowed")
            .or_500("failed to price cart")?;
    }

    Ok(Json(CartResponse {
        subtotal: MoneyResponse::new(&state.conversion, subtotal)?,
        lines: lines
            .into_iter()
            .map(|line| CartLineResponse::new(line, &state.conversion))
            .collect::<Result<_, _>>()?,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use aura_app::domain::carts::records::{CartLineRecord, CartLineUuid};

    use crate::test_helpers::{AsCaller, CUSTOMER, Mocks, make_line};

    use super::*;

    fn route() -> Router {
        Router::with_path("cart").get(handler)
    }

    #[tokio::test]
    async fn returns_lines_and_subtotal() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_list_lines()
            .once()
            .withf(|owner| *owner == CUSTOMER)
            .return_once(|_| {
                Ok(vec![
                    make_line(CartLineUuid::new()),
                    CartLineRecord {
                        size: "50 ml".to_string(),
                        quantity: 1,
                        unit_price: 60_00,
                        ..make_line(CartLineUuid::new())
                    },
                ])
            });

        let mut res = TestClient::get("http://example.com/cart")
            .as_customer()
            .send(&mocks.into_service(route()))
            .await;

        let cart: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.subtotal.amount, 260_00);

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_has_zero_subtotal() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_list_lines()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let mut res = TestClient::get("http://example.com/cart")
            .as_customer()
            .send(&mocks.into_service(route()))
            .await;

        let cart: CartResponse = res.take_json().await?;

        assert!(cart.lines.is_empty());
        assert_eq!(cart.subtotal.amount, 0);

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_caller_returns_401() {
        let mut mocks = Mocks::default();

        mocks.carts.expect_list_lines().never();

        let res = TestClient::get("http://example.com/cart")
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }
}
