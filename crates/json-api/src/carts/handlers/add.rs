//! Add Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    carts::{
        errors::into_status_error,
        models::{CartLineRequest, CartLineResponse},
    },
    extensions::*,
    state::State,
};

/// Add Cart Line Handler
///
/// Adding a variant that is already in the cart adds to its quantity.
#[endpoint(
    tags("carts"),
    summary = "Add Cart Line",
    responses(
        (status_code = StatusCode::CREATED, description = "Line added or merged"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing caller identity"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CartLineRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;

    let line = state
        .app
        .carts
        .add_line(caller.user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CartLineResponse::new(line, &state.conversion)?))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use aura_app::domain::carts::{
        CartsServiceError,
        records::{CartLineRecord, CartLineUuid},
    };

    use crate::test_helpers::{AsCaller, CUSTOMER, Mocks, make_line};

    use super::*;

    fn route() -> Router {
        Router::with_path("cart/lines").post(handler)
    }

    #[tokio::test]
    async fn adds_line_for_caller() -> TestResult {
        let product = Uuid::now_v7();
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_add_line()
            .once()
            .withf(move |owner, line| {
                *owner == CUSTOMER
                    && line.product_uuid.into_uuid() == product
                    && line.tester_uuid.is_none()
                    && line.quantity == 2
                    && line.unit_price == 100_00
            })
            .return_once(|_, line| {
                Ok(CartLineRecord {
                    uuid: line.uuid,
                    product_uuid: line.product_uuid,
                    ..make_line(CartLineUuid::new())
                })
            });

        let mut res = TestClient::post("http://example.com/cart/lines")
            .as_customer()
            .json(&json!({
                "product_uuid": product,
                "size": "100 ml",
                "quantity": 2,
                "unit_price": 100_00,
            }))
            .send(&mocks.into_service(route()))
            .await;

        let line: CartLineResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(line.product_uuid, product);
        assert_eq!(line.line_total.amount, 200_00);

        Ok(())
    }

    #[tokio::test]
    async fn zero_quantity_returns_400() {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_add_line()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidQuantity));

        let res = TestClient::post("http://example.com/cart/lines")
            .as_customer()
            .json(&json!({
                "product_uuid": Uuid::now_v7(),
                "size": "100 ml",
                "quantity": 0,
                "unit_price": 100_00,
            }))
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn unknown_product_returns_400() {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_add_line()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidReference));

        let res = TestClient::post("http://example.com/cart/lines")
            .as_customer()
            .json(&json!({
                "product_uuid": Uuid::now_v7(),
                "size": "100 ml",
                "quantity": 1,
                "unit_price": 100_00,
            }))
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
