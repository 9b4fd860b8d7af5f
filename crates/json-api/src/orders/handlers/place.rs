//! Place Order Handler

use std::sync::Arc;

use aura::PaymentMethod;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use aura_app::domain::orders::{data::NewOrder, records::OrderUuid};

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{ContactBody, OrderResponse, SelectionRequest},
    },
    state::State,
};

/// Place Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    pub contact: ContactBody,

    /// `cash_on_delivery` or `bank_transfer`
    pub payment_method: String,

    /// `"all"` or the ids of the cart lines to order
    pub selection: SelectionRequest,
}

/// Place Order Handler
///
/// Turns the selected cart lines into an order and removes them from the
/// cart.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid contact or payment method"),
        (status_code = StatusCode::NOT_FOUND, description = "A selected line does not exist"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Cart is empty"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;
    let request = json.into_inner();

    let order = NewOrder {
        uuid: OrderUuid::new(),
        contact: request.contact.into(),
        payment_method: request
            .payment_method
            .parse::<PaymentMethod>()
            .or_400("Unknown payment method")?,
        selection: request.selection.into(),
    };

    let placed = state
        .app
        .orders
        .place_order(caller.user, order)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", placed.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(OrderResponse::new(placed, &state.conversion)?))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;
    use uuid::Uuid;

    use aura_app::domain::{
        customers::data::ContactError,
        orders::{OrdersServiceError, data::LineSelection, records::OrderRecord},
    };

    use crate::test_helpers::{AsCaller, CUSTOMER, Mocks, contact, make_order};

    use super::*;

    fn route() -> Router {
        Router::with_path("orders").post(handler)
    }

    fn body(payment_method: &str, selection: Value) -> Value {
        json!({
            "contact": ContactBody::from(contact()),
            "payment_method": payment_method,
            "selection": selection,
        })
    }

    #[tokio::test]
    async fn places_bank_transfer_order_for_all_lines() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_place_order()
            .once()
            .withf(|owner, order| {
                *owner == CUSTOMER
                    && order.payment_method == PaymentMethod::BankTransfer
                    && order.selection == LineSelection::All
                    && order.contact == contact()
            })
            .return_once(|_, order| Ok(make_order(order.uuid)));

        let mut res = TestClient::post("http://example.com/orders")
            .as_customer()
            .json(&body("bank_transfer", json!("all")))
            .send(&mocks.into_service(route()))
            .await;

        let order: OrderResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/orders/{}", order.uuid).as_str()));
        assert_eq!(order.subtotal.amount, 200_00);
        assert_eq!(order.shipping_fee.amount, 1_79);
        assert_eq!(order.total.amount, 201_79);
        assert_eq!(order.payment_status, "pending");
        assert_eq!(order.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn cash_on_delivery_with_selected_lines() -> TestResult {
        let line = Uuid::now_v7();
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_place_order()
            .once()
            .withf(move |_, order| {
                order.payment_method == PaymentMethod::CashOnDelivery
                    && order.selection == LineSelection::Only(vec![line.into()])
            })
            .return_once(|_, order| {
                Ok(OrderRecord {
                    payment_method: PaymentMethod::CashOnDelivery,
                    cod_surcharge: 89,
                    total: 202_68,
                    ..make_order(order.uuid)
                })
            });

        let mut res = TestClient::post("http://example.com/orders")
            .as_customer()
            .json(&body("cash_on_delivery", json!([line])))
            .send(&mocks.into_service(route()))
            .await;

        let order: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(order.payment_method, "cash_on_delivery");
        assert_eq!(order.cod_surcharge.amount, 89);
        assert_eq!(order.total.amount, 202_68);

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_returns_422() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_place_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::EmptyCart));

        let mut res = TestClient::post("http://example.com/orders")
            .as_customer()
            .json(&body("bank_transfer", json!("all")))
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(res.take_string().await?.contains("Cart is empty"));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_contact_returns_400() {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_place_order()
            .once()
            .return_once(|_, _| Err(ContactError::InvalidEmail.into()));

        let res = TestClient::post("http://example.com/orders")
            .as_customer()
            .json(&body("bank_transfer", json!("all")))
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn unknown_payment_method_returns_400() {
        let mut mocks = Mocks::default();

        mocks.orders.expect_place_order().never();

        let res = TestClient::post("http://example.com/orders")
            .as_customer()
            .json(&body("card", json!("all")))
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn missing_selection_returns_400() {
        let mut mocks = Mocks::default();

        mocks.orders.expect_place_order().never();

        let res = TestClient::post("http://example.com/orders")
            .as_customer()
            .json(&json!({
                "contact": ContactBody::from(contact()),
                "payment_method": "bank_transfer",
            }))
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn vanished_selected_line_returns_404() {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_place_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::post("http://example.com/orders")
            .as_customer()
            .json(&body("bank_transfer", json!([Uuid::now_v7()])))
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
