//! Import Guest Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{
        errors::into_status_error,
        models::{CartLineRequest, ImportOutcomeResponse},
    },
    extensions::*,
    state::State,
};

/// Import Guest Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ImportCartRequest {
    /// Lines held by the client before sign-in
    pub lines: Vec<CartLineRequest>,
}

/// Import Guest Cart Handler
///
/// Stores guest lines after sign-in. A guest line for a variant already in
/// the server cart is reported as a conflict and the server line is kept;
/// quantities are never merged. Either every line is accepted or none is.
#[endpoint(
    tags("carts"),
    summary = "Import Guest Cart",
    responses(
        (status_code = StatusCode::OK, description = "One outcome per guest line, in order"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<ImportCartRequest>,
    depot: &mut Depot,
) -> Result<Json<Vec<ImportOutcomeResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;

    let lines = json.into_inner().lines.into_iter().map(Into::into).collect();

    let outcomes = state
        .app
        .carts
        .import_lines(caller.user, lines)
        .await
        .map_err(into_status_error)?;

    let outcomes = outcomes
        .into_iter()
        .map(|outcome| ImportOutcomeResponse::new(outcome, &state.conversion))
        .collect::<Result<_, _>>()?;

    Ok(Json(outcomes))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use aura_app::domain::carts::{
        CartsServiceError,
        data::ImportOutcome,
        records::CartLineUuid,
    };

    use crate::test_helpers::{AsCaller, CUSTOMER, Mocks, make_line};

    use super::*;

    fn route() -> Router {
        Router::with_path("cart/import").post(handler)
    }

    #[tokio::test]
    async fn reports_added_and_conflicting_lines() -> TestResult {
        let added = Uuid::now_v7();
        let clashing = Uuid::now_v7();
        let existing = make_line(CartLineUuid::new());
        let existing_uuid = existing.uuid;

        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_import_lines()
            .once()
            .withf(move |owner, lines| {
                *owner == CUSTOMER
                    && lines.iter().map(|l| l.uuid.into_uuid()).collect::<Vec<_>>()
                        == vec![added, clashing]
            })
            .return_once(move |_, lines| {
                let mut lines = lines.into_iter();

                let first = lines.next().map(|line| make_line(line.uuid));
                let second = lines.next();

                match (first, second) {
                    (Some(first), Some(second)) => Ok(vec![
                        ImportOutcome::Added(first),
                        ImportOutcome::Conflict {
                            guest: second.uuid,
                            existing,
                        },
                    ]),
                    _ => Err(CartsServiceError::InvalidData),
                }
            });

        let line = |uuid: Uuid| {
            json!({
                "uuid": uuid,
                "product_uuid": Uuid::now_v7(),
                "size": "100 ml",
                "quantity": 1,
                "unit_price": 100_00,
            })
        };

        let mut res = TestClient::post("http://example.com/cart/import")
            .as_customer()
            .json(&json!({ "lines": [line(added), line(clashing)] }))
            .send(&mocks.into_service(route()))
            .await;

        let outcomes: Vec<ImportOutcomeResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            matches!(
                outcomes.as_slice(),
                [
                    ImportOutcomeResponse::Added { line },
                    ImportOutcomeResponse::Conflict { guest, existing },
                ] if line.uuid == added
                    && *guest == clashing
                    && existing.uuid == existing_uuid.into_uuid()
            ),
            "unexpected outcomes: {outcomes:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn invalid_line_returns_400() {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_import_lines()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidSize));

        let res = TestClient::post("http://example.com/cart/import")
            .as_customer()
            .json(&json!({
                "lines": [{
                    "product_uuid": Uuid::now_v7(),
                    "size": " ",
                    "quantity": 1,
                    "unit_price": 100_00,
                }]
            }))
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
