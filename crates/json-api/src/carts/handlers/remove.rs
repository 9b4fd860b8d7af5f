//! Remove Cart Line Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Remove Cart Line Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Line",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    line: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.identity_or_401()?;

    state
        .app
        .carts
        .remove_line(caller.user, line.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;

    use aura_app::domain::carts::{CartsServiceError, records::CartLineUuid};

    use crate::test_helpers::{AsCaller, CUSTOMER, Mocks};

    use super::*;

    fn route() -> Router {
        Router::with_path("cart/lines/{line}").delete(handler)
    }

    #[tokio::test]
    async fn removes_line() {
        let uuid = CartLineUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_remove_line()
            .once()
            .withf(move |owner, line| *owner == CUSTOMER && *line == uuid)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/cart/lines/{uuid}"))
            .as_customer()
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));
    }

    #[tokio::test]
    async fn removed_line_returns_404() {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_remove_line()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/cart/lines/{}", Uuid::now_v7()))
            .as_customer()
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
