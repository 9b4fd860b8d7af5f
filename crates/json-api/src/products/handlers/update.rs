//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use aura_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{ProductRequest, ProductResponse},
    },
    state::State,
};

/// Update Product Handler
///
/// Admin only. Replaces every editable field; the SKU never changes.
#[endpoint(
    tags("products"),
    summary = "Update Product",
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<ProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let update = ProductUpdate {
        details: json.into_inner().into_details()?,
    };

    let updated = state
        .app
        .products
        .update_product(product.into_inner().into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::new(updated, &state.conversion)?))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use aura_app::domain::products::{
        ProductsServiceError,
        records::{ProductRecord, ProductStatus, ProductUuid},
    };

    use crate::{
        identity,
        test_helpers::{AsCaller, Mocks, make_product},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("products/{product}")
            .hoop(identity::require_admin)
            .put(handler)
    }

    fn body() -> serde_json::Value {
        json!({
            "name": "Oud Royale",
            "brand_name": "Maison Aura",
            "category": "mens",
            "fragrance_type": "EDP",
            "price": 120_00,
            "status": "inactive",
        })
    }

    #[tokio::test]
    async fn updates_product() -> TestResult {
        let uuid = ProductUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_update_product()
            .once()
            .withf(move |product, update| {
                *product == uuid
                    && update.details.price == 120_00
                    && update.details.status == ProductStatus::Inactive
            })
            .return_once(move |_, _| {
                Ok(ProductRecord {
                    price: 120_00,
                    status: ProductStatus::Inactive,
                    ..make_product(uuid)
                })
            });

        let mut res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .as_admin()
            .json(&body())
            .send(&mocks.into_service(route()))
            .await;

        let updated: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(updated.price.amount, 120_00);
        assert_eq!(updated.status, "inactive");

        Ok(())
    }

    #[tokio::test]
    async fn unknown_product_returns_404() {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_update_product()
            .once()
            .return_once(|_, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/products/{}", Uuid::now_v7()))
            .as_admin()
            .json(&body())
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn unknown_status_returns_400() {
        let mut mocks = Mocks::default();

        mocks.products.expect_update_product().never();

        let mut body = body();
        body["status"] = json!("archived");

        let res = TestClient::put(format!("http://example.com/products/{}", Uuid::now_v7()))
            .as_admin()
            .json(&body)
            .send(&mocks.into_service(route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
