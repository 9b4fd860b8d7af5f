//! List Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use aura_app::domain::products::records::Category;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductResponse},
    state::State,
};

/// List Products Handler
///
/// Returns active products, newest first, optionally limited to one
/// collection (`mens`, `womens`, `unisex` or `special_offer`).
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Active products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown category"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = category
        .into_inner()
        .map(|value| value.parse::<Category>())
        .transpose()
        .or_400("Unknown category")?;

    let products = state
        .app
        .products
        .list_products(category)
        .await
        .map_err(into_status_error)?;

    let products = products
        .into_iter()
        .map(|product| ProductResponse::new(product, &state.conversion))
        .collect::<Result<_, _>>()?;

    Ok(Json(products))
}
