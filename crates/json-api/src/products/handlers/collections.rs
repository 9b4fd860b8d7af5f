//! Collections Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use aura_app::domain::products::records::Collections;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Active product counts per storefront collection.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CollectionsResponse {
    pub all: u64,
    pub mens: u64,
    pub womens: u64,
    pub unisex: u64,
    pub special_offer: u64,
}

impl From<Collections> for CollectionsResponse {
    fn from(collections: Collections) -> Self {
        Self {
            all: collections.all,
            mens: collections.mens,
            womens: collections.womens,
            unisex: collections.unisex,
            special_offer: collections.special_offer,
        }
    }
}

/// Collections Handler
#[endpoint(
    tags("products"),
    summary = "Collections",
    responses(
        (status_code = StatusCode::OK, description = "Collection counts"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CollectionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let collections = state
        .app
        .products
        .collections()
        .await
        .map_err(into_status_error)?;

    Ok(Json(collections.into()))
}
