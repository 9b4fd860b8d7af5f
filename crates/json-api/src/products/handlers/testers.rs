//! Add Tester Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aura_app::domain::products::{data::NewTester, records::TesterUuid};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::TesterResponse},
    state::State,
};

/// Add Tester Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddTesterRequest {
    pub name: String,

    /// Price in base currency minor units (US cents)
    pub price: u64,

    /// Defaults to `5 ml`
    pub size: Option<String>,
}

/// Add Tester Handler
///
/// Admin only.
#[endpoint(
    tags("products"),
    summary = "Add Tester",
    responses(
        (status_code = StatusCode::CREATED, description = "Tester added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin role required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<AddTesterRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TesterResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let tester = state
        .app
        .products
        .add_tester(
            product.into_inner().into(),
            NewTester {
                uuid: TesterUuid::new(),
                name: request.name,
                price: request.price,
                size: request.size,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(TesterResponse::new(tester, &state.conversion)?))
}
