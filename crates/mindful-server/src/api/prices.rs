use axum::{
    extract::{Query, State},
    Extension, Json,
};
use mindful_core::{detect_store, Region};
use mindful_scraper::{FormattedPrice, StoreQuote};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{parse_region, require_product, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct PriceParams {
    pub store: String,
    pub product: String,
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct PriceItem {
    store: String,
    product: String,
    region: Region,
    price: Option<FormattedPrice>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CompareParams {
    pub product: String,
    pub region: Option<String>,
    /// Host of the page the shopper is on; its store is left out.
    pub current_host: Option<String>,
}

/// An unknown store is not an error: it yields `price: null` like any other
/// failed lookup.
pub(super) async fn get_price(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<PriceParams>,
) -> Result<Json<ApiResponse<PriceItem>>, ApiError> {
    let region = parse_region(&req_id.0, params.region.as_deref())?;
    let product = require_product(&req_id.0, &params.product)?;

    let price = state.prices.get_price(&params.store, &product, region).await;

    Ok(Json(ApiResponse {
        data: PriceItem {
            store: params.store,
            product,
            region,
            price,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn compare_prices(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<CompareParams>,
) -> Result<Json<ApiResponse<Vec<StoreQuote>>>, ApiError> {
    let region = parse_region(&req_id.0, params.region.as_deref())?;
    let product = require_product(&req_id.0, &params.product)?;
    let exclude = params.current_host.as_deref().and_then(detect_store);

    let quotes = state.prices.compare_prices(&product, region, exclude).await;

    Ok(Json(ApiResponse {
        data: quotes,
        meta: ResponseMeta::new(req_id.0),
    }))
}
