use axum::{extract::Query, Extension, Json};
use mindful_core::{detect_region, detect_store, Region, Store};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct DetectParams {
    pub host: String,
    /// Browser UI language such as `uk-UA`; consulted when the host is not
    /// conclusive.
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DetectItem {
    host: String,
    region: Region,
    store: Option<Store>,
}

pub(super) async fn detect(
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<DetectParams>,
) -> Json<ApiResponse<DetectItem>> {
    let host = params.host.trim().to_lowercase();
    let data = DetectItem {
        region: detect_region(&host, &params.language),
        store: detect_store(&host),
        host,
    };
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
