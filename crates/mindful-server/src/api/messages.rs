use axum::{extract::State, Json};
use mindful_scraper::{handle_message, MessageResponse};

use super::AppState;

/// Runtime-message bridge for the extension background script.
///
/// The body is read as text regardless of `Content-Type` so that a malformed
/// payload still gets a `{"success": false, ...}` reply with status 200.
pub(super) async fn handle(State(state): State<AppState>, body: String) -> Json<MessageResponse> {
    Json(handle_message(&state.prices, &body).await)
}
