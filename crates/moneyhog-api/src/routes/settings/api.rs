//! Settings API endpoint

use axum::extract::State;
use axum::response::Json;
use moneyhog_core::SettingsResponse;

use crate::AppState;

pub async fn api_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let tracker = state.tracker.read().await;
    Json(tracker.settings())
}
