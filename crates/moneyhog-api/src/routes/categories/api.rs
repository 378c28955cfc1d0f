//! Category API endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use moneyhog_core::NewCategory;
use moneyhog_store::Category;

use crate::{ApiResult, AppState};

pub async fn api_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    let tracker = state.tracker.read().await;
    Ok(Json(tracker.categories().await?))
}

pub async fn api_category_create(
    State(state): State<AppState>,
    Json(form): Json<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let tracker = state.tracker.read().await;
    let category = tracker.add_category(form).await?;
    log::info!("POST /api/categories - added {}", category.name);
    Ok((StatusCode::CREATED, Json(category)))
}
