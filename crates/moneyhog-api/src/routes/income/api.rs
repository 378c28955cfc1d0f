//! Income API endpoints

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use moneyhog_core::NewIncome;
use moneyhog_store::Income;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{request_owner, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct IncomeResponse {
    pub income: Vec<Income>,
    pub total: Decimal,
    pub total_count: usize,
}

pub async fn api_income(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<IncomeResponse>> {
    let owner = request_owner(&headers, &state.config);
    let tracker = state.tracker.read().await;
    let income = tracker.income(&owner).await?;

    Ok(Json(IncomeResponse {
        total: moneyhog_core::aggregate_income(&income),
        total_count: income.len(),
        income,
    }))
}

pub async fn api_income_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<NewIncome>,
) -> ApiResult<(StatusCode, Json<Income>)> {
    let owner = request_owner(&headers, &state.config);
    let tracker = state.tracker.read().await;
    let income = tracker.add_income(&owner, form).await?;
    log::info!("POST /api/income - {} saved {}", owner, income.id);
    Ok((StatusCode::CREATED, Json(income)))
}
