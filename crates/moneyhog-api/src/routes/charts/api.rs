//! Chart API endpoints - JSON series for the presentation layer
//!
//! Endpoints:
//! - api_monthly_chart: One month's spending per category with average goal lines
//! - api_income_vs_expenses: All-time spending per category against income
//! - api_spending_chart: Spending over a trailing window with goal lines

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Json;
use chrono::{Datelike, Utc};
use moneyhog_config::Period;
use moneyhog_core::{types::month_name, ComparisonChart, MonthlyChart, SpendingChart};
use std::collections::HashMap;

use crate::{request_owner, ApiError, ApiResult, AppState};

pub async fn api_monthly_chart(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<MonthlyChart>> {
    let owner = request_owner(&headers, &state.config);
    let month = match params.get("month").filter(|m| !m.is_empty()) {
        Some(m) => m.clone(),
        None => month_name(Utc::now().date_naive().month())
            .unwrap_or_default()
            .to_string(),
    };

    let tracker = state.tracker.read().await;
    Ok(Json(tracker.monthly_chart(&owner, &month).await?))
}

pub async fn api_income_vs_expenses(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<ComparisonChart>> {
    let owner = request_owner(&headers, &state.config);
    let tracker = state.tracker.read().await;
    Ok(Json(tracker.income_vs_expenses(&owner).await?))
}

pub async fn api_spending_chart(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<SpendingChart>> {
    let owner = request_owner(&headers, &state.config);
    let period = params
        .get("period")
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<Period>())
        .transpose()
        .map_err(ApiError::bad_request)?;
    let month = params.get("month").map(String::as_str).filter(|m| !m.is_empty());

    let tracker = state.tracker.read().await;
    Ok(Json(tracker.spending_chart_today(&owner, period, month).await?))
}
