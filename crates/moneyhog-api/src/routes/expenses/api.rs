//! Expense API endpoints - JSON API
//!
//! Endpoints:
//! - api_expenses: Expenses within an optional date range
//! - api_expense_create: Record a new expense
//! - api_expense_totals: Per-category totals within an optional date range

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use moneyhog_core::{DateRange, NewExpense, TotalsSummary};
use moneyhog_store::Expense;
use serde::Serialize;
use std::collections::HashMap;

use crate::{request_owner, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct ExpensesResponse {
    pub expenses: Vec<Expense>,
    pub total_count: usize,
    pub range: DateRange,
}

/// Range from the `from` and `to` query parameters
pub(crate) fn range_from(params: &HashMap<String, String>) -> DateRange {
    DateRange::new(
        params.get("from").map(String::as_str),
        params.get("to").map(String::as_str),
    )
}

pub async fn api_expenses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ExpensesResponse>> {
    let owner = request_owner(&headers, &state.config);
    let range = range_from(&params);
    let tracker = state.tracker.read().await;
    let expenses = tracker.expenses(&owner, &range).await?;

    Ok(Json(ExpensesResponse {
        total_count: expenses.len(),
        expenses,
        range,
    }))
}

pub async fn api_expense_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(form): Json<NewExpense>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let owner = request_owner(&headers, &state.config);
    let tracker = state.tracker.read().await;
    let expense = tracker.add_expense(&owner, form).await?;
    log::info!("POST /api/expenses - {} saved {}", owner, expense.id);
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn api_expense_totals(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<TotalsSummary>> {
    let owner = request_owner(&headers, &state.config);
    let range = range_from(&params);
    let tracker = state.tracker.read().await;
    Ok(Json(tracker.totals_summary(&owner, &range).await?))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app, OWNER};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .header("x-user-email", OWNER)
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_expenses_in_range() {
        let (status, json) = get_json("/api/expenses?from=2025-01-01&to=2025-01-31").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_count"], 2);
        assert_eq!(json["expenses"][0]["category"], "Food");
        assert_eq!(json["expenses"][0]["userEmail"], OWNER);
    }

    #[tokio::test]
    async fn test_expenses_without_range() {
        let (_, json) = get_json("/api/expenses?from=&to=").await;
        assert_eq!(json["total_count"], 3);
    }

    #[tokio::test]
    async fn test_other_owner_sees_nothing() {
        let request = Request::builder()
            .uri("/api/expenses")
            .header("x-user-email", "someone@else.com")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["total_count"], 0);
    }

    #[tokio::test]
    async fn test_expense_totals() {
        let (status, json) = get_json("/api/expenses/totals?from=2025-01-01&to=2025-01-31").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["title"],
            "Total spent on categories during 2025-01-01 - 2025-01-31"
        );
        assert_eq!(json["lines"], json!(["Food: R100.00", "Transport: R30.00"]));
    }

    #[tokio::test]
    async fn test_create_expense() {
        let app = app();
        let body = json!({
            "date": "2025-01-20",
            "startTime": "10:00",
            "endTime": "11:00",
            "description": "Bus fare",
            "category": "Transport",
            "amount": 15
        });
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/expenses")
            .header("content-type", "application/json")
            .header("x-user-email", OWNER)
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let request = Request::builder()
            .uri("/api/expenses/totals")
            .header("x-user-email", OWNER)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["lines"][1], "Transport: R45.00");
    }

    #[tokio::test]
    async fn test_create_expense_missing_field() {
        let body = json!({
            "date": "2025-01-20",
            "category": "Transport",
            "amount": 15
        });
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/expenses")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["field"], "startTime");
    }
}
