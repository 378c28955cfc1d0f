//! Budget goal API endpoints
//!
//! Goals are keyed by owner, category and month. Setting a goal that
//! already exists replaces it.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Json;
use moneyhog_core::GoalInput;
use moneyhog_store::BudgetGoal;
use std::collections::HashMap;

use crate::{request_owner, ApiResult, AppState};

pub async fn api_budget_goals(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<BudgetGoal>>> {
    let owner = request_owner(&headers, &state.config);
    let month = params.get("month").map(String::as_str).filter(|m| !m.is_empty());
    let tracker = state.tracker.read().await;
    Ok(Json(tracker.budget_goals(&owner, month).await?))
}

pub async fn api_budget_goal_set(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<GoalInput>,
) -> ApiResult<Json<BudgetGoal>> {
    let owner = request_owner(&headers, &state.config);
    let tracker = state.tracker.read().await;
    let goal = tracker.set_budget_goal(&owner, input).await?;
    log::info!("PUT /api/budget-goals - {}", goal.key());
    Ok(Json(goal))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app, OWNER};
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn put(body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::PUT)
            .uri("/api/budget-goals")
            .header("content-type", "application/json")
            .header("x-user-email", OWNER)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn list(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("x-user-email", OWNER)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_goals_by_month() {
        let app = app();
        let json = body_json(app.clone().oneshot(list("/api/budget-goals?month=January")).await.unwrap()).await;
        assert_eq!(json.as_array().unwrap().len(), 2);

        let json = body_json(app.oneshot(list("/api/budget-goals?month=February")).await.unwrap()).await;
        assert!(json.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_goal_replaces_existing() {
        let app = app();
        let response = app
            .clone()
            .oneshot(put(json!({"category": "Food", "month": "jan", "minGoal": 5, "maxGoal": 25})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["month"], "January");

        let json = body_json(app.oneshot(list("/api/budget-goals")).await.unwrap()).await;
        let goals = json.as_array().unwrap();
        assert_eq!(goals.len(), 2);
        let food = goals.iter().find(|g| g["category"] == "Food").unwrap();
        assert_eq!(food["maxGoal"], 25);
    }

    #[tokio::test]
    async fn test_min_above_max_rejected() {
        let response = app()
            .oneshot(put(json!({"category": "Food", "month": "January", "minGoal": 90, "maxGoal": 10})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["field"], "minGoal");
    }
}
