//! JSON HTTP API over the expense tracker
//!
//! Routes are organized into modules:
//! - routes::expenses: Expense list, creation and category totals
//! - routes::income: Income list and creation
//! - routes::categories: Category list and creation
//! - routes::goals: Budget goals per month
//! - routes::charts: Chart-ready series
//! - routes::settings: Effective settings
//!
//! Every request acts for one owner, taken from the configured user
//! header or the configured default email.

pub mod error;
pub mod routes;

use axum::{
    extract::State,
    http::HeaderMap,
    response::Json,
    routing::{get, post},
    Router,
};
use moneyhog_config::Config;
use moneyhog_core::Tracker;
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<RwLock<Tracker>>,
    pub config: Config,
}

/// Owner the request acts for
pub fn request_owner(headers: &HeaderMap, config: &Config) -> String {
    headers
        .get(config.users.header.as_str())
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| config.users.default_email.clone())
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::categories::{api_categories, api_category_create};
    use routes::charts::{api_income_vs_expenses, api_monthly_chart, api_spending_chart};
    use routes::expenses::{api_expense_create, api_expense_totals, api_expenses};
    use routes::goals::{api_budget_goal_set, api_budget_goals};
    use routes::income::{api_income, api_income_create};
    use routes::settings::api_settings;

    let cors_enable = state.config.server.cors_enable;

    let router = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/categories", get(api_categories).post(api_category_create))
        .route("/api/expenses", get(api_expenses).post(api_expense_create))
        .route("/api/expenses/totals", get(api_expense_totals))
        .route("/api/income", get(api_income).post(api_income_create))
        .route("/api/budget-goals", get(api_budget_goals).put(api_budget_goal_set))
        .route("/api/charts/monthly", get(api_monthly_chart))
        .route("/api/charts/income-vs-expenses", get(api_income_vs_expenses))
        .route("/api/charts/spending", get(api_spending_chart))
        .route("/api/settings", get(api_settings))
        .route("/api/reload", post(api_reload))
        .with_state(state);

    if cors_enable {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
struct ReloadResponse {
    success: bool,
    revision: u64,
}

/// Drop cached snapshots so the next read goes to the store
async fn api_reload(State(state): State<AppState>) -> Json<ReloadResponse> {
    let mut tracker = state.tracker.write().await;
    let revision = tracker.reload();
    Json(ReloadResponse {
        success: true,
        revision,
    })
}

/// Start the server
pub async fn start_server(config: Config, tracker: Arc<RwLock<Tracker>>) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = AppState { tracker, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting MoneyHog server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /api/expenses (Expenses and category totals)");
    log::info!("  - /api/income (Income)");
    log::info!("  - /api/categories (Categories)");
    log::info!("  - /api/budget-goals (Monthly budget goals)");
    log::info!("  - /api/charts/* (Chart series)");
    log::info!("  - /api/settings (Configuration)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use moneyhog_store::{BudgetGoal, Expense, Income, MemoryStore};
    use rust_decimal::Decimal;

    pub const OWNER: &str = "a@b.com";

    pub fn expense(category: &str, amount: i64, date: &str) -> Expense {
        Expense {
            date: date.to_string(),
            start_time: "08:00".to_string(),
            end_time: "09:00".to_string(),
            description: "test".to_string(),
            category: category.to_string(),
            amount: Decimal::new(amount, 0),
            owner_email: OWNER.to_string(),
            ..Default::default()
        }
    }

    pub fn app() -> Router {
        let store = Arc::new(MemoryStore::with_records(
            vec![
                expense("Food", 100, "2025-01-05"),
                expense("Food", 50, "2025-02-01"),
                expense("Transport", 30, "2025-01-10"),
            ],
            vec![Income {
                date: "2025-01-01".to_string(),
                amount: Decimal::new(2000, 0),
                owner_email: OWNER.to_string(),
                ..Default::default()
            }],
            vec![],
            vec![
                BudgetGoal {
                    owner_email: OWNER.to_string(),
                    category: "Food".to_string(),
                    month: "January".to_string(),
                    min_goal: 10,
                    max_goal: 50,
                },
                BudgetGoal {
                    owner_email: OWNER.to_string(),
                    category: "Transport".to_string(),
                    month: "January".to_string(),
                    min_goal: 20,
                    max_goal: 70,
                },
            ],
        ));
        let config = Config::default();
        let tracker = Tracker::new(config.clone(), store);
        create_router(AppState {
            tracker: Arc::new(RwLock::new(tracker)),
            config,
        })
    }
}
