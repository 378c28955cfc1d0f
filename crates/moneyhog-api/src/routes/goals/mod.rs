//! Budget goal routes

pub mod api;

pub use api::{api_budget_goal_set, api_budget_goals};
