//! Chart routes - Series ready for the presentation layer

pub mod api;

pub use api::{api_income_vs_expenses, api_monthly_chart, api_spending_chart};
