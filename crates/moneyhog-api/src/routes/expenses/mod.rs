//! Expense routes - Listing, creation and category totals

pub mod api;

pub use api::{api_expense_create, api_expense_totals, api_expenses};
