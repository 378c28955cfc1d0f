//! Income routes

pub mod api;

pub use api::{api_income, api_income_create};
