//! Category routes

pub mod api;

pub use api::{api_categories, api_category_create};
