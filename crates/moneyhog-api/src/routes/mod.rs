//! Route modules for the API server
//!
//! Each module follows the same structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints

pub mod categories;
pub mod charts;
pub mod expenses;
pub mod goals;
pub mod income;
pub mod settings;
