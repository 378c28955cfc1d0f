//! JSON document files backing each collection
//!
//! A collection file that does not exist reads as empty. Writes go to a
//! sibling temp file first and are renamed into place.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::error::StoreError;

pub const EXPENSES_FILE: &str = "expenses.json";
pub const INCOME_FILE: &str = "income.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const BUDGET_GOALS_FILE: &str = "budget_goals.json";

/// Read a collection document, or its default value when the file is missing
pub async fn read_document<T>(path: &Path) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("Document {} not found, treating as empty", path.display());
            return Ok(T::default());
        }
        Err(e) => return Err(StoreError::io(path, e)),
    };

    if content.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(&content).map_err(|e| StoreError::MalformedDocument {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write a collection document atomically
pub async fn write_document<T>(path: &Path, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    let content = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");

    tokio::fs::write(&tmp, content)
        .await
        .map_err(|e| StoreError::io(&tmp, e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::io(path, e))?;

    log::debug!("Wrote document {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Expense};

    #[tokio::test]
    async fn test_missing_document_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let categories: Vec<Category> =
            read_document(&dir.path().join(CATEGORIES_FILE)).await.unwrap();
        assert!(categories.is_empty());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CATEGORIES_FILE);
        let categories = vec![Category {
            id: "cat-1".to_string(),
            name: "Food".to_string(),
        }];
        write_document(&path, &categories).await.unwrap();

        let loaded: Vec<Category> = read_document(&path).await.unwrap();
        assert_eq!(loaded, categories);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_document_with_null_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPENSES_FILE);
        std::fs::write(
            &path,
            r#"[{"date":"2025-01-05","category":"Food","amount":100,"userEmail":"a@b.com"},
                {"date":"2025-01-06","category":null,"amount":5,"userEmail":"a@b.com"}]"#,
        )
        .unwrap();

        let expenses: Vec<Expense> = read_document(&path).await.unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].category, "Food");
        assert_eq!(expenses[1].category, "");
    }

    #[tokio::test]
    async fn test_malformed_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPENSES_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let result: Result<Vec<Category>, _> = read_document(&path).await;
        assert!(matches!(result, Err(StoreError::MalformedDocument { .. })));
    }
}
