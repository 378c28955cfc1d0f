//! Record types as they are stored in the document collections
//!
//! Field names follow the camelCase document layout. Every field has a
//! default so that a partially filled document still loads: missing or
//! null strings become empty and missing or null amounts become zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Read an explicit `null` as the field's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Expense {
    /// Record identifier assigned by the store
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Calendar date in `YYYY-MM-DD` form
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    /// Free-form start time, never parsed
    #[serde(deserialize_with = "null_as_default")]
    pub start_time: String,
    /// Free-form end time, never parsed
    #[serde(deserialize_with = "null_as_default")]
    pub end_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Category name, referenced by value
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    /// Opaque link to a receipt image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: Decimal,
    /// Owning user
    #[serde(rename = "userEmail", alias = "ownerEmail", deserialize_with = "null_as_default")]
    pub owner_email: String,
}

/// A single income entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Income {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub amount: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "userEmail", alias = "ownerEmail", deserialize_with = "null_as_default")]
    pub owner_email: String,
}

/// Expense category. Names are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// Monthly min/max spending goal for one category
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetGoal {
    #[serde(rename = "userEmail", alias = "ownerEmail", deserialize_with = "null_as_default")]
    pub owner_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    /// Month name, e.g. "January"
    #[serde(deserialize_with = "null_as_default")]
    pub month: String,
    #[serde(deserialize_with = "null_as_default")]
    pub min_goal: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub max_goal: u32,
}

impl BudgetGoal {
    /// Deterministic document key; saving a goal with the same
    /// owner, category and month replaces the previous one.
    pub fn key(&self) -> String {
        goal_key(&self.owner_email, &self.category, &self.month)
    }
}

/// Build the document key for a budget goal identity
pub fn goal_key(owner_email: &str, category: &str, month: &str) -> String {
    format!("{}_{}_{}", owner_email, category, month)
}

/// Records carrying an owner partition key
pub trait Owned {
    fn owner_email(&self) -> &str;

    fn is_owned_by(&self, owner: Option<&str>) -> bool {
        owner.map_or(true, |o| self.owner_email() == o)
    }
}

impl Owned for Expense {
    fn owner_email(&self) -> &str {
        &self.owner_email
    }
}

impl Owned for Income {
    fn owner_email(&self) -> &str {
        &self.owner_email
    }
}

impl Owned for BudgetGoal {
    fn owner_email(&self) -> &str {
        &self.owner_email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_missing_fields_default() {
        let expense: Expense = serde_json::from_str(r#"{"category": "Food"}"#).unwrap();
        assert_eq!(expense.category, "Food");
        assert_eq!(expense.date, "");
        assert_eq!(expense.amount, Decimal::ZERO);
        assert_eq!(expense.image_url, None);
    }

    #[test]
    fn test_null_fields_default() {
        let expense: Expense = serde_json::from_str(
            r#"{"date": "2025-01-05", "category": null, "amount": null, "userEmail": null}"#,
        )
        .unwrap();
        assert_eq!(expense.category, "");
        assert_eq!(expense.amount, Decimal::ZERO);
        assert_eq!(expense.owner_email, "");

        let goal: BudgetGoal =
            serde_json::from_str(r#"{"category": "Food", "minGoal": null, "maxGoal": 50}"#).unwrap();
        assert_eq!(goal.min_goal, 0);
        assert_eq!(goal.max_goal, 50);
    }

    #[test]
    fn test_expense_document_field_names() {
        let expense: Expense = serde_json::from_str(
            r#"{"date": "2025-01-05", "startTime": "08:00", "endTime": "09:00",
                "category": "Food", "amount": 12.5, "userEmail": "a@b.com",
                "imageUrl": "content://img/1"}"#,
        )
        .unwrap();
        assert_eq!(expense.start_time, "08:00");
        assert_eq!(expense.end_time, "09:00");
        assert_eq!(expense.owner_email, "a@b.com");
        assert_eq!(expense.amount, Decimal::new(125, 1));
        assert_eq!(expense.image_url.as_deref(), Some("content://img/1"));

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["userEmail"], "a@b.com");
        assert_eq!(json["startTime"], "08:00");
    }

    #[test]
    fn test_owner_alias_accepted() {
        let income: Income =
            serde_json::from_str(r#"{"ownerEmail": "x@y.com", "amount": 10}"#).unwrap();
        assert_eq!(income.owner_email, "x@y.com");
        assert!(income.is_owned_by(Some("x@y.com")));
        assert!(!income.is_owned_by(Some("z@y.com")));
        assert!(income.is_owned_by(None));
    }

    #[test]
    fn test_goal_key() {
        let goal = BudgetGoal {
            owner_email: "a@b.com".to_string(),
            category: "Food".to_string(),
            month: "January".to_string(),
            min_goal: 10,
            max_goal: 50,
        };
        assert_eq!(goal.key(), "a@b.com_Food_January");
    }
}
