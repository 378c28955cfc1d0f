//! Submitted forms for new records
//!
//! Each form validates itself and converts into the stored record for a
//! given owner.

use moneyhog_store::{BudgetGoal, Category, Expense, Income};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::canonical_month;

fn require(field: &str, value: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        Err(CoreError::validation(field, format!("{} is required", field)))
    } else {
        Ok(())
    }
}

/// New expense entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewExpense {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub amount: Decimal,
}

impl NewExpense {
    pub fn validate(&self) -> CoreResult<()> {
        require("date", &self.date)?;
        require("startTime", &self.start_time)?;
        require("endTime", &self.end_time)?;
        require("description", &self.description)?;
        require("category", &self.category)?;
        if self.amount < Decimal::ZERO {
            return Err(CoreError::validation("amount", "Amount must not be negative"));
        }
        Ok(())
    }

    pub fn into_record(self, owner: &str) -> Expense {
        Expense {
            id: String::new(),
            date: self.date.trim().to_string(),
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description,
            category: self.category,
            image_url: self.image_url.filter(|u| !u.trim().is_empty()),
            amount: self.amount,
            owner_email: owner.to_string(),
        }
    }
}

/// New income entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewIncome {
    pub date: String,
    pub amount: Decimal,
    pub description: String,
}

impl NewIncome {
    pub fn validate(&self) -> CoreResult<()> {
        require("date", &self.date)?;
        if self.amount <= Decimal::ZERO {
            return Err(CoreError::validation("amount", "Amount must be greater than 0"));
        }
        Ok(())
    }

    pub fn into_record(self, owner: &str) -> Income {
        Income {
            id: String::new(),
            date: self.date.trim().to_string(),
            amount: self.amount,
            description: self.description,
            owner_email: owner.to_string(),
        }
    }
}

/// New category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewCategory {
    pub name: String,
}

impl NewCategory {
    pub fn validate(&self) -> CoreResult<()> {
        require("name", &self.name)
    }

    pub fn into_record(self) -> Category {
        Category {
            id: String::new(),
            name: self.name.trim().to_string(),
        }
    }
}

/// Budget goal to insert or replace
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalInput {
    pub category: String,
    pub month: String,
    pub min_goal: u32,
    pub max_goal: u32,
}

impl GoalInput {
    pub fn validate(&self) -> CoreResult<()> {
        require("category", &self.category)?;
        if canonical_month(&self.month).is_none() {
            return Err(CoreError::validation(
                "month",
                format!("Unknown month '{}'", self.month),
            ));
        }
        if self.min_goal > self.max_goal {
            return Err(CoreError::validation(
                "minGoal",
                "Minimum goal must not exceed maximum goal",
            ));
        }
        Ok(())
    }

    /// Month spellings are normalized so that "jan" and "January" share
    /// one goal key.
    pub fn into_record(self, owner: &str) -> BudgetGoal {
        let month = canonical_month(&self.month)
            .map(str::to_string)
            .unwrap_or(self.month);
        BudgetGoal {
            owner_email: owner.to_string(),
            category: self.category,
            month,
            min_goal: self.min_goal,
            max_goal: self.max_goal,
        }
    }
}
