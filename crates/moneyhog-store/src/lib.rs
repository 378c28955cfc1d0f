//! Record store for expenses, income, categories and budget goals
//!
//! Records are partitioned by owner email. The store only supplies and
//! persists raw records; all aggregation happens in moneyhog-core.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub mod documents;
pub mod error;
pub mod types;

pub use error::StoreError;
pub use types::{goal_key, BudgetGoal, Category, Expense, Income, Owned};

use documents::{
    read_document, write_document, BUDGET_GOALS_FILE, CATEGORIES_FILE, EXPENSES_FILE, INCOME_FILE,
};
use moneyhog_utils::generate_id;

/// Goals keyed by their deterministic document key
pub type GoalDocuments = BTreeMap<String, BudgetGoal>;

/// Store reference type
pub type StoreRef = Arc<dyn RecordStore>;

/// Source and sink of raw records
///
/// Passing `None` as owner returns records of every owner.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn expenses(&self, owner: Option<&str>) -> Result<Vec<Expense>, StoreError>;

    async fn income(&self, owner: Option<&str>) -> Result<Vec<Income>, StoreError>;

    async fn categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn budget_goals(&self, owner: Option<&str>) -> Result<Vec<BudgetGoal>, StoreError>;

    /// Append an expense; an empty id is replaced by a generated one
    async fn add_expense(&self, expense: Expense) -> Result<Expense, StoreError>;

    async fn add_income(&self, income: Income) -> Result<Income, StoreError>;

    /// Append a category. Duplicate names are kept.
    async fn add_category(&self, category: Category) -> Result<Category, StoreError>;

    /// Insert or replace the goal stored under its key
    async fn set_budget_goal(&self, goal: BudgetGoal) -> Result<BudgetGoal, StoreError>;
}

fn ensure_id(id: &mut String, prefix: &str) {
    if id.trim().is_empty() {
        *id = generate_id(prefix);
    }
}

fn owned_by<T: Owned>(records: Vec<T>, owner: Option<&str>) -> Vec<T> {
    match owner {
        None => records,
        Some(_) => records.into_iter().filter(|r| r.is_owned_by(owner)).collect(),
    }
}

// ==================== JSON file store ====================

/// Store keeping one JSON document per collection in a data directory
#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
    /// Serializes read-modify-write cycles on the documents
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store rooted at `root`
    pub async fn open(root: impl Into<PathBuf>, create_missing: bool) -> Result<Self, StoreError> {
        let root = root.into();

        match tokio::fs::metadata(&root).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(StoreError::io(
                    &root,
                    std::io::Error::new(std::io::ErrorKind::Other, "data path is not a directory"),
                ))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && create_missing => {
                log::info!("Creating data directory {}", root.display());
                tokio::fs::create_dir_all(&root)
                    .await
                    .map_err(|e| StoreError::io(&root, e))?;
            }
            Err(e) => return Err(StoreError::io(&root, e)),
        }

        log::info!("Opened record store at {}", root.display());
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn expenses(&self, owner: Option<&str>) -> Result<Vec<Expense>, StoreError> {
        let all: Vec<Expense> = read_document(&self.path(EXPENSES_FILE)).await?;
        Ok(owned_by(all, owner))
    }

    async fn income(&self, owner: Option<&str>) -> Result<Vec<Income>, StoreError> {
        let all: Vec<Income> = read_document(&self.path(INCOME_FILE)).await?;
        Ok(owned_by(all, owner))
    }

    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        read_document(&self.path(CATEGORIES_FILE)).await
    }

    async fn budget_goals(&self, owner: Option<&str>) -> Result<Vec<BudgetGoal>, StoreError> {
        let all: GoalDocuments = read_document(&self.path(BUDGET_GOALS_FILE)).await?;
        Ok(owned_by(all.into_values().collect(), owner))
    }

    async fn add_expense(&self, mut expense: Expense) -> Result<Expense, StoreError> {
        ensure_id(&mut expense.id, "exp");
        let _guard = self.write_lock.lock().await;
        let path = self.path(EXPENSES_FILE);
        let mut all: Vec<Expense> = read_document(&path).await?;
        all.push(expense.clone());
        write_document(&path, &all).await?;
        log::info!("Added expense {} ({})", expense.id, expense.category);
        Ok(expense)
    }

    async fn add_income(&self, mut income: Income) -> Result<Income, StoreError> {
        ensure_id(&mut income.id, "inc");
        let _guard = self.write_lock.lock().await;
        let path = self.path(INCOME_FILE);
        let mut all: Vec<Income> = read_document(&path).await?;
        all.push(income.clone());
        write_document(&path, &all).await?;
        log::info!("Added income {}", income.id);
        Ok(income)
    }

    async fn add_category(&self, mut category: Category) -> Result<Category, StoreError> {
        ensure_id(&mut category.id, "cat");
        let _guard = self.write_lock.lock().await;
        let path = self.path(CATEGORIES_FILE);
        let mut all: Vec<Category> = read_document(&path).await?;
        all.push(category.clone());
        write_document(&path, &all).await?;
        log::info!("Added category {}", category.name);
        Ok(category)
    }

    async fn set_budget_goal(&self, goal: BudgetGoal) -> Result<BudgetGoal, StoreError> {
        let _guard = self.write_lock.lock().await;
        let path = self.path(BUDGET_GOALS_FILE);
        let mut all: GoalDocuments = read_document(&path).await?;
        let key = goal.key();
        if all.insert(key.clone(), goal.clone()).is_some() {
            log::info!("Replaced budget goal {}", key);
        } else {
            log::info!("Added budget goal {}", key);
        }
        write_document(&path, &all).await?;
        Ok(goal)
    }
}

// ==================== In-memory store ====================

#[derive(Debug, Default)]
struct Collections {
    expenses: Vec<Expense>,
    income: Vec<Income>,
    categories: Vec<Category>,
    goals: GoalDocuments,
}

/// Volatile store, used for tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing records
    pub fn with_records(
        expenses: Vec<Expense>,
        income: Vec<Income>,
        categories: Vec<Category>,
        goals: Vec<BudgetGoal>,
    ) -> Self {
        let goals = goals.into_iter().map(|g| (g.key(), g)).collect();
        Self {
            inner: RwLock::new(Collections {
                expenses,
                income,
                categories,
                goals,
            }),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn expenses(&self, owner: Option<&str>) -> Result<Vec<Expense>, StoreError> {
        Ok(owned_by(self.inner.read().await.expenses.clone(), owner))
    }

    async fn income(&self, owner: Option<&str>) -> Result<Vec<Income>, StoreError> {
        Ok(owned_by(self.inner.read().await.income.clone(), owner))
    }

    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.inner.read().await.categories.clone())
    }

    async fn budget_goals(&self, owner: Option<&str>) -> Result<Vec<BudgetGoal>, StoreError> {
        let goals = self.inner.read().await.goals.values().cloned().collect();
        Ok(owned_by(goals, owner))
    }

    async fn add_expense(&self, mut expense: Expense) -> Result<Expense, StoreError> {
        ensure_id(&mut expense.id, "exp");
        self.inner.write().await.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn add_income(&self, mut income: Income) -> Result<Income, StoreError> {
        ensure_id(&mut income.id, "inc");
        self.inner.write().await.income.push(income.clone());
        Ok(income)
    }

    async fn add_category(&self, mut category: Category) -> Result<Category, StoreError> {
        ensure_id(&mut category.id, "cat");
        self.inner.write().await.categories.push(category.clone());
        Ok(category)
    }

    async fn set_budget_goal(&self, goal: BudgetGoal) -> Result<BudgetGoal, StoreError> {
        self.inner
            .write()
            .await
            .goals
            .insert(goal.key(), goal.clone());
        Ok(goal)
    }
}
