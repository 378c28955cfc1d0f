//! Immutable per-owner record snapshots and their cache

use moneyhog_store::{BudgetGoal, Expense, Income, RecordStore, StoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use crate::aggregation::{aggregate_by_category_with, CategoryTotals};
use crate::types::CategoryKey;

/// Every record of one owner, fetched together
#[derive(Debug)]
pub struct Snapshot {
    pub owner: String,
    /// Cache revision the snapshot was fetched under
    pub revision: u64,
    pub expenses: Vec<Expense>,
    pub income: Vec<Income>,
    pub goals: Vec<BudgetGoal>,
    category_key: CategoryKey,
    totals: OnceLock<CategoryTotals>,
}

impl Snapshot {
    pub fn new(
        owner: &str,
        revision: u64,
        expenses: Vec<Expense>,
        income: Vec<Income>,
        goals: Vec<BudgetGoal>,
        category_key: CategoryKey,
    ) -> Self {
        Self {
            owner: owner.to_string(),
            revision,
            expenses,
            income,
            goals,
            category_key,
            totals: OnceLock::new(),
        }
    }

    /// Fetch expenses, income and goals concurrently; the snapshot exists
    /// only once all three have arrived.
    pub async fn fetch(
        store: &dyn RecordStore,
        owner: &str,
        revision: u64,
        category_key: CategoryKey,
    ) -> Result<Self, StoreError> {
        let (expenses, income, goals) = tokio::try_join!(
            store.expenses(Some(owner)),
            store.income(Some(owner)),
            store.budget_goals(Some(owner)),
        )?;

        log::debug!(
            "Fetched snapshot for {} at revision {}: {} expenses, {} income, {} goals",
            owner,
            revision,
            expenses.len(),
            income.len(),
            goals.len()
        );

        Ok(Self::new(owner, revision, expenses, income, goals, category_key))
    }

    /// All-time expense totals, computed once per snapshot
    pub fn totals(&self) -> &CategoryTotals {
        self.totals
            .get_or_init(|| aggregate_by_category_with(&self.expenses, self.category_key))
    }
}

/// Latest snapshot per owner for the current revision
///
/// Every write bumps the revision, so a cached snapshot is never served
/// after the records it was built from have changed.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    revision: AtomicU64,
    entries: Mutex<HashMap<String, Arc<Snapshot>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn get(&self, owner: &str) -> Option<Arc<Snapshot>> {
        let current = self.revision();
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(owner)
            .filter(|s| s.revision == current)
            .cloned()
    }

    /// Keep `snapshot` unless a write happened while it was being fetched
    pub fn insert(&self, snapshot: Arc<Snapshot>) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if snapshot.revision != self.revision() {
            log::debug!(
                "Discarding stale snapshot for {} (revision {})",
                snapshot.owner,
                snapshot.revision
            );
            return false;
        }
        entries.insert(snapshot.owner.clone(), snapshot);
        true
    }

    /// Drop every cached snapshot and start a new revision
    pub fn invalidate(&self) -> u64 {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        entries.clear();
        revision
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
