//! Expense aggregation engine and the tracker that feeds it
//!
//! The engine modules (`range`, `aggregation`, `series`) are pure functions
//! over record slices. [`Tracker`] assembles per-owner snapshots from a
//! record store, runs the engine over them and forwards writes.

pub mod aggregation;
pub mod error;
pub mod models;
pub mod range;
pub mod reports;
pub mod series;
pub mod snapshot;
pub mod types;

use chrono::{Datelike, NaiveDate, Utc};
use moneyhog_config::Config;
use moneyhog_store::{BudgetGoal, Category, Expense, Income, StoreRef};
use std::sync::Arc;

pub use aggregation::{
    aggregate_by_category, aggregate_by_category_with, aggregate_income, average_goals,
    count_by_category, goals_by_category, CategoryTotals, GoalAverages, GoalRange,
};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use models::{GoalInput, NewCategory, NewExpense, NewIncome};
pub use range::{filter_by_range, in_range, in_range_with, period_range, DateRange, Dated};
pub use reports::{
    ComparisonChart, MonthlyChart, SettingsResponse, SpendingChart, TotalsSummary,
};
pub use series::{
    build_comparison_series, build_goal_overlay, build_monthly_filtered_totals,
    build_monthly_filtered_totals_with, build_spending_line_series, ComparisonEntry, GoalOverlay,
    SpendingPoint,
};
pub use snapshot::{Snapshot, SnapshotCache};
pub use types::{CategoryKey, DatePolicy, MonthMatch, Period, Policy, INCOME_LABEL};

use error::{DefaultErrorLogger, ErrorContext, ErrorLogger};
use types::{month_name, month_number};

/// Entry point for reads and writes on behalf of an owner
pub struct Tracker {
    config: Config,
    store: StoreRef,
    policy: Policy,
    cache: SnapshotCache,
    logger: DefaultErrorLogger,
}

impl Tracker {
    /// Create a new tracker with config and store
    pub fn new(config: Config, store: StoreRef) -> Self {
        let policy = Policy::from(&config.policy);
        log::info!(
            "Tracker policy: dates={}, months={}, categories={}",
            policy.dates,
            policy.months,
            policy.categories
        );
        Self {
            config,
            store,
            policy,
            cache: SnapshotCache::new(),
            logger: DefaultErrorLogger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn settings(&self) -> SettingsResponse {
        SettingsResponse::from(&self.config)
    }

    /// Drop every cached snapshot so the next read goes to the store
    pub fn reload(&mut self) -> u64 {
        let revision = self.cache.invalidate();
        log::info!("Reloaded records, revision {}", revision);
        revision
    }

    /// Current snapshot for `owner`, fetched when not cached
    pub async fn snapshot(&self, owner: &str) -> CoreResult<Arc<Snapshot>> {
        if let Some(snapshot) = self.cache.get(owner) {
            return Ok(snapshot);
        }

        let revision = self.cache.revision();
        let snapshot = Snapshot::fetch(self.store.as_ref(), owner, revision, self.policy.categories)
            .await
            .map_err(|e| self.report(CoreError::from(e), "snapshot", owner))?;
        let snapshot = Arc::new(snapshot);
        self.cache.insert(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    fn report(&self, error: CoreError, operation: &str, owner: &str) -> CoreError {
        let context = ErrorContext::new(operation.to_string()).with_owner(owner.to_string());
        self.logger.log_error(&error, &context);
        error
    }

    // ==================== Records ====================

    pub async fn categories(&self) -> CoreResult<Vec<Category>> {
        Ok(self.store.categories().await?)
    }

    pub async fn add_category(&self, form: NewCategory) -> CoreResult<Category> {
        form.validate()
            .map_err(|e| self.report(e, "add_category", ""))?;
        let category = self.store.add_category(form.into_record()).await?;
        Ok(category)
    }

    /// Expenses of `owner` dated within `range`
    pub async fn expenses(&self, owner: &str, range: &DateRange) -> CoreResult<Vec<Expense>> {
        let snapshot = self.snapshot(owner).await?;
        Ok(filter_by_range(&snapshot.expenses, range, self.policy.dates)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn add_expense(&self, owner: &str, form: NewExpense) -> CoreResult<Expense> {
        form.validate()
            .map_err(|e| self.report(e, "add_expense", owner))?;
        let expense = self.store.add_expense(form.into_record(owner)).await?;
        self.cache.invalidate();
        Ok(expense)
    }

    pub async fn income(&self, owner: &str) -> CoreResult<Vec<Income>> {
        Ok(self.snapshot(owner).await?.income.clone())
    }

    pub async fn add_income(&self, owner: &str, form: NewIncome) -> CoreResult<Income> {
        form.validate()
            .map_err(|e| self.report(e, "add_income", owner))?;
        let income = self.store.add_income(form.into_record(owner)).await?;
        self.cache.invalidate();
        Ok(income)
    }

    /// Goals of `owner`, optionally restricted to one month
    pub async fn budget_goals(&self, owner: &str, month: Option<&str>) -> CoreResult<Vec<BudgetGoal>> {
        let snapshot = self.snapshot(owner).await?;
        Ok(match month {
            Some(month) => goals_in_month(&snapshot.goals, month).cloned().collect(),
            None => snapshot.goals.clone(),
        })
    }

    /// Insert or replace the goal for (owner, category, month)
    pub async fn set_budget_goal(&self, owner: &str, input: GoalInput) -> CoreResult<BudgetGoal> {
        input
            .validate()
            .map_err(|e| self.report(e, "set_budget_goal", owner))?;
        let goal = self.store.set_budget_goal(input.into_record(owner)).await?;
        self.cache.invalidate();
        Ok(goal)
    }

    // ==================== Reports ====================

    /// Per-category totals of the expenses in `range`
    pub async fn totals_summary(&self, owner: &str, range: &DateRange) -> CoreResult<TotalsSummary> {
        let snapshot = self.snapshot(owner).await?;
        let records = filter_by_range(&snapshot.expenses, range, self.policy.dates);
        let totals = if range.is_unbounded() {
            snapshot.totals().clone()
        } else {
            aggregate_by_category_with(records.iter().copied(), self.policy.categories)
        };
        Ok(reports::totals_summary(
            &totals,
            range,
            records.len(),
            &self.config.currency,
        ))
    }

    /// Bar chart of one month's spending with the month's average goals
    pub async fn monthly_chart(&self, owner: &str, month: &str) -> CoreResult<MonthlyChart> {
        let snapshot = self.snapshot(owner).await?;
        let totals = build_monthly_filtered_totals_with(
            &snapshot.expenses,
            month,
            self.policy.months,
            self.policy.categories,
        );
        let averages = average_goals(goals_in_month(&snapshot.goals, month));
        Ok(reports::build_monthly_bar_chart(
            month,
            &totals,
            averages,
            self.config.charts.show_goal_lines,
        ))
    }

    /// All-time expenses per category against total income
    pub async fn income_vs_expenses(&self, owner: &str) -> CoreResult<ComparisonChart> {
        let snapshot = self.snapshot(owner).await?;
        let income_total = aggregate_income(&snapshot.income);
        let entries = build_comparison_series(snapshot.totals(), income_total);
        Ok(ComparisonChart::from_entries(entries))
    }

    /// Spending over a trailing window with goal lines from `month`
    ///
    /// `period` falls back to the configured default and `month` to the
    /// month of `today`.
    pub async fn spending_chart(
        &self,
        owner: &str,
        period: Option<Period>,
        month: Option<&str>,
        today: NaiveDate,
    ) -> CoreResult<SpendingChart> {
        let period = period.unwrap_or(self.config.charts.default_period);
        let month = match month {
            Some(m) => m.to_string(),
            None => month_name(today.month()).unwrap_or_default().to_string(),
        };

        let snapshot = self.snapshot(owner).await?;
        let range = period_range(period, today);
        let records = filter_by_range(&snapshot.expenses, &range, self.policy.dates);
        let totals = aggregate_by_category_with(records.iter().copied(), self.policy.categories);

        let month_goals: Vec<&BudgetGoal> = goals_in_month(&snapshot.goals, &month).collect();
        let per_category = goals_by_category(month_goals.iter().copied(), self.policy.categories);
        let fallback = if self.config.charts.show_goal_lines {
            average_goals(month_goals.iter().copied())
        } else {
            None
        };
        let per_category = if self.config.charts.show_goal_lines {
            per_category
        } else {
            Default::default()
        };

        let points = build_spending_line_series(&totals, &per_category, fallback);
        Ok(SpendingChart::new(period.label(), range, &month, points))
    }

    /// Spending chart relative to the current date
    pub async fn spending_chart_today(
        &self,
        owner: &str,
        period: Option<Period>,
        month: Option<&str>,
    ) -> CoreResult<SpendingChart> {
        let today = Utc::now().date_naive();
        self.spending_chart(owner, period, month, today).await
    }
}

/// Goals whose month names the same calendar month as `month`
fn goals_in_month<'a>(goals: &'a [BudgetGoal], month: &str) -> impl Iterator<Item = &'a BudgetGoal> {
    let target = month_number(month);
    goals
        .iter()
        .filter(move |g| target.is_some() && month_number(&g.month) == target)
}

// ==================== Tests ====================
