//! Chart-ready series built from aggregated totals

use chrono::Datelike;
use moneyhog_store::Expense;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aggregation::{aggregate_by_category_with, CategoryTotals, GoalAverages, GoalRange};
use crate::range::parse_date;
use crate::types::{month_marker, month_number, CategoryKey, MonthMatch, INCOME_LABEL};

/// Convert an exact amount to a chart value
pub fn chart_value(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or(0.0)
}

/// One bar pair of the income-versus-expenses chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub label: String,
    pub expense: f64,
    pub income: f64,
}

/// Expense categories in name order, then a single trailing "Income" entry
pub fn build_comparison_series(totals: &CategoryTotals, income_total: Decimal) -> Vec<ComparisonEntry> {
    let mut series: Vec<ComparisonEntry> = totals
        .iter()
        .map(|(category, total)| ComparisonEntry {
            label: category.to_string(),
            expense: chart_value(total),
            income: 0.0,
        })
        .collect();

    series.push(ComparisonEntry {
        label: INCOME_LABEL.to_string(),
        expense: 0.0,
        income: chart_value(income_total),
    });
    series
}

/// Horizontal threshold lines drawn over a bar chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalOverlay {
    pub min_line: f64,
    pub max_line: f64,
}

pub fn build_goal_overlay(averages: Option<GoalAverages>) -> Option<GoalOverlay> {
    averages.map(|a| GoalOverlay {
        min_line: chart_value(a.min),
        max_line: chart_value(a.max),
    })
}

/// Whether a serialized record date belongs to calendar month `month`
pub fn matches_month(date: &str, month: u32, rule: MonthMatch) -> bool {
    match rule {
        MonthMatch::Substring => date.contains(&month_marker(month)),
        MonthMatch::Structured => parse_date(date).map_or(false, |d| d.month() == month),
    }
}

/// Totals of the records dated in `target_month`, matching the "-MM-"
/// segment of the serialized date
pub fn build_monthly_filtered_totals<'a, I>(records: I, target_month: &str) -> CategoryTotals
where
    I: IntoIterator<Item = &'a Expense>,
{
    build_monthly_filtered_totals_with(records, target_month, MonthMatch::Substring, CategoryKey::Exact)
}

/// Totals of the records dated in `target_month`
///
/// An unknown month name matches nothing.
pub fn build_monthly_filtered_totals_with<'a, I>(
    records: I,
    target_month: &str,
    rule: MonthMatch,
    key: CategoryKey,
) -> CategoryTotals
where
    I: IntoIterator<Item = &'a Expense>,
{
    let month = match month_number(target_month) {
        Some(m) => m,
        None => {
            log::debug!("Unknown month name '{}', no records match", target_month);
            return CategoryTotals::new();
        }
    };

    aggregate_by_category_with(
        records
            .into_iter()
            .filter(|r| matches_month(&r.date, month, rule)),
        key,
    )
}

/// One category point of the spending line chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingPoint {
    pub category: String,
    pub spent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_goal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_goal: Option<f64>,
}

/// Spent amount per category with the goal lines for each point
///
/// A category without its own goal falls back to `fallback`, usually the
/// month average. Without either the goal values are absent.
pub fn build_spending_line_series(
    totals: &CategoryTotals,
    goals: &BTreeMap<String, GoalRange>,
    fallback: Option<GoalAverages>,
) -> Vec<SpendingPoint> {
    totals
        .iter()
        .map(|(category, spent)| {
            let (min_goal, max_goal) = match (goals.get(category), fallback) {
                (Some(goal), _) => (Some(f64::from(goal.min)), Some(f64::from(goal.max))),
                (None, Some(avg)) => (Some(chart_value(avg.min)), Some(chart_value(avg.max))),
                (None, None) => (None, None),
            };
            SpendingPoint {
                category: category.to_string(),
                spent: chart_value(spent),
                min_goal,
                max_goal,
            }
        })
        .collect()
}
