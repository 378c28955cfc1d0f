//! Report structures for API responses

use moneyhog_config::{Config, CurrencyConfig};
use moneyhog_utils::format_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::{CategoryTotals, GoalAverages};
use crate::range::DateRange;
use crate::series::{build_goal_overlay, chart_value, ComparisonEntry, GoalOverlay, SpendingPoint};
use crate::types::INCOME_LABEL;

pub const MIN_GOAL_LABEL: &str = "Avg Min Goal";
pub const MAX_GOAL_LABEL: &str = "Avg Max Goal";

/// Chart data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub label: String,
    pub value: f64,
}

/// Chart dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// Horizontal reference line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalLine {
    pub label: String,
    pub value: f64,
}

/// One line of the category totals listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotalLine {
    pub category: String,
    pub total: Decimal,
    pub formatted: String,
}

/// Category totals for a date range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalsSummary {
    pub title: String,
    pub range: DateRange,
    /// Categories in the order they were first seen
    pub totals: Vec<CategoryTotalLine>,
    /// "Category: R123.00" lines
    pub lines: Vec<String>,
    pub grand_total: Decimal,
    pub formatted_total: String,
    pub record_count: usize,
}

/// Title of the totals listing
pub fn totals_title(range: &DateRange) -> String {
    match (&range.from, &range.to) {
        (Some(from), Some(to)) => format!("Total spent on categories during {} - {}", from, to),
        _ => "Category Total Spent".to_string(),
    }
}

pub fn totals_summary(
    totals: &CategoryTotals,
    range: &DateRange,
    record_count: usize,
    currency: &CurrencyConfig,
) -> TotalsSummary {
    let format = |amount: Decimal| {
        format_amount(
            amount,
            &currency.symbol,
            currency.decimal_places,
            &currency.thousands_separator,
        )
    };

    let lines: Vec<CategoryTotalLine> = totals
        .in_discovery_order()
        .map(|(category, total)| CategoryTotalLine {
            category: category.to_string(),
            total,
            formatted: format(total),
        })
        .collect();
    let text = lines
        .iter()
        .map(|l| format!("{}: {}", l.category, l.formatted))
        .collect();
    let grand_total = totals.grand_total();

    TotalsSummary {
        title: totals_title(range),
        range: range.clone(),
        totals: lines,
        lines: text,
        grand_total,
        formatted_total: format(grand_total),
        record_count,
    }
}

/// Monthly spending bar chart with the average goal lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyChart {
    pub month: String,
    pub labels: Vec<String>,
    pub bars: Vec<ChartDataPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<GoalOverlay>,
    pub goal_lines: Vec<GoalLine>,
    pub total: f64,
}

pub fn build_monthly_bar_chart(
    month: &str,
    totals: &CategoryTotals,
    averages: Option<GoalAverages>,
    show_goal_lines: bool,
) -> MonthlyChart {
    let bars: Vec<ChartDataPoint> = totals
        .iter()
        .map(|(category, total)| ChartDataPoint {
            label: category.to_string(),
            value: chart_value(total),
        })
        .collect();

    let overlay = if show_goal_lines {
        build_goal_overlay(averages)
    } else {
        None
    };
    let goal_lines = overlay
        .map(|o| {
            vec![
                GoalLine {
                    label: MIN_GOAL_LABEL.to_string(),
                    value: o.min_line,
                },
                GoalLine {
                    label: MAX_GOAL_LABEL.to_string(),
                    value: o.max_line,
                },
            ]
        })
        .unwrap_or_default();

    MonthlyChart {
        month: month.to_string(),
        labels: bars.iter().map(|b| b.label.clone()).collect(),
        bars,
        overlay,
        goal_lines,
        total: chart_value(totals.grand_total()),
    }
}

/// Grouped bars of expenses per category against total income
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonChart {
    pub labels: Vec<String>,
    pub entries: Vec<ComparisonEntry>,
    pub datasets: Vec<ChartDataset>,
    pub total_expenses: f64,
    pub total_income: f64,
}

impl ComparisonChart {
    pub fn from_entries(entries: Vec<ComparisonEntry>) -> Self {
        let total_expenses: f64 = entries.iter().map(|e| e.expense).sum();
        let total_income: f64 = entries.iter().map(|e| e.income).sum();
        Self {
            labels: entries.iter().map(|e| e.label.clone()).collect(),
            datasets: vec![
                ChartDataset {
                    label: "Expenses".to_string(),
                    data: entries.iter().map(|e| e.expense).collect(),
                },
                ChartDataset {
                    label: INCOME_LABEL.to_string(),
                    data: entries.iter().map(|e| e.income).collect(),
                },
            ],
            entries,
            total_expenses,
            total_income,
        }
    }
}

/// Spending per category over a trailing window, with goal lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingChart {
    pub period: String,
    pub range: DateRange,
    pub month: String,
    pub labels: Vec<String>,
    pub points: Vec<SpendingPoint>,
    pub datasets: Vec<ChartDataset>,
}

impl SpendingChart {
    pub fn new(period: &str, range: DateRange, month: &str, points: Vec<SpendingPoint>) -> Self {
        let mut datasets = vec![ChartDataset {
            label: "Spent".to_string(),
            data: points.iter().map(|p| p.spent).collect(),
        }];
        // Goal datasets only when every point has a goal
        if !points.is_empty() && points.iter().all(|p| p.min_goal.is_some()) {
            datasets.push(ChartDataset {
                label: "Min Goal".to_string(),
                data: points.iter().filter_map(|p| p.min_goal).collect(),
            });
            datasets.push(ChartDataset {
                label: "Max Goal".to_string(),
                data: points.iter().filter_map(|p| p.max_goal).collect(),
            });
        }

        Self {
            period: period.to_string(),
            range,
            month: month.to_string(),
            labels: points.iter().map(|p| p.category.clone()).collect(),
            points,
            datasets,
        }
    }
}

/// Effective settings exposed to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub date_policy: String,
    pub month_match: String,
    pub trim_categories: bool,
    pub default_period: String,
    pub show_goal_lines: bool,
    pub currency_symbol: String,
    pub decimal_places: u32,
    pub default_email: String,
}

impl From<&Config> for SettingsResponse {
    fn from(config: &Config) -> Self {
        Self {
            date_policy: config.policy.date_policy.to_string(),
            month_match: config.policy.month_match.to_string(),
            trim_categories: config.policy.trim_categories,
            default_period: config.charts.default_period.to_string(),
            show_goal_lines: config.charts.show_goal_lines,
            currency_symbol: config.currency.symbol.clone(),
            decimal_places: config.currency.decimal_places,
            default_email: config.users.default_email.clone(),
        }
    }
}
