//! Category totals, income sums and goal averages

use moneyhog_store::{BudgetGoal, Expense, Income};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::types::CategoryKey;

/// Total amount per category
///
/// Iteration is ascending by category name. The order in which
/// categories were first seen is kept as well for plain listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    totals: BTreeMap<String, Decimal>,
    discovery: Vec<String>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: &str, amount: Decimal) {
        match self.totals.get_mut(category) {
            Some(total) => *total += amount,
            None => {
                self.totals.insert(category.to_string(), amount);
                self.discovery.push(category.to_string());
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.totals.get(category).copied()
    }

    /// Entries sorted by category name
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.totals.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Entries in the order their category first appeared
    pub fn in_discovery_order(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.discovery
            .iter()
            .map(move |k| (k.as_str(), self.totals.get(k).copied().unwrap_or_default()))
    }

    pub fn categories(&self) -> Vec<&str> {
        self.totals.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Sum over every category
    pub fn grand_total(&self) -> Decimal {
        self.totals.values().copied().sum()
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.totals.serialize(serializer)
    }
}

/// Sum expense amounts per category, comparing names exactly
pub fn aggregate_by_category<'a, I>(records: I) -> CategoryTotals
where
    I: IntoIterator<Item = &'a Expense>,
{
    aggregate_by_category_with(records, CategoryKey::Exact)
}

/// Sum expense amounts per category under the given identity rule
pub fn aggregate_by_category_with<'a, I>(records: I, key: CategoryKey) -> CategoryTotals
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut totals = CategoryTotals::new();
    for record in records {
        totals.add(key.normalize(&record.category), record.amount);
    }
    totals
}

/// Scalar sum of income amounts
pub fn aggregate_income<'a, I>(records: I) -> Decimal
where
    I: IntoIterator<Item = &'a Income>,
{
    records.into_iter().map(|r| r.amount).sum()
}

/// Number of expense records per category
pub fn count_by_category<'a, I>(records: I, key: CategoryKey) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts
            .entry(key.normalize(&record.category).to_string())
            .or_insert(0) += 1;
    }
    counts
}

/// Mean min and max goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalAverages {
    pub min: Decimal,
    pub max: Decimal,
}

/// Average the goals; `None` when there are no goals
pub fn average_goals<'a, I>(goals: I) -> Option<GoalAverages>
where
    I: IntoIterator<Item = &'a BudgetGoal>,
{
    let mut count = 0u64;
    let mut min_sum = 0u64;
    let mut max_sum = 0u64;
    for goal in goals {
        count += 1;
        min_sum += u64::from(goal.min_goal);
        max_sum += u64::from(goal.max_goal);
    }

    if count == 0 {
        return None;
    }

    let count = Decimal::from(count);
    Some(GoalAverages {
        min: Decimal::from(min_sum) / count,
        max: Decimal::from(max_sum) / count,
    })
}

/// Min/max pair of one category's goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalRange {
    pub min: u32,
    pub max: u32,
}

/// Goals keyed by category; a later goal for the same category wins
pub fn goals_by_category<'a, I>(goals: I, key: CategoryKey) -> BTreeMap<String, GoalRange>
where
    I: IntoIterator<Item = &'a BudgetGoal>,
{
    goals
        .into_iter()
        .map(|g| {
            (
                key.normalize(&g.category).to_string(),
                GoalRange {
                    min: g.min_goal,
                    max: g.max_goal,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(category: &str, amount: i64, date: &str) -> Expense {
        Expense {
            category: category.to_string(),
            amount: Decimal::new(amount, 0),
            date: date.to_string(),
            ..Default::default()
        }
    }

    fn goal(category: &str, min: u32, max: u32) -> BudgetGoal {
        BudgetGoal {
            owner_email: "a@b.com".to_string(),
            category: category.to_string(),
            month: "January".to_string(),
            min_goal: min,
            max_goal: max,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense("Food", 100, "2025-01-05"),
            expense("Food", 50, "2025-02-01"),
            expense("Transport", 30, "2025-01-10"),
        ]
    }

    #[test]
    fn test_aggregate_by_category() {
        let totals = aggregate_by_category(&sample());
        assert_eq!(totals.len(), 2);
        assert_eq!(totals.get("Food"), Some(Decimal::new(150, 0)));
        assert_eq!(totals.get("Transport"), Some(Decimal::new(30, 0)));
        assert_eq!(totals.get("Rent"), None);
    }

    #[test]
    fn test_sum_preserved() {
        let records = vec![
            expense("Zoo", 7, ""),
            expense("Food", 12, "2025-01-01"),
            expense("food", 3, "2025-01-01"),
            expense("", 0, ""),
            expense("Zoo", 1, "x"),
        ];
        let totals = aggregate_by_category(&records);
        let input_sum: Decimal = records.iter().map(|r| r.amount).sum();
        assert_eq!(totals.grand_total(), input_sum);

        for (category, total) in totals.iter() {
            let expected: Decimal = records
                .iter()
                .filter(|r| r.category == category)
                .map(|r| r.amount)
                .sum();
            assert_eq!(total, expected);
        }
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let records = sample();
        assert_eq!(aggregate_by_category(&records), aggregate_by_category(&records));
    }

    #[test]
    fn test_ordering() {
        let records = vec![
            expense("Transport", 1, ""),
            expense("Food", 1, ""),
            expense("Bills", 1, ""),
            expense("Food", 1, ""),
        ];
        let totals = aggregate_by_category(&records);
        assert_eq!(totals.categories(), vec!["Bills", "Food", "Transport"]);
        let discovered: Vec<&str> = totals.in_discovery_order().map(|(c, _)| c).collect();
        assert_eq!(discovered, vec!["Transport", "Food", "Bills"]);
    }

    #[test]
    fn test_category_key_rule() {
        let records = vec![expense("Food ", 10, ""), expense("Food", 5, "")];
        assert_eq!(aggregate_by_category(&records).len(), 2);

        let trimmed = aggregate_by_category_with(&records, CategoryKey::Trimmed);
        assert_eq!(trimmed.len(), 1);
        assert_eq!(trimmed.get("Food"), Some(Decimal::new(15, 0)));

        let counts = count_by_category(&records, CategoryKey::Trimmed);
        assert_eq!(counts.get("Food"), Some(&2));
    }

    #[test]
    fn test_aggregate_income() {
        let income = vec![
            Income {
                amount: Decimal::new(1000, 0),
                ..Default::default()
            },
            Income {
                amount: Decimal::new(2505, 1),
                ..Default::default()
            },
        ];
        assert_eq!(aggregate_income(&income), Decimal::new(12505, 1));
        assert_eq!(aggregate_income(&Vec::<Income>::new()), Decimal::ZERO);
    }

    #[test]
    fn test_average_goals() {
        assert_eq!(average_goals(&Vec::<BudgetGoal>::new()), None);

        let goals = vec![goal("Food", 10, 50), goal("Transport", 20, 70)];
        let averages = average_goals(&goals).unwrap();
        assert_eq!(averages.min, Decimal::new(15, 0));
        assert_eq!(averages.max, Decimal::new(60, 0));
    }

    #[test]
    fn test_goals_by_category_last_wins() {
        let goals = vec![goal("Food", 10, 50), goal("Food", 20, 70)];
        let by_category = goals_by_category(&goals, CategoryKey::Exact);
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category["Food"], GoalRange { min: 20, max: 70 });
    }

    #[test]
    fn test_totals_serialize_as_map() {
        let totals = aggregate_by_category(&sample());
        let json = serde_json::to_value(&totals).unwrap();
        assert!(json.is_object());
        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
