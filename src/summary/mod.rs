//! Month-bucketed aggregation over expense snapshots.
//!
//! Every function here is a pure computation over the collections it is
//! handed: no storage access, no hidden state, safe to call repeatedly with
//! different month keys without re-fetching.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{Category, Expense};
use crate::month::MonthKey;

/// A known category's spending within one month, or the synthetic
/// uncategorized bucket (`category.id == None`).
#[derive(Debug, Clone)]
pub(crate) struct CategoryTotal {
    pub(crate) category: Category,
    pub(crate) total: Decimal,
}

/// One entry of a trailing-month series.
#[derive(Debug, Clone)]
pub(crate) struct MonthTotal {
    pub(crate) month: MonthKey,
    pub(crate) label: String,
    pub(crate) total: Decimal,
}

/// The expenses dated within `month`. Output order is unspecified; display
/// sorting (date descending) is the caller's concern.
pub(crate) fn expenses_in_month(expenses: &[Expense], month: MonthKey) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| month.contains(e.date))
        .cloned()
        .collect()
}

/// Sum of amounts within `month`; zero for an empty month. Negative amounts
/// sum as-is — sign policy belongs to the input layer, not here.
pub(crate) fn month_total(expenses: &[Expense], month: MonthKey) -> Decimal {
    expenses
        .iter()
        .filter(|e| month.contains(e.date))
        .map(|e| e.amount)
        .sum()
}

/// Per-category totals within `month`.
///
/// Entries follow the input order of `categories`; categories with nothing
/// spent that month are omitted. Expenses whose `category_id` matches no
/// known category accumulate into one uncategorized entry appended last.
/// The entries always partition the month: their totals sum to
/// `month_total(expenses, month)` exactly.
pub(crate) fn category_totals(
    expenses: &[Expense],
    categories: &[Category],
    month: MonthKey,
) -> Vec<CategoryTotal> {
    let known = |id: i64| categories.iter().any(|c| c.id == Some(id));

    // Key None collects both absent and dangling references.
    let mut buckets: HashMap<Option<i64>, Decimal> = HashMap::new();
    for exp in expenses.iter().filter(|e| month.contains(e.date)) {
        let key = exp.category_id.filter(|id| known(*id));
        *buckets.entry(key).or_insert(Decimal::ZERO) += exp.amount;
    }

    let mut totals: Vec<CategoryTotal> = categories
        .iter()
        .filter_map(|cat| {
            let id = cat.id?;
            let total = buckets.get(&Some(id)).copied().unwrap_or(Decimal::ZERO);
            (total != Decimal::ZERO).then(|| CategoryTotal {
                category: cat.clone(),
                total,
            })
        })
        .collect();

    if let Some(&unmatched) = buckets.get(&None) {
        if unmatched != Decimal::ZERO {
            totals.push(CategoryTotal {
                category: Category::uncategorized(),
                total: unmatched,
            });
        }
    }

    totals
}

/// Exactly `count` consecutive months ending at `anchor`, oldest first.
/// Months with no expenses get a zero total, so the series is always
/// contiguous and gap-free.
pub(crate) fn trailing_month_series(
    expenses: &[Expense],
    count: usize,
    anchor: MonthKey,
) -> Vec<MonthTotal> {
    let mut by_month: HashMap<MonthKey, Decimal> = HashMap::new();
    for exp in expenses {
        *by_month
            .entry(MonthKey::of_date(exp.date))
            .or_insert(Decimal::ZERO) += exp.amount;
    }

    let mut series = Vec::with_capacity(count);
    let mut month = anchor;
    for _ in 0..count {
        let total = by_month.get(&month).copied().unwrap_or(Decimal::ZERO);
        series.push(MonthTotal {
            month,
            label: month.label(),
            total,
        });
        month = month.prev();
    }
    series.reverse();
    series
}

#[cfg(test)]
mod tests;
