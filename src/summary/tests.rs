#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn month(s: &str) -> MonthKey {
    MonthKey::parse(s).unwrap()
}

fn expense(title: &str, amount: Decimal, date_str: &str, category_id: Option<i64>) -> Expense {
    Expense {
        id: None,
        title: title.into(),
        amount,
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        category_id,
        created_at: String::new(),
    }
}

fn category(id: i64, name: &str) -> Category {
    Category {
        id: Some(id),
        name: name.into(),
        color: String::new(),
    }
}

/// Two December expenses, one November expense, two categories.
fn fixture() -> (Vec<Expense>, Vec<Category>) {
    let expenses = vec![
        expense("example 1", dec!(100), "2025-12-05", Some(1)),
        expense("example 2", dec!(250), "2025-12-12", Some(2)),
        expense("example 3", dec!(320), "2025-11-15", Some(1)),
    ];
    let categories = vec![category(1, "Food"), category(2, "Transport")];
    (expenses, categories)
}

// ── expenses_in_month ─────────────────────────────────────────

#[test]
fn test_expenses_in_month_filters() {
    let (expenses, _) = fixture();
    let december = expenses_in_month(&expenses, month("2025-12"));
    assert_eq!(december.len(), 2);
    assert!(december.iter().all(|e| e.date >= date(2025, 12, 1)));
}

#[test]
fn test_expenses_in_month_empty_month() {
    let (expenses, _) = fixture();
    assert!(expenses_in_month(&expenses, month("2025-10")).is_empty());
}

#[test]
fn test_expenses_in_month_empty_input() {
    assert!(expenses_in_month(&[], month("2025-12")).is_empty());
}

#[test]
fn test_expenses_in_month_does_not_mutate_input() {
    let (expenses, _) = fixture();
    let before: Vec<String> = expenses.iter().map(|e| e.title.clone()).collect();
    let _ = expenses_in_month(&expenses, month("2025-12"));
    let after: Vec<String> = expenses.iter().map(|e| e.title.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_expenses_in_month_ignores_input_order() {
    // The engine doesn't promise an output order (display sorts date-desc
    // separately), but membership must not depend on input order.
    let (mut expenses, _) = fixture();
    expenses.reverse();
    assert_eq!(expenses_in_month(&expenses, month("2025-12")).len(), 2);
}

#[test]
fn test_month_disjointness() {
    // Every expense lands in exactly one month bucket.
    let (expenses, _) = fixture();
    let m1 = expenses_in_month(&expenses, month("2025-11"));
    let m2 = expenses_in_month(&expenses, month("2025-12"));
    assert_eq!(m1.len() + m2.len(), expenses.len());
    for e in &m1 {
        assert!(!m2.iter().any(|o| o.title == e.title));
    }
}

#[test]
fn test_month_boundary_inclusivity() {
    let expenses = vec![
        expense("first instant", dec!(10), "2025-12-01", None),
        expense("next first instant", dec!(20), "2026-01-01", None),
    ];
    let december = expenses_in_month(&expenses, month("2025-12"));
    let january = expenses_in_month(&expenses, month("2026-01"));
    assert_eq!(december.len(), 1);
    assert_eq!(december[0].title, "first instant");
    assert_eq!(january.len(), 1);
    assert_eq!(january[0].title, "next first instant");
}

// ── month_total ───────────────────────────────────────────────

#[test]
fn test_month_total() {
    let (expenses, _) = fixture();
    assert_eq!(month_total(&expenses, month("2025-12")), dec!(350));
    assert_eq!(month_total(&expenses, month("2025-11")), dec!(320));
}

#[test]
fn test_month_total_empty_is_zero() {
    let (expenses, _) = fixture();
    assert_eq!(month_total(&expenses, month("2025-10")), Decimal::ZERO);
    assert_eq!(month_total(&[], month("2025-12")), Decimal::ZERO);
}

#[test]
fn test_month_total_nonnegative_for_nonnegative_amounts() {
    let (expenses, _) = fixture();
    assert!(expenses.iter().all(|e| e.amount >= Decimal::ZERO));
    assert!(month_total(&expenses, month("2025-12")) >= Decimal::ZERO);
}

#[test]
fn test_month_total_sums_negative_amounts_as_is() {
    // Sign validation is an input-layer concern; the engine must not drop
    // or clamp refunds.
    let expenses = vec![
        expense("purchase", dec!(100), "2025-12-05", Some(1)),
        expense("refund", dec!(-30), "2025-12-06", Some(1)),
    ];
    assert_eq!(month_total(&expenses, month("2025-12")), dec!(70));
}

// ── category_totals ───────────────────────────────────────────

#[test]
fn test_category_totals_groups_by_category() {
    let (expenses, categories) = fixture();
    let totals = category_totals(&expenses, &categories, month("2025-12"));
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].category.name, "Food");
    assert_eq!(totals[0].total, dec!(100));
    assert_eq!(totals[1].category.name, "Transport");
    assert_eq!(totals[1].total, dec!(250));
}

#[test]
fn test_category_totals_omits_unspent_categories() {
    let (expenses, mut categories) = fixture();
    categories.push(category(3, "Entertainment"));
    let totals = category_totals(&expenses, &categories, month("2025-12"));
    assert!(!totals.iter().any(|t| t.category.name == "Entertainment"));
}

#[test]
fn test_category_totals_preserves_input_order() {
    // No sort by total: entries follow the order categories came in.
    let (expenses, mut categories) = fixture();
    categories.reverse();
    let totals = category_totals(&expenses, &categories, month("2025-12"));
    assert_eq!(totals[0].category.name, "Transport");
    assert_eq!(totals[1].category.name, "Food");
}

#[test]
fn test_category_totals_dangling_reference_goes_uncategorized() {
    let (mut expenses, categories) = fixture();
    expenses.push(expense("mystery", dec!(40), "2025-12-20", Some(99)));
    let totals = category_totals(&expenses, &categories, month("2025-12"));
    let last = totals.last().unwrap();
    assert!(last.category.id.is_none());
    assert_eq!(last.category.name, crate::models::UNCATEGORIZED_NAME);
    assert_eq!(last.total, dec!(40));
}

#[test]
fn test_category_totals_absent_reference_goes_uncategorized() {
    let expenses = vec![expense("cash", dec!(15), "2025-12-03", None)];
    let (_, categories) = fixture();
    let totals = category_totals(&expenses, &categories, month("2025-12"));
    assert_eq!(totals.len(), 1);
    assert!(totals[0].category.id.is_none());
    assert_eq!(totals[0].total, dec!(15));
}

#[test]
fn test_category_totals_no_known_categories() {
    // Everything lands in the uncategorized bucket; nothing is dropped.
    let (expenses, _) = fixture();
    let totals = category_totals(&expenses, &[], month("2025-12"));
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].total, dec!(350));
}

#[test]
fn test_category_totals_empty_month() {
    let (expenses, categories) = fixture();
    assert!(category_totals(&expenses, &categories, month("2025-10")).is_empty());
}

#[test]
fn test_partition_property() {
    // Breakdown entries (uncategorized included) sum to the month total,
    // exactly — Decimal arithmetic, no tolerance needed.
    let (mut expenses, categories) = fixture();
    expenses.push(expense("mystery", dec!(40), "2025-12-20", Some(99)));
    expenses.push(expense("cash", dec!(7.25), "2025-12-21", None));
    expenses.push(expense("refund", dec!(-12.50), "2025-12-22", Some(2)));

    let totals = category_totals(&expenses, &categories, month("2025-12"));
    let breakdown_sum: Decimal = totals.iter().map(|t| t.total).sum();
    assert_eq!(breakdown_sum, month_total(&expenses, month("2025-12")));
}

#[test]
fn test_partition_holds_when_category_nets_negative() {
    // A category whose month nets negative still appears (the filter is
    // non-zero, not positive), otherwise the partition would break.
    let expenses = vec![expense("refund", dec!(-30), "2025-12-06", Some(1))];
    let categories = vec![category(1, "Food")];
    let totals = category_totals(&expenses, &categories, month("2025-12"));
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].total, dec!(-30));
}

#[test]
fn test_category_netting_to_zero_is_omitted() {
    let expenses = vec![
        expense("purchase", dec!(30), "2025-12-05", Some(1)),
        expense("refund", dec!(-30), "2025-12-06", Some(1)),
    ];
    let categories = vec![category(1, "Food")];
    assert!(category_totals(&expenses, &categories, month("2025-12")).is_empty());
}

// ── trailing_month_series ─────────────────────────────────────

#[test]
fn test_trailing_series_totals() {
    let (expenses, _) = fixture();
    let series = trailing_month_series(&expenses, 3, month("2025-12"));
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].month, month("2025-10"));
    assert_eq!(series[0].total, Decimal::ZERO);
    assert_eq!(series[1].month, month("2025-11"));
    assert_eq!(series[1].total, dec!(320));
    assert_eq!(series[2].month, month("2025-12"));
    assert_eq!(series[2].total, dec!(350));
}

#[test]
fn test_trailing_series_length_and_contiguity() {
    let (expenses, _) = fixture();
    let series = trailing_month_series(&expenses, 12, month("2025-12"));
    assert_eq!(series.len(), 12);
    for pair in series.windows(2) {
        assert_eq!(pair[0].month.next(), pair[1].month);
    }
    assert_eq!(series.last().unwrap().month, month("2025-12"));
}

#[test]
fn test_trailing_series_crosses_year_boundary() {
    let series = trailing_month_series(&[], 3, month("2026-01"));
    let keys: Vec<String> = series.iter().map(|e| e.month.to_string()).collect();
    assert_eq!(keys, ["2025-11", "2025-12", "2026-01"]);
}

#[test]
fn test_trailing_series_empty_expenses() {
    let series = trailing_month_series(&[], 6, month("2025-12"));
    assert_eq!(series.len(), 6);
    assert!(series.iter().all(|e| e.total == Decimal::ZERO));
}

#[test]
fn test_trailing_series_zero_count() {
    assert!(trailing_month_series(&[], 0, month("2025-12")).is_empty());
}

#[test]
fn test_trailing_series_labels_derive_from_keys() {
    let series = trailing_month_series(&[], 2, month("2025-12"));
    assert_eq!(series[0].label, "November 2025");
    assert_eq!(series[1].label, "December 2025");
}

// ── idempotence ───────────────────────────────────────────────

#[test]
fn test_repeat_calls_agree() {
    let (mut expenses, categories) = fixture();
    expenses.push(expense("mystery", dec!(40), "2025-12-20", Some(99)));

    let first = category_totals(&expenses, &categories, month("2025-12"));
    let second = category_totals(&expenses, &categories, month("2025-12"));
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.category.name, b.category.name);
        assert_eq!(a.total, b.total);
    }
    assert_eq!(
        month_total(&expenses, month("2025-12")),
        month_total(&expenses, month("2025-12"))
    );
}
