#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_new() {
    let cat = Category::new("Groceries".into(), "#22c55e".into());
    assert!(cat.id.is_none());
    assert_eq!(cat.name, "Groceries");
    assert_eq!(cat.color, "#22c55e");
}

#[test]
fn test_category_display() {
    let cat = Category::new("Transport".into(), "#3b82f6".into());
    assert_eq!(format!("{cat}"), "Transport");
}

#[test]
fn test_category_find_by_name_case_insensitive() {
    let cats = vec![
        Category {
            id: Some(1),
            name: "Groceries".into(),
            color: String::new(),
        },
        Category {
            id: Some(2),
            name: "Transport".into(),
            color: String::new(),
        },
    ];
    assert_eq!(
        Category::find_by_name(&cats, "transport").and_then(|c| c.id),
        Some(2)
    );
    assert!(Category::find_by_name(&cats, "rent").is_none());
}

#[test]
fn test_category_find_by_id() {
    let cats = vec![Category {
        id: Some(7),
        name: "Housing".into(),
        color: String::new(),
    }];
    assert_eq!(
        Category::find_by_id(&cats, 7).map(|c| c.name.as_str()),
        Some("Housing")
    );
    assert!(Category::find_by_id(&cats, 8).is_none());
}

#[test]
fn test_category_rgb_valid() {
    let cat = Category::new("Groceries".into(), "#22c55e".into());
    assert_eq!(cat.rgb(), Some((0x22, 0xc5, 0x5e)));
}

#[test]
fn test_category_rgb_invalid() {
    for bad in ["22c55e", "#22c5", "#gggggg", "", "#22c55e00"] {
        let cat = Category::new("X".into(), bad.into());
        assert_eq!(cat.rgb(), None, "expected None for {bad:?}");
    }
}

#[test]
fn test_uncategorized() {
    let cat = Category::uncategorized();
    assert!(cat.id.is_none());
    assert_eq!(cat.name, UNCATEGORIZED_NAME);
    assert_eq!(cat.color, UNCATEGORIZED_COLOR);
    // The fallback color must itself be renderable as a swatch
    assert!(cat.rgb().is_some());
}

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_expense_new() {
    let date = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
    let exp = Expense::new("Coffee".into(), dec!(4.50), date, Some(1));
    assert!(exp.id.is_none());
    assert_eq!(exp.title, "Coffee");
    assert_eq!(exp.amount, dec!(4.50));
    assert_eq!(exp.date, date);
    assert_eq!(exp.category_id, Some(1));
    assert!(!exp.created_at.is_empty());
}

#[test]
fn test_expense_without_category() {
    let date = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
    let exp = Expense::new("Cash tip".into(), dec!(2), date, None);
    assert!(exp.category_id.is_none());
}
