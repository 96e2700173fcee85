use anyhow::{Context, Result};

use crate::month::MonthKey;
use crate::store::Database;
use crate::summary;
use crate::ui::app::TREND_MONTHS;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], db),
        "trend" | "t" => cli_trend(&args[2..], db),
        "categories" => cli_categories(db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendtui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SpendTUI — local-only personal expense tracker");
    println!();
    println!("Usage: spendtui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary [YYYY-MM]             Print monthly total and category breakdown");
    println!("  trend [months]                Print trailing monthly totals (default: 12)");
    println!("  categories                    List all categories");
    println!("  export [path]                 Export expenses to CSV");
    println!("    --month <YYYY-MM>           Month to export (default: current)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

/// An explicit month argument must parse; only a missing one defaults to the
/// current month.
fn month_arg(args: &[String]) -> Result<MonthKey> {
    match args.first().filter(|a| !a.starts_with('-')) {
        Some(text) => Ok(MonthKey::parse(text)?),
        None => Ok(MonthKey::current()),
    }
}

fn cli_summary(args: &[String], db: &mut Database) -> Result<()> {
    let month = month_arg(args)?;

    let expenses = db.get_expenses()?;
    let categories = db.get_categories()?;
    let total = summary::month_total(&expenses, month);
    let in_month = summary::expenses_in_month(&expenses, month);
    let breakdown = summary::category_totals(&expenses, &categories, month);

    println!("SpendTUI — {month}");
    println!("{}", "─".repeat(40));
    println!("  Total:    ${:.2}", total);
    println!("  Expenses: {}", in_month.len());

    if !breakdown.is_empty() {
        println!();
        println!("By category:");
        for entry in &breakdown {
            println!("  {:<24} ${:.2}", entry.category.name, entry.total);
        }
    }

    Ok(())
}

fn cli_trend(args: &[String], db: &mut Database) -> Result<()> {
    let months: usize = match args.first() {
        Some(n) => n.parse().context("Trend length must be a number")?,
        None => TREND_MONTHS,
    };

    let expenses = db.get_expenses()?;
    let series = summary::trailing_month_series(&expenses, months, MonthKey::current());

    for entry in &series {
        println!("  {:<16} ${:.2}", entry.label, entry.total);
    }
    Ok(())
}

fn cli_categories(db: &mut Database) -> Result<()> {
    let categories = db.get_categories()?;
    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }

    println!("{:<4} {:<24} Color", "ID", "Name");
    println!("{}", "─".repeat(40));
    for cat in &categories {
        println!("{:<4} {:<24} {}", cat.id.unwrap_or(0), cat.name, cat.color);
    }
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let month = match args
        .windows(2)
        .find(|w| w[0] == "--month")
        .map(|w| w[1].as_str())
    {
        Some(text) => MonthKey::parse(text)?,
        None => MonthKey::current(),
    };

    // Output path is the first non-flag argument
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/spendtui-export-{month}.csv")
        });

    let count = db.export_to_csv(&output_path, Some(month))?;
    if count == 0 {
        println!("No expenses for {month}");
    } else {
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
