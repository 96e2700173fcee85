use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::app::{App, Screen};
use crate::models::{Category, Expense};
use crate::month::MonthKey;
use crate::store::Database;

/// Color given to categories created without an explicit one.
const DEFAULT_CATEGORY_COLOR: &str = "#64748b";

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SpendTUI", cmd_quit, r);
    register_command!("quit", "Quit SpendTUI", cmd_quit, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("s", "Go to Stats", cmd_stats, r);
    register_command!("stats", "Go to Stats", cmd_stats, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2025-12)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2025-12)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 2025-12-05 Coffee 4.50 Groceries)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add expense (e.g. :a 2025-12-05 Coffee 4.50)",
        cmd_add,
        r
    );
    register_command!(
        "category",
        "Create category (e.g. :category Coffee #6f4e37)",
        cmd_category,
        r
    );
    register_command!(
        "export",
        "Export this month to CSV (e.g. :export ~/december.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh(db)?;
    Ok(())
}

fn cmd_stats(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Stats;
    app.refresh(db)?;
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    app.refresh(db)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        // No args → back to the current month
        let month = MonthKey::current();
        app.set_month(month);
        app.set_status(format!("Month: {month}"));
        return Ok(());
    }

    // Accept "12" or "3" shorthand within the selected year
    let text = if args.len() <= 2 {
        format!("{}-{args:0>2}", app.current_month.year())
    } else {
        args.to_string()
    };

    match MonthKey::parse(&text) {
        Ok(month) => {
            app.set_month(month);
            app.set_status(format!("Month: {month}"));
        }
        // Never fall back silently: a typo'd month must not read as "current"
        Err(e) => app.set_status(e.to_string()),
    }

    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let month = app.current_month.next();
    app.set_month(month);
    app.set_status(format!("Month: {month}"));
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let month = app.current_month.prev();
    app.set_month(month);
    app.set_status(format!("Month: {month}"));
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    const USAGE: &str = "Usage: :add <YYYY-MM-DD> <title> <amount> [category]";

    if args.is_empty() {
        app.set_status(USAGE);
        return Ok(());
    }

    let (date_str, rest) = match args.split_once(' ') {
        Some(pair) => pair,
        None => {
            app.set_status(USAGE);
            return Ok(());
        }
    };

    let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => {
            app.set_status(format!("Invalid date: {date_str}. Use YYYY-MM-DD"));
            return Ok(());
        }
    };

    // Last token is the amount, optionally followed by a category name
    let parts: Vec<&str> = rest.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status(USAGE);
        return Ok(());
    }

    let (title, amount, category_id) = if let Ok(amount) = Decimal::from_str(parts[0]) {
        (parts[1].to_string(), amount, None)
    } else {
        let cat_name = parts[0];
        let inner: Vec<&str> = parts[1].rsplitn(2, ' ').collect();
        if inner.len() < 2 {
            app.set_status(USAGE);
            return Ok(());
        }
        let amount = match Decimal::from_str(inner[0]) {
            Ok(a) => a,
            Err(_) => {
                app.set_status(format!("Invalid amount: {}", inner[0]));
                return Ok(());
            }
        };
        match Category::find_by_name(&app.categories, cat_name) {
            Some(cat) => (inner[1].to_string(), amount, cat.id),
            None => {
                app.set_status(format!("Category '{cat_name}' not found"));
                return Ok(());
            }
        }
    };

    let expense = Expense::new(title.clone(), amount, date, category_id);
    db.insert_expense(&expense)?;
    app.refresh(db)?;
    app.set_status(format!("Added: {title} ${amount}"));
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :category <name> [#RRGGBB]");
        return Ok(());
    }

    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    let (name, color) = if parts.len() == 2 && parts[0].starts_with('#') {
        (parts[1].to_string(), parts[0].to_string())
    } else {
        (args.to_string(), DEFAULT_CATEGORY_COLOR.to_string())
    };

    let cat = Category::new(name.clone(), color.clone());
    if cat.rgb().is_none() {
        app.set_status(format!("Invalid color: {color}. Use #RRGGBB"));
        return Ok(());
    }

    match db.insert_category(&cat) {
        Ok(_) => {
            app.refresh(db)?;
            app.set_status(format!("Created category: {name}"));
        }
        Err(_) => app.set_status(format!("Category '{name}' already exists")),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/spendtui-export-{}.csv", app.current_month)
    } else {
        crate::run::shellexpand(args)
    };

    let count = db.export_to_csv(&path, Some(app.current_month))?;
    if count == 0 {
        app.set_status("No expenses to export");
    } else {
        app.set_status(format!("Exported {count} expenses to {path}"));
    }
    Ok(())
}
