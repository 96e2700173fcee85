use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::*;
use crate::month::MonthKey;
use crate::store::Database;
use crate::summary::{self, CategoryTotal, MonthTotal};

/// Months shown in the spending trend chart.
pub(crate) const TREND_MONTHS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Expenses,
    Stats,
    Categories,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Expenses, Self::Stats, Self::Categories]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expenses => write!(f, "Expenses"),
            Self::Stats => write!(f, "Stats"),
            Self::Categories => write!(f, "Categories"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) current_month: MonthKey,

    // Snapshot from the store
    pub(crate) categories: Vec<Category>,
    pub(crate) expenses: Vec<Expense>,
    pub(crate) expense_count: i64,

    // Aggregation output for the selected month
    pub(crate) month_expenses: Vec<Expense>,
    pub(crate) month_total: Decimal,
    pub(crate) category_totals: Vec<CategoryTotal>,
    pub(crate) monthly_trend: Vec<MonthTotal>,

    // Cursors
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Expenses,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            current_month: MonthKey::current(),

            categories: Vec::new(),
            expenses: Vec::new(),
            expense_count: 0,

            month_expenses: Vec::new(),
            month_total: Decimal::ZERO,
            category_totals: Vec::new(),
            monthly_trend: Vec::new(),

            expense_index: 0,
            expense_scroll: 0,
            category_index: 0,
            category_scroll: 0,

            visible_rows: 20,
        }
    }

    /// Reload the snapshot from the store and re-aggregate.
    pub(crate) fn refresh(&mut self, db: &Database) -> Result<()> {
        self.categories = db.get_categories()?;
        self.expenses = db.get_expenses()?;
        self.expense_count = db.get_expense_count()?;
        self.recompute();
        Ok(())
    }

    /// Re-run the aggregation engine over the snapshot already in memory.
    pub(crate) fn recompute(&mut self) {
        let mut month_expenses = summary::expenses_in_month(&self.expenses, self.current_month);
        // Display convention: newest first. The engine leaves order unspecified.
        month_expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        self.month_expenses = month_expenses;

        self.month_total = summary::month_total(&self.expenses, self.current_month);
        self.category_totals =
            summary::category_totals(&self.expenses, &self.categories, self.current_month);
        self.monthly_trend =
            summary::trailing_month_series(&self.expenses, TREND_MONTHS, self.current_month);

        if self.expense_index >= self.month_expenses.len() {
            self.expense_index = self.month_expenses.len().saturating_sub(1);
        }
        if self.category_index >= self.categories.len() {
            self.category_index = self.categories.len().saturating_sub(1);
        }
    }

    /// Select a month and re-aggregate the existing snapshot.
    pub(crate) fn set_month(&mut self, month: MonthKey) {
        self.current_month = month;
        self.expense_index = 0;
        self.expense_scroll = 0;
        self.recompute();
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
