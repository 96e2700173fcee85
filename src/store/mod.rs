mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;
use crate::month::MonthKey;

/// Starter categories written into an empty store, matching the defaults
/// the app has always shipped with.
const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Groceries", "#22c55e"),
    ("Transport", "#3b82f6"),
    ("Entertainment", "#a855f7"),
    ("Housing", "#f97316"),
];

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_default_categories()?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        db.seed_default_categories()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    fn seed_default_categories(&mut self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let tx = self.conn.transaction()?;
        for (name, color) in DEFAULT_CATEGORIES {
            tx.execute(
                "INSERT OR IGNORE INTO categories (name, color) VALUES (?1, ?2)",
                params![name, color],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color FROM categories ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            Ok(Category {
                id: Some(row.get(0)?),
                name: row.get(1)?,
                color: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn insert_category(&self, cat: &Category) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO categories (name, color) VALUES (?1, ?2)",
            params![cat.name, cat.color],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn insert_expense(&self, exp: &Expense) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO expenses (title, amount, date, category_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                exp.title,
                exp.amount.to_string(),
                exp.date.format("%Y-%m-%d").to_string(),
                exp.category_id,
                exp.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// The full expense snapshot, newest first. Month filtering is the
    /// aggregation engine's job so there is exactly one bucketing rule.
    pub(crate) fn get_expenses(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, amount, date, category_id, created_at
             FROM expenses ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let amount_str: String = row.get(2)?;
            let date_str: String = row.get(3)?;
            Ok(Expense {
                id: Some(row.get(0)?),
                title: row.get(1)?,
                amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
                category_id: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_expense_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?)
    }

    // ── Export ────────────────────────────────────────────────

    /// Write expenses (optionally one month's worth) to a CSV file.
    /// Returns the number of rows written.
    pub(crate) fn export_to_csv(&self, path: &str, month: Option<MonthKey>) -> Result<usize> {
        let expenses = match month {
            Some(m) => crate::summary::expenses_in_month(&self.get_expenses()?, m),
            None => self.get_expenses()?,
        };
        let categories = self.get_categories()?;

        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create export file: {path}"))?;
        writer.write_record(["date", "title", "category", "amount"])?;
        for exp in &expenses {
            let cat_name = exp
                .category_id
                .and_then(|id| Category::find_by_id(&categories, id))
                .map(|c| c.name.as_str())
                .unwrap_or(UNCATEGORIZED_NAME);
            writer.write_record([
                exp.date.format("%Y-%m-%d").to_string(),
                exp.title.clone(),
                cat_name.to_string(),
                exp.amount.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(expenses.len())
    }
}
