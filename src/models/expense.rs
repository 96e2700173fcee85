use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct Expense {
    pub id: Option<i64>,
    pub title: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    /// Weak reference: may point at no known category.
    pub category_id: Option<i64>,
    pub created_at: String,
}

impl Expense {
    pub fn new(title: String, amount: Decimal, date: NaiveDate, category_id: Option<i64>) -> Self {
        Self {
            id: None,
            title,
            amount,
            date,
            category_id,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
