mod category;
mod expense;

pub use category::{Category, UNCATEGORIZED_COLOR, UNCATEGORIZED_NAME};
pub use expense::Expense;

#[cfg(test)]
mod tests;
