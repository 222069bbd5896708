use thiserror::Error;

pub mod categories;
pub mod expense;
pub mod report;


pub use categories::{CategoryRegistry, DEFAULT_CATEGORIES, TOTAL_LABEL};
pub use expense::{parse_amount, Expense, MAX_AMOUNT};
pub use report::{Period, Report, Summary, Window};

#[derive(Debug, PartialEq, Error)]
pub enum BudgetError {
    #[error("invalid amount {0:?}, please enter a valid amount")]
    InvalidAmount(String),
    #[error("invalid or duplicate category name {0:?}")]
    InvalidCategory(String),
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
    #[error("unknown report period {0:?}, expected weekly or monthly")]
    UnknownPeriod(String),
}
