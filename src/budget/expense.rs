use std::str::FromStr;

use chrono::NaiveDateTime;
use getset::{CopyGetters, Getters};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::BudgetError;

/// Largest amount a single expense may carry. Keeps report sums far from
/// the `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// A single ledger entry. Entries are never modified once created.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Expense {
    #[getset(get_copy = "pub")]
    date: NaiveDateTime,
    #[getset(get = "pub")]
    category: String,
    #[getset(get_copy = "pub")]
    amount: Decimal,
}

impl Expense {
    pub fn new(date: NaiveDateTime, category: &str, amount: Decimal) -> Result<Expense, BudgetError> {
        if category.trim().is_empty() {
            return Err(BudgetError::InvalidCategory(category.to_string()));
        }

        if !is_valid_amount(amount) {
            return Err(BudgetError::InvalidAmount(amount.to_string()));
        }

        Ok(Expense {
            date,
            category: category.to_string(),
            amount,
        })
    }
}

fn is_valid_amount(amount: Decimal) -> bool {
    (!amount.is_sign_negative() || amount.is_zero()) && amount <= MAX_AMOUNT
}

/// Parses user supplied amount text with `Decimal`'s parser, so forms such as
/// `".5"`, `"+5"` or `"1_000"` are accepted. Negative amounts and amounts above
/// [`MAX_AMOUNT`] are rejected.
pub fn parse_amount(text: &str) -> Result<Decimal, BudgetError> {
    let amount = Decimal::from_str(text.trim()).map_err(|_| BudgetError::InvalidAmount(text.to_string()))?;

    if !is_valid_amount(amount) {
        return Err(BudgetError::InvalidAmount(text.to_string()));
    }

    Ok(amount)
}
