use std::path::Path;

use chrono::{Local, NaiveDateTime};
use log::debug;

use crate::budget::{BudgetError, CategoryRegistry, Expense, Period, Report};
use crate::store::{LedgerStore, StoreError};

/// Application state: the persisted ledger and the session's category set.
#[derive(Debug)]
pub struct Tracker {
    store: LedgerStore,
    categories: CategoryRegistry,
}

impl Tracker {
    pub fn open(path: impl AsRef<Path>) -> Result<Tracker, StoreError> {
        Ok(Tracker::new(LedgerStore::open(path)?))
    }

    pub fn new(store: LedgerStore) -> Tracker {
        Tracker {
            store,
            categories: CategoryRegistry::new(),
        }
    }

    /// Files an expense under a known category.
    pub fn add_expense(&mut self, category: &str, amount: &str) -> Result<&Expense, StoreError> {
        if !self.categories.contains(category) {
            return Err(BudgetError::UnknownCategory(category.to_string()).into());
        }

        self.store.append(category, amount)
    }

    pub fn add_category(&mut self, name: &str) -> Result<&str, BudgetError> {
        let name = self.categories.add(name)?;
        debug!("registered category, name={}", name);

        Ok(name)
    }

    pub fn report(&self, period: Period) -> Report {
        self.report_at(period, Local::now().naive_local())
    }

    pub fn report_at(&self, period: Period, now: NaiveDateTime) -> Report {
        Report::new(period, now, self.store.records())
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }
}
