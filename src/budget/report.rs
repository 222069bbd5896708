use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, NaiveDateTime, NaiveTime, TimeDelta};
use log::debug;
use rust_decimal::Decimal;

use super::{BudgetError, Expense, TOTAL_LABEL};

const WEEK_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Weekly,
    Monthly,
}

impl FromStr for Period {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Ok(Period::Weekly),
            "monthly" | "month" => Ok(Period::Monthly),
            _ => Err(BudgetError::UnknownPeriod(s.to_string())),
        }
    }
}

/// A closed interval of time, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Window {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Window {
        Window { start, end }
    }

    /// The seven days leading up to `now`.
    pub fn weekly(now: NaiveDateTime) -> Window {
        Window::new(now - TimeDelta::days(WEEK_DAYS), now)
    }

    /// Midnight on the first of the current month up to `now`.
    pub fn monthly(now: NaiveDateTime) -> Window {
        let first = now.date() - TimeDelta::days(i64::from(now.day0()));
        Window::new(first.and_time(NaiveTime::MIN), now)
    }

    pub fn for_period(period: Period, now: NaiveDateTime) -> Window {
        match period {
            Period::Weekly => Window::weekly(now),
            Period::Monthly => Window::monthly(now),
        }
    }

    pub fn contains(&self, date: NaiveDateTime) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Per-category sums for one window plus their grand total.
///
/// The total lives apart from the category sums, so a stored category that
/// happens to be named "Total" is summed like any other and cannot clobber it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    categories: BTreeMap<String, Decimal>,
    total: Decimal,
}

impl Summary {
    pub fn summarize<'a, I>(records: I, window: &Window) -> Summary
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut summary = Summary::default();

        for expense in records.into_iter().filter(|expense| window.contains(expense.date())) {
            let sum = summary
                .categories
                .entry(expense.category().clone())
                .or_insert(Decimal::ZERO);
            *sum = sum.saturating_add(expense.amount());
        }

        summary.total = summary
            .categories
            .values()
            .fold(Decimal::ZERO, |total, amount| total.saturating_add(*amount));

        debug!(
            "summarized window, start={}, end={}, categories={}, total={}",
            window.start, window.end, summary.categories.len(), summary.total
        );

        summary
    }

    pub fn category(&self, name: &str) -> Option<Decimal> {
        self.categories.get(name).copied()
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Number of categories with spending in the window, the total excluded.
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Categories in lexical order, followed by the total under [`TOTAL_LABEL`].
    pub fn entries(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.categories
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
            .chain(std::iter::once((TOTAL_LABEL, self.total)))
    }
}

/// A summary together with the period and window it was computed for.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    period: Period,
    window: Window,
    summary: Summary,
}

impl Report {
    pub fn new<'a, I>(period: Period, now: NaiveDateTime, records: I) -> Report
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let window = Window::for_period(period, now);
        let summary = Summary::summarize(records, &window);

        Report { period, window, summary }
    }

    pub fn title(&self) -> String {
        match self.period {
            Period::Weekly => format!(
                "Weekly Expenses ({} - {})",
                self.window.start.format("%m/%d/%Y"),
                self.window.end.format("%m/%d/%Y")
            ),
            Period::Monthly => format!("Monthly Expenses ({})", self.window.start.format("%m/%Y")),
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}
