use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::budget::Report;

pub const DEFAULT_CHART_WIDTH: usize = 40;

const BAR_CELL: char = '#';

/// Horizontal bar chart of a report: one bar per category, the total last,
/// each labelled with its dollar value.
pub struct BarChart<'r> {
    report: &'r Report,
    width: usize,
}

impl<'r> BarChart<'r> {
    pub fn new(report: &'r Report) -> Self {
        Self {
            report,
            width: DEFAULT_CHART_WIDTH,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    fn bar_len(&self, value: Decimal, max: Decimal) -> usize {
        if value.is_zero() || max.is_zero() {
            return 0;
        }

        // value <= max keeps the ratio within [0, 1]
        let cells = (value / max * Decimal::from(self.width)).round();
        cells.to_usize().unwrap_or(0).clamp(1, self.width)
    }
}

impl fmt::Display for BarChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let title = self.report.title();
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "=".repeat(title.chars().count()))?;

        let summary = self.report.summary();
        let label_width = summary.entries().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
        let max = summary.entries().map(|(_, value)| value).max().unwrap_or(Decimal::ZERO);

        for (name, value) in summary.entries() {
            let bar: String = std::iter::repeat(BAR_CELL).take(self.bar_len(value, max)).collect();
            writeln!(
                f,
                "{:<label_width$} | {:<bar_width$} ${:.2}",
                name,
                bar,
                value,
                label_width = label_width,
                bar_width = self.width
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::budget::{Expense, Period, MAX_AMOUNT};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 20)
            .and_then(|d| d.and_hms_opt(18, 30, 0))
            .unwrap()
    }

    #[test]
    fn test_render() {
        let ledger = vec![
            Expense::new(now(), "Groceries", dec!(12.50)).unwrap(),
            Expense::new(now(), "Rent", dec!(800)).unwrap(),
        ];
        let report = Report::new(Period::Weekly, now(), &ledger);

        let chart = BarChart::new(&report).with_width(10).to_string();

        assert_eq!(
            chart,
            "Weekly Expenses (05/13/2024 - 05/20/2024)\n\
             =========================================\n\
             Groceries | #          $12.50\n\
             Rent      | ########## $800.00\n\
             Total     | ########## $812.50\n"
        );
    }

    #[test]
    fn test_render_empty_report() {
        let ledger: Vec<Expense> = Vec::new();
        let report = Report::new(Period::Monthly, now(), &ledger);

        let chart = BarChart::new(&report).with_width(5).to_string();

        assert_eq!(chart, "Monthly Expenses (05/2024)\n==========================\nTotal |       $0.00\n");
    }

    #[test]
    fn test_bars_are_proportional() {
        let ledger = vec![
            Expense::new(now(), "Internet", dec!(25)).unwrap(),
            Expense::new(now(), "Rent", dec!(75)).unwrap(),
        ];
        let report = Report::new(Period::Weekly, now(), &ledger);

        let chart = BarChart::new(&report).with_width(20).to_string();
        let bars: Vec<usize> = chart
            .lines()
            .skip(2)
            .map(|line| line.chars().filter(|c| *c == BAR_CELL).count())
            .collect();

        assert_eq!(bars, vec![5, 15, 20]);
    }

    #[test]
    fn test_render_maximum_amounts() {
        let mut ledger: Vec<Expense> = (0..1000)
            .map(|_| Expense::new(now(), "Rent", MAX_AMOUNT).unwrap())
            .collect();
        ledger.push(Expense::new(now(), "Internet", dec!(0.01)).unwrap());
        let report = Report::new(Period::Weekly, now(), &ledger);

        let chart = BarChart::new(&report).with_width(20).to_string();
        let bars: Vec<usize> = chart
            .lines()
            .skip(2)
            .map(|line| line.chars().filter(|c| *c == BAR_CELL).count())
            .collect();

        assert_eq!(bars, vec![1, 20, 20]);
        assert!(chart.ends_with("$1000000000000000000.01\n"));
    }
}
