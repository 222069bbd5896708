use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};
use log::debug;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::budget::{parse_amount, BudgetError, Expense};

pub const DEFAULT_DATA_FILE: &str = "budget_data.csv";

const HEADER: [&str; 3] = ["Date", "Category", "Amount"];
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_ONLY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("corrupt data at row {row}: {reason}")]
    CorruptData { row: u64, reason: String },
    #[error("{0}")]
    Budget(#[from] BudgetError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to replace ledger file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, Deserialize)]
struct ExpenseRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Amount")]
    amount: String,
}

#[derive(Debug, Serialize)]
struct ExpenseRecord<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
}

impl<'a> From<&'a Expense> for ExpenseRecord<'a> {
    fn from(expense: &'a Expense) -> Self {
        ExpenseRecord {
            date: expense.date().format(DATE_FORMAT).to_string(),
            category: expense.category(),
            amount: expense.amount().to_string(),
        }
    }
}

impl TryFrom<ExpenseRow> for Expense {
    type Error = String;

    fn try_from(row: ExpenseRow) -> Result<Self, Self::Error> {
        let date = parse_date(&row.date).ok_or_else(|| format!("invalid date {:?}", row.date))?;
        let amount = parse_amount(&row.amount).map_err(|err| err.to_string())?;

        Expense::new(date, &row.category, amount).map_err(|err| err.to_string())
    }
}

fn parse_date(text: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_ONLY_FORMAT)
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// Append-only expense ledger backed by a CSV file.
///
/// The whole table is kept in memory and rewritten on every append.
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    records: Vec<Expense>,
}

impl LedgerStore {
    /// Initializes the backing file if needed, then loads it.
    pub fn open(path: impl AsRef<Path>) -> Result<LedgerStore, StoreError> {
        let path = path.as_ref();
        LedgerStore::initialize(path)?;
        let records = LedgerStore::load(path)?;

        Ok(LedgerStore {
            path: path.to_path_buf(),
            records,
        })
    }

    /// Creates an empty ledger file with just the header. Returns whether a
    /// file was created; an existing file is never touched.
    pub fn initialize(path: &Path) -> Result<bool, StoreError> {
        if path.exists() {
            return Ok(false);
        }

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        write_records(path, &[])?;
        debug!("created ledger file, path={}", path.display());

        Ok(true)
    }

    pub fn load(path: &Path) -> Result<Vec<Expense>, StoreError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

        let headers = csv_reader.headers()?.clone();
        if headers.iter().ne(HEADER) {
            return Err(StoreError::CorruptData {
                row: 1,
                reason: format!("expected header {:?}, found {:?}", HEADER.join(","), headers.iter().collect::<Vec<_>>().join(",")),
            });
        }

        let mut records = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|err| StoreError::CorruptData {
                row: err.position().map_or(0, |pos| pos.line()),
                reason: err.to_string(),
            })?;
            let row = record.position().map_or(0, |pos| pos.line());

            let expense = record
                .deserialize::<ExpenseRow>(Some(&headers))
                .map_err(|err| err.to_string())
                .and_then(Expense::try_from)
                .map_err(|reason| StoreError::CorruptData { row, reason })?;

            records.push(expense);
        }

        debug!("loaded ledger, path={}, records={}", path.display(), records.len());

        Ok(records)
    }

    /// Records a new expense dated now and persists the whole ledger.
    ///
    /// Nothing is recorded when the amount does not parse. If writing the file
    /// fails the new record is dropped from memory as well.
    pub fn append(&mut self, category: &str, amount: &str) -> Result<&Expense, StoreError> {
        let amount = parse_amount(amount)?;
        let date = Local::now().naive_local().trunc_subsecs(6);
        let expense = Expense::new(date, category, amount)?;

        self.records.push(expense);
        if let Err(err) = write_records(&self.path, &self.records) {
            self.records.pop();
            return Err(err);
        }

        debug!(
            "appended expense, category={}, amount={}, records={}",
            category,
            amount,
            self.records.len()
        );

        Ok(&self.records[self.records.len() - 1])
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[Expense] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Writes to a sibling temporary file and renames it over `path`, so the
/// ledger is either fully replaced or left as it was.
fn write_records(path: &Path, records: &[Expense]) -> Result<(), StoreError> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;

    {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file.as_file_mut());
        csv_writer.write_record(HEADER)?;
        for expense in records {
            let record: ExpenseRecord = expense.into();
            csv_writer.serialize(record)?;
        }

        csv_writer.flush()?;
    }

    file.as_file().sync_all()?;
    file.persist(path)?;

    Ok(())
}
