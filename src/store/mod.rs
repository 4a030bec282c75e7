//! Comma-separated ledger of valuation results, one row per company.
//!
//! Every upsert reads the whole file, applies the change in memory and writes
//! the full record set to a temporary file in the same directory, which then
//! replaces the original with a rename. There is no cross-process locking:
//! two processes upserting into the same file concurrently can lose an update.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::models::{ResultRecord, UpsertOutcome};

/// Fixed header written as the first line of every store file.
pub const HEADER: [&str; 2] = ["Company Name", "Intrinsic Value per Share (₹)"];

/// Result store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Store is not valid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to replace store file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Malformed store row at line {line}: expected at least 2 columns")]
    MalformedRow { line: u64 },

    #[error("Refusing to store non-finite value {0}")]
    NonFiniteValue(f64),
}

/// Render a value the way it is written to the store: exactly two decimals,
/// rounded from the exact binary value.
pub fn format_value(value: f64) -> String {
    let text = format!("{:.2}", value);
    // Avoid persisting "-0.00".
    if text == "-0.00" {
        "0.00".to_string()
    } else {
        text
    }
}

/// Round to two decimal places, the precision values are persisted at.
pub fn round_to_cents(value: f64) -> f64 {
    format_value(value).parse().unwrap_or(value)
}

/// A result store bound to one file location.
#[derive(Debug, Clone)]
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in file order. A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<ResultRecord>, StoreError> {
        let rows = self.read_rows()?;
        Ok(rows
            .iter()
            .map(|row| ResultRecord::new(&row[0], &row[1]))
            .collect())
    }

    /// Look up the stored record for one company.
    pub fn get(&self, company_name: &str) -> Result<Option<ResultRecord>, StoreError> {
        Ok(self
            .load()?
            .into_iter()
            .find(|record| record.company_name == company_name))
    }

    /// Insert or replace the value stored for `company_name`.
    ///
    /// Matching is exact and case-sensitive. An existing row keeps its
    /// position; a new company is appended at the end. Other rows are written
    /// back exactly as they were read.
    pub fn upsert(&self, company_name: &str, value: f64) -> Result<UpsertOutcome, StoreError> {
        if !value.is_finite() {
            return Err(StoreError::NonFiniteValue(value));
        }

        let rows = self.read_rows()?;
        let new_row = StringRecord::from(vec![company_name.to_string(), format_value(value)]);

        let mut outcome = UpsertOutcome::Inserted;
        let mut kept = Vec::with_capacity(rows.len() + 1);
        for row in rows {
            if &row[0] != company_name {
                kept.push(row);
                continue;
            }
            if outcome == UpsertOutcome::Updated {
                tracing::warn!(
                    company = company_name,
                    path = %self.path.display(),
                    "Dropping duplicate store row"
                );
                continue;
            }
            kept.push(new_row.clone());
            outcome = UpsertOutcome::Updated;
        }
        if outcome == UpsertOutcome::Inserted {
            kept.push(new_row);
        }

        self.write_rows(&kept)?;

        tracing::info!(
            company = company_name,
            value = %format_value(value),
            outcome = outcome.as_str(),
            path = %self.path.display(),
            "Saved valuation"
        );

        Ok(outcome)
    }

    /// Data rows (header excluded), each guaranteed to have at least 2 fields.
    fn read_rows(&self) -> Result<Vec<StringRecord>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let row = result?;
            if row.len() < 2 {
                let line = row.position().map(|p| p.line()).unwrap_or_default();
                return Err(StoreError::MalformedRow { line });
            }
            rows.push(row);
        }
        Ok(rows)
    }

    fn write_rows(&self, rows: &[StringRecord]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file().set_permissions(meta.permissions())?;
        }

        {
            let mut writer = WriterBuilder::new()
                .flexible(true)
                .terminator(Terminator::CRLF)
                .from_writer(tmp.as_file_mut());
            writer.write_record(HEADER)?;
            for row in rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;

        Ok(())
    }
}
