//! CSV Data Loader Module
//! Reads the sales CSV once with Polars, drops incomplete rows and memoizes the result.

use super::table::{SalesTable, ALL_COLUMNS, INTEGER_COLUMNS, SALES_COLUMNS, TEXT_COLUMNS};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};
use thiserror::Error;
use tracing::{debug, info};

/// Cell contents read as missing (the usual spreadsheet and CSV export markers).
const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Dataset not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] PolarsError),
}

/// Handle to the sales dataset.
///
/// The source is parsed on the first successful `load` and the cleaned table
/// is returned by reference on every call after that.
pub struct SalesLoader {
    path: PathBuf,
    table: OnceLock<SalesTable>,
    init_guard: Mutex<()>,
    source_reads: AtomicUsize,
}

impl SalesLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceLock::new(),
            init_guard: Mutex::new(()),
            source_reads: AtomicUsize::new(0),
        }
    }

    /// Get file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cleaned table, reading the source only on the first success.
    pub fn load(&self) -> Result<&SalesTable, LoaderError> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }

        // Serialize first loads so concurrent callers parse the file once.
        let _guard = self.init_guard.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = self.table.get() {
            return Ok(table);
        }

        let table = self.read_source()?;
        Ok(self.table.get_or_init(|| table))
    }

    /// Number of times the source file was actually parsed.
    pub fn source_reads(&self) -> usize {
        self.source_reads.load(Ordering::SeqCst)
    }

    fn read_source(&self) -> Result<SalesTable, LoaderError> {
        if !self.path.exists() {
            return Err(LoaderError::SourceNotFound(self.path.clone()));
        }
        self.source_reads.fetch_add(1, Ordering::SeqCst);

        let null_values: Vec<PlSmallStr> = MISSING_MARKERS.iter().map(|m| (*m).into()).collect();
        let raw = LazyCsvReader::new(&self.path)
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_null_values(Some(NullValues::AllColumns(null_values)))
            .finish()?
            .collect()?;

        validate_schema(&raw)?;

        let raw_rows = raw.height();
        let cleaned = clean(raw)?;
        info!(
            path = %self.path.display(),
            rows = cleaned.height(),
            dropped = raw_rows - cleaned.height(),
            "loaded sales dataset"
        );

        Ok(SalesTable::new(cleaned))
    }
}

/// Check every expected column exists and the numeric ones hold numbers.
fn validate_schema(df: &DataFrame) -> Result<(), LoaderError> {
    for name in ALL_COLUMNS {
        if df.column(name).is_err() {
            return Err(LoaderError::SchemaMismatch(format!("missing column '{}'", name)));
        }
    }

    for name in INTEGER_COLUMNS.iter().chain(SALES_COLUMNS.iter()) {
        let column = df.column(name)?;
        // An all-missing column is fine: every row holding it gets dropped.
        let all_missing = column.null_count() == column.len();
        if !is_numeric(column.dtype()) && !all_missing {
            return Err(LoaderError::SchemaMismatch(format!(
                "column '{}' is not numeric (found {})",
                name,
                column.dtype()
            )));
        }
    }

    Ok(())
}

/// Drop incomplete rows and normalize column types.
fn clean(df: DataFrame) -> Result<DataFrame, LoaderError> {
    let casts: Vec<Expr> = TEXT_COLUMNS
        .iter()
        .map(|name| col(*name).cast(DataType::String))
        .chain(
            INTEGER_COLUMNS
                .iter()
                .map(|name| col(*name).cast(DataType::Int64)),
        )
        .chain(
            SALES_COLUMNS
                .iter()
                .map(|name| col(*name).cast(DataType::Float64)),
        )
        .collect();

    let cleaned = df
        .lazy()
        .drop_nulls(None)
        .with_columns(casts)
        .collect()?;

    debug!(columns = ?cleaned.get_column_names(), "normalized sales schema");
    Ok(cleaned)
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}
