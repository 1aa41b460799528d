//! SQLite implementations of the storage traits.

pub mod name_repository;
pub mod report_repository;
pub mod session_repository;

pub use name_repository::NameRepository;
pub use report_repository::ReportRepository;
pub use session_repository::SessionRepository;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::str::FromStr;

/// Amounts are stored as TEXT so no precision is lost
fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str(&raw).with_context(|| format!("Invalid amount '{}' in column {}", raw, column))
}
