use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use super::breakdown::Breakdown;
use crate::domain::reconciliation::is_balanced;

/// Shift a cash box was counted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Shift {
    #[default]
    Morning,
    Afternoon,
}

impl Shift {
    pub const ALL: [Shift; 2] = [Shift::Morning, Shift::Afternoon];

    /// 1 = morning, 2 = afternoon
    pub fn number(&self) -> u8 {
        match self {
            Shift::Morning => 1,
            Shift::Afternoon => 2,
        }
    }
}

impl TryFrom<u8> for Shift {
    type Error = CashBoxValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Shift::Morning),
            2 => Ok(Shift::Afternoon),
            other => Err(CashBoxValidationError::InvalidShift(other)),
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shift::Morning => f.write_str("morning"),
            Shift::Afternoon => f.write_str("afternoon"),
        }
    }
}

/// One till's physical cash for one shift, reconciled against its vale.
///
/// A box stays incomplete (and out of every total) until both the date and
/// the worker name are filled in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CashBox {
    pub date: Option<NaiveDate>,
    pub worker_name: String,
    pub shift: Shift,
    pub vale_amount: Decimal,
    pub breakdown: Breakdown,
}

impl CashBox {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.date.is_some() && !self.worker_name.trim().is_empty()
    }

    /// Counted cash
    pub fn breakdown_total(&self) -> Decimal {
        self.breakdown.total()
    }

    /// Counted cash minus vale; negative when the box is short
    pub fn difference(&self) -> Decimal {
        self.breakdown_total() - self.vale_amount
    }

    pub fn is_balanced(&self) -> bool {
        is_balanced(self.difference())
    }
}

/// Largest vale a single box may carry
pub fn max_vale_amount() -> Decimal {
    Decimal::new(1_000_000_000, 0)
}

/// Parse a vale amount as typed in the form. Blank means zero and a comma is
/// accepted as the decimal separator.
pub fn parse_vale_amount(input: &str) -> Result<Decimal, CashBoxValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let amount = Decimal::from_str(&trimmed.replace(',', "."))
        .map_err(|_| CashBoxValidationError::InvalidAmount(trimmed.to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CashBoxValidationError::NegativeValeAmount);
    }
    if amount > max_vale_amount() {
        return Err(CashBoxValidationError::AmountTooLarge {
            amount: trimmed.to_string(),
            max: max_vale_amount(),
        });
    }
    Ok(amount)
}

/// Parse a box date. Blank means the auditor has not entered it yet.
pub fn parse_entry_date(input: &str) -> Result<Option<NaiveDate>, CashBoxValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| CashBoxValidationError::InvalidDate(trimmed.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CashBoxValidationError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid shift {0}, expected 1 (morning) or 2 (afternoon)")]
    InvalidShift(u8),
    #[error("Invalid vale amount '{0}'")]
    InvalidAmount(String),
    #[error("Vale amount cannot be negative")]
    NegativeValeAmount,
    #[error("Vale amount '{amount}' is above the maximum of {max}")]
    AmountTooLarge { amount: String, max: Decimal },
}
