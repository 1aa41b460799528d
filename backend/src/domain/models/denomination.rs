//! Fixed euro denomination table.
//!
//! Denominations are keyed by canonical decimal strings so that stored
//! breakdowns never depend on floating point formatting. Lookups go by
//! numeric value, so `"0.5"`, `"0.50"` and `"0.500"` all resolve to the
//! 50 cent coin.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Number of recognized denominations
pub const DENOMINATION_COUNT: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenominationKind {
    Bill,
    Coin,
}

/// A recognized currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Denomination {
    key: &'static str,
    cents: i64,
    kind: DenominationKind,
}

impl Denomination {
    const fn bill(key: &'static str, cents: i64) -> Self {
        Self { key, cents, kind: DenominationKind::Bill }
    }

    const fn coin(key: &'static str, cents: i64) -> Self {
        Self { key, cents, kind: DenominationKind::Coin }
    }

    /// Canonical key used in persisted breakdowns
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn kind(&self) -> DenominationKind {
        self.kind
    }

    /// Exact value in euros
    pub fn value(&self) -> Decimal {
        Decimal::new(self.cents, 2)
    }

    /// Position in [`DENOMINATIONS`]
    pub fn index(&self) -> usize {
        DENOMINATIONS
            .iter()
            .position(|d| d == self)
            .unwrap_or_default()
    }
}

/// All recognized denominations, largest first
pub static DENOMINATIONS: [Denomination; DENOMINATION_COUNT] = [
    Denomination::bill("500", 50_000),
    Denomination::bill("200", 20_000),
    Denomination::bill("100", 10_000),
    Denomination::bill("50", 5_000),
    Denomination::bill("20", 2_000),
    Denomination::bill("10", 1_000),
    Denomination::bill("5", 500),
    Denomination::coin("2", 200),
    Denomination::coin("1", 100),
    Denomination::coin("0.50", 50),
    Denomination::coin("0.20", 20),
    Denomination::coin("0.10", 10),
    Denomination::coin("0.05", 5),
    Denomination::coin("0.02", 2),
    Denomination::coin("0.01", 1),
];

/// Find the denomination with exactly this value
pub fn find_by_value(value: Decimal) -> Option<&'static Denomination> {
    DENOMINATIONS.iter().find(|d| d.value() == value)
}

/// Resolve a breakdown key by its numeric value
pub fn find_by_key(key: &str) -> Option<&'static Denomination> {
    let value = Decimal::from_str(key.trim()).ok()?;
    find_by_value(value)
}
