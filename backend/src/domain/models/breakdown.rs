//! Denomination counts and the breakdown calculator.

use rust_decimal::Decimal;
use serde_json::Value;
use shared::RawBreakdown;
use std::collections::BTreeMap;
use std::str::FromStr;

use super::denomination::{find_by_key, Denomination, DENOMINATIONS, DENOMINATION_COUNT};

/// Count of physical bills and coins per recognized denomination.
///
/// Missing denominations are zero. Counts are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breakdown {
    counts: [u32; DENOMINATION_COUNT],
}

/// Result of converting a raw form map into a typed [`Breakdown`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawConversion {
    pub breakdown: Breakdown,
    /// Keys that name no recognized denomination
    pub rejected_keys: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum BreakdownParseError {
    #[error("Stored breakdown is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Stored breakdown contains unknown denomination '{0}'")]
    UnknownDenomination(String),
}

impl Breakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, count)` pairs; unknown keys are ignored
    pub fn from_counts(pairs: &[(&str, u32)]) -> Self {
        let mut breakdown = Self::new();
        for (key, count) in pairs {
            if let Some(denomination) = find_by_key(key) {
                breakdown.add(denomination, *count);
            }
        }
        breakdown
    }

    pub fn count(&self, denomination: &Denomination) -> u32 {
        self.counts[denomination.index()]
    }

    pub fn set(&mut self, denomination: &Denomination, count: u32) {
        self.counts[denomination.index()] = count;
    }

    pub fn add(&mut self, denomination: &Denomination, count: u32) {
        let slot = &mut self.counts[denomination.index()];
        *slot = slot.saturating_add(count);
    }

    /// Non-zero counts in table order (largest denomination first)
    pub fn iter(&self) -> impl Iterator<Item = (&'static Denomination, u32)> + '_ {
        DENOMINATIONS
            .iter()
            .zip(self.counts.iter())
            .filter(|(_, count)| **count > 0)
            .map(|(d, count)| (d, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|c| *c == 0)
    }

    /// Σ count × value
    pub fn total(&self) -> Decimal {
        self.iter()
            .map(|(d, count)| Decimal::from(count) * d.value())
            .sum()
    }

    /// Counts of both breakdowns added per denomination
    pub fn merge(&self, other: &Breakdown) -> Breakdown {
        let mut merged = *self;
        for (d, count) in other.iter() {
            merged.add(d, count);
        }
        merged
    }

    /// Canonical key → count map of the non-zero entries
    pub fn to_map(&self) -> BTreeMap<String, u32> {
        self.iter()
            .map(|(d, count)| (d.key().to_string(), count))
            .collect()
    }

    /// Persisted string form: a JSON object of canonical keys to counts
    pub fn to_persisted(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_map())
    }

    /// Parse the persisted string form. Stored data is trusted to contain only
    /// recognized denominations, so anything else is an error.
    pub fn from_persisted(stored: &str) -> Result<Self, BreakdownParseError> {
        let map: BTreeMap<String, u32> = serde_json::from_str(stored)?;
        let mut breakdown = Self::new();
        for (key, count) in map {
            let denomination =
                find_by_key(&key).ok_or(BreakdownParseError::UnknownDenomination(key))?;
            breakdown.add(denomination, count);
        }
        Ok(breakdown)
    }

    /// Convert a form map. Malformed counts become zero; unknown keys are
    /// dropped and reported back.
    pub fn from_raw(raw: &RawBreakdown) -> RawConversion {
        let mut conversion = RawConversion::default();
        for (key, value) in raw {
            match find_by_key(key) {
                Some(denomination) => {
                    conversion
                        .breakdown
                        .add(denomination, parse_count(value).unwrap_or(0));
                }
                None => conversion.rejected_keys.push(key.clone()),
            }
        }
        conversion
    }
}

/// Breakdown calculator over a raw string-keyed map.
///
/// Keys are parsed as their numeric literal, so values outside the table still
/// contribute. Keys that are not numbers, negative keys, malformed counts and
/// entries that would overflow contribute zero. Never fails.
pub fn raw_total(raw: &RawBreakdown) -> Decimal {
    raw.iter().fold(Decimal::ZERO, |total, (key, value)| {
        let unit = match Decimal::from_str(key.trim()) {
            Ok(unit) if unit.is_sign_positive() => unit,
            _ => return total,
        };
        let count = parse_count(value).unwrap_or(0);
        Decimal::from(count)
            .checked_mul(unit)
            .and_then(|amount| total.checked_add(amount))
            .unwrap_or(total)
    })
}

/// Interpret a form value as a non-negative whole count.
///
/// Blank strings and `null` are zero; negative, fractional and non-numeric
/// values are rejected.
fn parse_count(value: &Value) -> Option<u32> {
    match value {
        Value::Null => Some(0),
        Value::Number(n) => {
            if let Some(whole) = n.as_u64() {
                u32::try_from(whole).ok()
            } else {
                let float = n.as_f64()?;
                if float >= 0.0 && float.fract() == 0.0 && float <= u32::MAX as f64 {
                    Some(float as u32)
                } else {
                    None
                }
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0)
            } else {
                trimmed.parse::<u32>().ok()
            }
        }
        _ => None,
    }
}
