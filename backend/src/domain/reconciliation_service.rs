use rust_decimal::Decimal;
use shared::RawBreakdown;
use tracing::{debug, warn};

use crate::domain::grouping::{group_by_date, DateGroup, DenominationTotals};
use crate::domain::models::{raw_total, Breakdown, CashBox, Denomination, DENOMINATIONS};
use crate::domain::reconciliation::{reconcile, Reconciliation};

/// Live totals for the boxes entered so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationSummary {
    pub reconciliation: Reconciliation,
    pub by_date: Vec<DateGroup>,
    pub denominations: DenominationTotals,
}

/// Result of the raw breakdown calculator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownTotal {
    pub total: Decimal,
    /// Keys that name no denomination of the table
    pub rejected_keys: Vec<String>,
}

/// Stateless calculations behind the wizard screens; nothing is stored
#[derive(Debug, Clone, Default)]
pub struct ReconciliationService;

impl ReconciliationService {
    pub fn new() -> Self {
        Self
    }

    pub fn denominations(&self) -> &'static [Denomination] {
        &DENOMINATIONS
    }

    pub fn summarize(&self, cash_boxes: &[CashBox]) -> ReconciliationSummary {
        let reconciliation = reconcile(cash_boxes);
        debug!(
            "Reconciled {} boxes ({} excluded): vales={}, counted={}, difference={}",
            reconciliation.valid_count(),
            reconciliation.excluded,
            reconciliation.totals.total_vales,
            reconciliation.totals.total_breakdown,
            reconciliation.totals.difference
        );

        let by_date = group_by_date(&reconciliation.lines);
        let denominations = DenominationTotals::from_breakdowns(
            reconciliation.cash_boxes().map(|cash_box| &cash_box.breakdown),
        );

        ReconciliationSummary {
            reconciliation,
            by_date,
            denominations,
        }
    }

    pub fn breakdown_total(&self, raw: &RawBreakdown) -> BreakdownTotal {
        let rejected_keys = Breakdown::from_raw(raw).rejected_keys;
        if !rejected_keys.is_empty() {
            warn!("Breakdown contains unknown denominations: {:?}", rejected_keys);
        }
        BreakdownTotal {
            total: raw_total(raw),
            rejected_keys,
        }
    }
}
