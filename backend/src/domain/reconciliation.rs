//! Cash box aggregation.
//!
//! Only complete boxes (date and worker filled in) take part in any total.
//! An incomplete box is a box the auditor has not entered yet, not an error.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::models::cash_box::CashBox;

/// A box or session is balanced when the absolute difference is strictly
/// below one cent.
pub fn balance_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

pub fn is_balanced(difference: Decimal) -> bool {
    difference.abs() < balance_tolerance()
}

/// Render an amount for display, rounded to two decimals ("150.00")
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Vales, counted cash and their difference over a set of boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub total_vales: Decimal,
    pub total_breakdown: Decimal,
    pub difference: Decimal,
}

impl Totals {
    pub fn new(total_vales: Decimal, total_breakdown: Decimal) -> Self {
        Self {
            total_vales,
            total_breakdown,
            difference: total_breakdown - total_vales,
        }
    }

    /// Totals over the given boxes; callers pass complete boxes only
    pub fn from_boxes<'a>(boxes: impl IntoIterator<Item = &'a CashBox>) -> Self {
        let (vales, counted) = boxes
            .into_iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(vales, counted), cash_box| {
                (vales + cash_box.vale_amount, counted + cash_box.breakdown_total())
            });
        Self::new(vales, counted)
    }

    pub fn is_balanced(&self) -> bool {
        is_balanced(self.difference)
    }
}

/// A complete box with its computed totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashBoxLine {
    /// Position of the box in the original list
    pub index: usize,
    pub cash_box: CashBox,
    pub breakdown_total: Decimal,
    pub difference: Decimal,
}

impl CashBoxLine {
    pub fn new(index: usize, cash_box: CashBox) -> Self {
        let breakdown_total = cash_box.breakdown_total();
        let difference = breakdown_total - cash_box.vale_amount;
        Self {
            index,
            cash_box,
            breakdown_total,
            difference,
        }
    }

    pub fn is_balanced(&self) -> bool {
        is_balanced(self.difference)
    }
}

/// Result of aggregating a list of boxes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// Complete boxes in their original order
    pub lines: Vec<CashBoxLine>,
    /// Number of incomplete boxes left out of the totals
    pub excluded: usize,
    pub totals: Totals,
}

impl Reconciliation {
    pub fn valid_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_balanced(&self) -> bool {
        self.totals.is_balanced()
    }

    pub fn cash_boxes(&self) -> impl Iterator<Item = &CashBox> {
        self.lines.iter().map(|line| &line.cash_box)
    }
}

/// Aggregate a list of boxes, skipping incomplete ones
pub fn reconcile(boxes: &[CashBox]) -> Reconciliation {
    let lines: Vec<CashBoxLine> = boxes
        .iter()
        .enumerate()
        .filter(|(_, cash_box)| cash_box.is_complete())
        .map(|(index, cash_box)| CashBoxLine::new(index, cash_box.clone()))
        .collect();

    let totals = Totals::new(
        lines.iter().map(|line| line.cash_box.vale_amount).sum(),
        lines.iter().map(|line| line.breakdown_total).sum(),
    );

    Reconciliation {
        excluded: boxes.len() - lines.len(),
        lines,
        totals,
    }
}
