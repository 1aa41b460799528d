//! Date/shift grouping and denomination totals for reports.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::domain::models::breakdown::Breakdown;
use crate::domain::models::cash_box::{CashBox, Shift};
use crate::domain::models::denomination::{Denomination, DENOMINATIONS, DENOMINATION_COUNT};
use crate::domain::reconciliation::{CashBoxLine, Totals};

/// Vales and counted cash for one shift of one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftSubtotal {
    pub shift: Shift,
    pub box_count: usize,
    pub total_vales: Decimal,
    pub total_breakdown: Decimal,
}

/// All complete boxes of one date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    pub date: NaiveDate,
    /// Boxes in wizard order
    pub lines: Vec<CashBoxLine>,
    /// Morning then afternoon; a shift without boxes has zero subtotals
    pub shifts: [ShiftSubtotal; 2],
    pub totals: Totals,
    pub denominations: DenominationTotals,
}

impl DateGroup {
    fn build(date: NaiveDate, lines: Vec<CashBoxLine>) -> Self {
        let shifts = Shift::ALL.map(|shift| {
            let boxes: Vec<&CashBox> = lines
                .iter()
                .map(|line| &line.cash_box)
                .filter(|cash_box| cash_box.shift == shift)
                .collect();
            let totals = Totals::from_boxes(boxes.iter().copied());
            ShiftSubtotal {
                shift,
                box_count: boxes.len(),
                total_vales: totals.total_vales,
                total_breakdown: totals.total_breakdown,
            }
        });
        let totals = Totals::from_boxes(lines.iter().map(|line| &line.cash_box));
        let denominations =
            DenominationTotals::from_breakdowns(lines.iter().map(|line| &line.cash_box.breakdown));

        Self {
            date,
            lines,
            shifts,
            totals,
            denominations,
        }
    }

    pub fn shift(&self, shift: Shift) -> &ShiftSubtotal {
        match shift {
            Shift::Morning => &self.shifts[0],
            Shift::Afternoon => &self.shifts[1],
        }
    }
}

/// Group complete boxes by date, oldest date first.
///
/// Lines without a date are skipped; reconciled lines always carry one.
pub fn group_by_date(lines: &[CashBoxLine]) -> Vec<DateGroup> {
    let mut by_date: BTreeMap<NaiveDate, Vec<CashBoxLine>> = BTreeMap::new();
    for line in lines {
        if let Some(date) = line.cash_box.date {
            by_date.entry(date).or_default().push(line.clone());
        }
    }

    by_date
        .into_iter()
        .map(|(date, lines)| DateGroup::build(date, lines))
        .collect()
}

/// One row of a "X units of €50 = €Y" summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DenominationLine {
    pub denomination: &'static Denomination,
    pub count: u64,
    pub amount: Decimal,
}

/// Units counted per denomination across many boxes.
///
/// Keeps all 15 entries, zeros included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DenominationTotals {
    counts: [u64; DENOMINATION_COUNT],
}

impl DenominationTotals {
    pub fn from_breakdowns<'a>(breakdowns: impl IntoIterator<Item = &'a Breakdown>) -> Self {
        let mut totals = Self::default();
        for breakdown in breakdowns {
            for (denomination, count) in breakdown.iter() {
                totals.counts[denomination.index()] += u64::from(count);
            }
        }
        totals
    }

    pub fn count(&self, denomination: &Denomination) -> u64 {
        self.counts[denomination.index()]
    }

    /// Every denomination with its count, in table order
    pub fn all(&self) -> Vec<DenominationLine> {
        DENOMINATIONS
            .iter()
            .zip(self.counts.iter())
            .map(|(denomination, count)| DenominationLine {
                denomination,
                count: *count,
                amount: Decimal::from(*count) * denomination.value(),
            })
            .collect()
    }

    /// Only denominations that were actually counted
    pub fn non_zero(&self) -> Vec<DenominationLine> {
        self.all().into_iter().filter(|line| line.count > 0).collect()
    }

    pub fn total(&self) -> Decimal {
        self.all().iter().map(|line| line.amount).sum()
    }
}
