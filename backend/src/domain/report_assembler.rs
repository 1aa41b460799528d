//! Builds the data behind a printable report. Rendering to HTML happens on
//! the client; this only decides what goes in the report.

use crate::domain::grouping::{group_by_date, DateGroup, DenominationTotals};
use crate::domain::models::{CashBox, ReconciliationSession, ReportKind};
use crate::domain::reconciliation::{reconcile, Reconciliation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportData {
    pub kind: ReportKind,
    pub title: String,
    pub session: ReconciliationSession,
    pub reconciliation: Reconciliation,
    /// Only filled for [`ReportKind::ByDate`]
    pub by_date: Vec<DateGroup>,
    /// Counts across every box of the session
    pub denominations: DenominationTotals,
}

pub fn assemble_report(
    kind: ReportKind,
    session: ReconciliationSession,
    cash_boxes: &[CashBox],
) -> ReportData {
    let reconciliation = reconcile(cash_boxes);
    let by_date = match kind {
        ReportKind::ByCashBox => Vec::new(),
        ReportKind::ByDate => group_by_date(&reconciliation.lines),
    };
    let denominations = DenominationTotals::from_breakdowns(
        reconciliation.cash_boxes().map(|cash_box| &cash_box.breakdown),
    );

    ReportData {
        kind,
        title: kind.default_title(session.session_date),
        session,
        reconciliation,
        by_date,
        denominations,
    }
}
