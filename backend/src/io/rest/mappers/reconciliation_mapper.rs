//! backend/src/io/rest/mappers/reconciliation_mapper.rs

use shared::{
    BreakdownTotalResponse, DateGroupDto, DenominationDto, DenominationKind as SharedDenominationKind,
    DenominationLineDto, DenominationListResponse, ReconciliationSummaryResponse, ShiftSubtotalDto,
    TotalsDto,
};

use super::cash_box_mapper::CashBoxMapper;
use crate::domain::grouping::{DateGroup, DenominationLine};
use crate::domain::models::{Denomination, DenominationKind};
use crate::domain::reconciliation::{format_amount, Totals};
use crate::domain::{BreakdownTotal, ReconciliationSummary};

/// Mapper for totals, groupings and denomination summaries.
pub struct ReconciliationMapper;

impl ReconciliationMapper {
    pub fn to_kind_dto(kind: DenominationKind) -> SharedDenominationKind {
        match kind {
            DenominationKind::Bill => SharedDenominationKind::Bill,
            DenominationKind::Coin => SharedDenominationKind::Coin,
        }
    }

    pub fn to_denomination_list_dto(denominations: &[Denomination]) -> DenominationListResponse {
        DenominationListResponse {
            denominations: denominations
                .iter()
                .map(|denomination| DenominationDto {
                    key: denomination.key().to_string(),
                    value: format_amount(denomination.value()),
                    kind: Self::to_kind_dto(denomination.kind()),
                })
                .collect(),
        }
    }

    pub fn to_totals_dto(totals: &Totals) -> TotalsDto {
        TotalsDto {
            total_vales: format_amount(totals.total_vales),
            total_breakdown: format_amount(totals.total_breakdown),
            difference: format_amount(totals.difference),
            balanced: totals.is_balanced(),
        }
    }

    pub fn to_denomination_lines(lines: &[DenominationLine]) -> Vec<DenominationLineDto> {
        lines
            .iter()
            .map(|line| DenominationLineDto {
                key: line.denomination.key().to_string(),
                kind: Self::to_kind_dto(line.denomination.kind()),
                count: line.count,
                amount: format_amount(line.amount),
            })
            .collect()
    }

    /// Per-date groups list only the denominations that were counted
    pub fn to_date_group_dto(group: &DateGroup) -> DateGroupDto {
        DateGroupDto {
            date: group.date.format("%Y-%m-%d").to_string(),
            cash_boxes: group.lines.iter().map(CashBoxMapper::to_line_dto).collect(),
            shifts: group
                .shifts
                .iter()
                .map(|subtotal| ShiftSubtotalDto {
                    shift: subtotal.shift.number(),
                    box_count: subtotal.box_count,
                    total_vales: format_amount(subtotal.total_vales),
                    total_breakdown: format_amount(subtotal.total_breakdown),
                })
                .collect(),
            totals: Self::to_totals_dto(&group.totals),
            denominations: Self::to_denomination_lines(&group.denominations.non_zero()),
        }
    }

    pub fn to_summary_dto(summary: &ReconciliationSummary) -> ReconciliationSummaryResponse {
        let reconciliation = &summary.reconciliation;
        ReconciliationSummaryResponse {
            valid_box_count: reconciliation.valid_count(),
            excluded_box_count: reconciliation.excluded,
            totals: Self::to_totals_dto(&reconciliation.totals),
            cash_boxes: reconciliation.lines.iter().map(CashBoxMapper::to_line_dto).collect(),
            by_date: summary.by_date.iter().map(Self::to_date_group_dto).collect(),
            denominations: Self::to_denomination_lines(&summary.denominations.all()),
        }
    }

    pub fn to_breakdown_total_dto(result: BreakdownTotal) -> BreakdownTotalResponse {
        BreakdownTotalResponse {
            total: format_amount(result.total),
            rejected_keys: result.rejected_keys,
        }
    }
}
