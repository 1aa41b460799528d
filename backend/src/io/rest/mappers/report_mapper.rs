//! backend/src/io/rest/mappers/report_mapper.rs

use shared::{ReportDataResponse, ReportListResponse, ReportType, SaveReportRequest, SavedReportDto};

use super::cash_box_mapper::CashBoxMapper;
use super::reconciliation_mapper::ReconciliationMapper;
use super::session_mapper::SessionMapper;
use crate::domain::commands::reports::SaveReportCommand;
use crate::domain::models::{ReportKind, SavedReport};
use crate::domain::report_assembler::ReportData;

/// Mapper between report DTOs and domain reports.
pub struct ReportMapper;

impl ReportMapper {
    pub fn to_kind(report_type: ReportType) -> ReportKind {
        match report_type {
            ReportType::ByCashBox => ReportKind::ByCashBox,
            ReportType::ByDate => ReportKind::ByDate,
        }
    }

    pub fn to_report_type(kind: ReportKind) -> ReportType {
        match kind {
            ReportKind::ByCashBox => ReportType::ByCashBox,
            ReportKind::ByDate => ReportType::ByDate,
        }
    }

    pub fn to_command(session_id: i64, request: SaveReportRequest) -> SaveReportCommand {
        SaveReportCommand {
            session_id,
            kind: Self::to_kind(request.report_type),
            title: request.title,
            content: request.content,
        }
    }

    pub fn to_report_data_dto(report: &ReportData) -> ReportDataResponse {
        ReportDataResponse {
            report_type: Self::to_report_type(report.kind),
            title: report.title.clone(),
            session: SessionMapper::to_summary_dto(&report.session),
            totals: ReconciliationMapper::to_totals_dto(&report.reconciliation.totals),
            cash_boxes: report
                .reconciliation
                .lines
                .iter()
                .map(CashBoxMapper::to_line_dto)
                .collect(),
            by_date: report
                .by_date
                .iter()
                .map(ReconciliationMapper::to_date_group_dto)
                .collect(),
            denominations: ReconciliationMapper::to_denomination_lines(&report.denominations.all()),
        }
    }

    pub fn to_saved_dto(report: &SavedReport) -> SavedReportDto {
        SavedReportDto {
            id: report.id,
            session_id: report.session_id,
            report_type: Self::to_report_type(report.kind),
            title: report.title.clone(),
            content: report.content.clone(),
            created_at: report.created_at.to_rfc3339(),
        }
    }

    pub fn to_list_dto(reports: &[SavedReport]) -> ReportListResponse {
        ReportListResponse {
            reports: reports.iter().map(Self::to_saved_dto).collect(),
        }
    }
}
