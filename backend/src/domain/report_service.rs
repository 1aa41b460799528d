use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::reports::SaveReportCommand;
use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::{NewReport, ReportKind, ReportValidationError, SavedReport};
use crate::domain::models::report::MAX_TITLE_LENGTH;
use crate::domain::report_assembler::{assemble_report, ReportData};
use crate::storage::traits::{ReportStorage, SessionStorage};

/// Builds report data for stored sessions and keeps generated report content
#[derive(Clone)]
pub struct ReportService {
    sessions: Arc<dyn SessionStorage>,
    reports: Arc<dyn ReportStorage>,
}

impl ReportService {
    pub fn new(sessions: Arc<dyn SessionStorage>, reports: Arc<dyn ReportStorage>) -> Self {
        Self { sessions, reports }
    }

    pub async fn build_report(&self, session_id: i64, kind: ReportKind) -> ServiceResult<ReportData> {
        info!("Building {} report for session {}", kind.as_str(), session_id);

        let stored = self
            .sessions
            .get_session(session_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", session_id))?;
        let cash_boxes = stored.domain_boxes();

        Ok(assemble_report(kind, stored.session, &cash_boxes))
    }

    /// Store generated report content. Content is kept verbatim.
    pub async fn save_report(&self, command: SaveReportCommand) -> ServiceResult<SavedReport> {
        info!(
            "Saving {} report for session {}",
            command.kind.as_str(),
            command.session_id
        );

        if command.content.trim().is_empty() {
            return Err(ReportValidationError::EmptyContent.into());
        }

        let stored = self
            .sessions
            .get_session(command.session_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Session", command.session_id))?;

        let title = match command.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => command.kind.default_title(stored.session.session_date),
        };
        let title_length = title.chars().count();
        if title_length > MAX_TITLE_LENGTH {
            return Err(ReportValidationError::TitleTooLong(title_length).into());
        }

        let saved = self
            .reports
            .insert_report(&NewReport {
                session_id: command.session_id,
                kind: command.kind,
                title,
                content: command.content,
            })
            .await?;
        info!("Saved report {} ('{}')", saved.id, saved.title);
        Ok(saved)
    }

    pub async fn list_reports(&self, session_id: i64) -> ServiceResult<Vec<SavedReport>> {
        info!("Listing reports for session {}", session_id);

        if self.sessions.get_session(session_id).await?.is_none() {
            warn!("Session not found: {}", session_id);
            return Err(ServiceError::not_found("Session", session_id));
        }
        Ok(self.reports.list_reports(session_id).await?)
    }

    pub async fn get_report(&self, report_id: i64) -> ServiceResult<SavedReport> {
        info!("Getting report {}", report_id);

        self.reports
            .get_report(report_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Report", report_id))
    }
}
