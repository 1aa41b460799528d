use chrono::{DateTime, NaiveDate, Utc};
use std::str::FromStr;

pub const MAX_TITLE_LENGTH: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    ByCashBox,
    ByDate,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::ByCashBox => "by_cash_box",
            ReportKind::ByDate => "by_date",
        }
    }

    pub fn default_title(&self, session_date: NaiveDate) -> String {
        let label = match self {
            ReportKind::ByCashBox => "Arqueo por bote",
            ReportKind::ByDate => "Arqueo por fecha",
        };
        format!("{} ({})", label, session_date.format("%Y-%m-%d"))
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "by_cash_box" => Ok(ReportKind::ByCashBox),
            "by_date" => Ok(ReportKind::ByDate),
            other => Err(format!("Unknown report type '{}'", other)),
        }
    }
}

/// Report content waiting to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub session_id: i64,
    pub kind: ReportKind,
    pub title: String,
    pub content: String,
}

/// Generated report content; written once, never updated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReport {
    pub id: i64,
    pub session_id: i64,
    pub kind: ReportKind,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportValidationError {
    #[error("Report content cannot be empty")]
    EmptyContent,
    #[error("Report title is too long ({0} characters, max 200)")]
    TitleTooLong(usize),
}
