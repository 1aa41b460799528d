use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Denomination counts as they arrive from a form: keys are denomination
/// strings ("50", "0.20"), values are whatever the client sent as a count.
pub type RawBreakdown = BTreeMap<String, Value>;

/// Kind of physical currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenominationKind {
    Bill,
    Coin,
}

/// One entry of the fixed denomination table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenominationDto {
    /// Canonical key used in breakdown maps ("500", "0.50", ...)
    pub key: String,
    /// Exact decimal value as a string
    pub value: String,
    pub kind: DenominationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenominationListResponse {
    pub denominations: Vec<DenominationDto>,
}

/// A cash box (bote) as entered in the audit form.
///
/// Fields may be blank while the box is still being filled in; a box with an
/// empty `date` or `worker_name` is treated as not yet entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashBoxDto {
    /// ISO date (YYYY-MM-DD) or empty
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub worker_name: String,
    /// 1 = morning, 2 = afternoon
    #[serde(default = "default_shift")]
    pub shift: u8,
    /// Declared voucher amount as a decimal string; empty means zero
    #[serde(default)]
    pub vale_amount: String,
    #[serde(default)]
    pub breakdown: RawBreakdown,
}

fn default_shift() -> u8 {
    1
}

impl Default for CashBoxDto {
    fn default() -> Self {
        Self {
            date: String::new(),
            worker_name: String::new(),
            shift: default_shift(),
            vale_amount: String::new(),
            breakdown: RawBreakdown::new(),
        }
    }
}

/// Request for the raw breakdown calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownTotalRequest {
    pub breakdown: RawBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownTotalResponse {
    pub total: String,
    /// Keys that do not name one of the recognized denominations
    pub rejected_keys: Vec<String>,
}

/// Vales / counted / difference triple, formatted to two decimals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsDto {
    pub total_vales: String,
    pub total_breakdown: String,
    pub difference: String,
    pub balanced: bool,
}

/// Per-box line of a reconciliation summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashBoxLineDto {
    /// Position of the box in the submitted list
    pub index: usize,
    pub date: String,
    pub worker_name: String,
    pub shift: u8,
    pub vale_amount: String,
    pub breakdown_total: String,
    pub difference: String,
    pub balanced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSubtotalDto {
    pub shift: u8,
    pub box_count: usize,
    pub total_vales: String,
    pub total_breakdown: String,
}

/// "X units of €50 = €Y" line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenominationLineDto {
    pub key: String,
    pub kind: DenominationKind,
    pub count: u64,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateGroupDto {
    pub date: String,
    pub cash_boxes: Vec<CashBoxLineDto>,
    pub shifts: Vec<ShiftSubtotalDto>,
    pub totals: TotalsDto,
    pub denominations: Vec<DenominationLineDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationRequest {
    pub cash_boxes: Vec<CashBoxDto>,
}

/// Aggregated view of a set of cash boxes, with nothing persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationSummaryResponse {
    pub valid_box_count: usize,
    pub excluded_box_count: usize,
    pub totals: TotalsDto,
    pub cash_boxes: Vec<CashBoxLineDto>,
    pub by_date: Vec<DateGroupDto>,
    pub denominations: Vec<DenominationLineDto>,
}

/// Request to persist a finished reconciliation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSessionRequest {
    /// ISO date (YYYY-MM-DD) of the audit
    pub session_date: String,
    pub auditor_name: String,
    pub cash_boxes: Vec<CashBoxDto>,
    /// Optional client-generated UUID; replays with the same key return the
    /// session stored by the first request.
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummaryDto {
    pub id: i64,
    pub session_date: String,
    pub auditor_name: String,
    pub total_cash_boxes: u32,
    pub total_vales: String,
    pub total_breakdown: String,
    pub difference: String,
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSessionResponse {
    pub session: SessionSummaryDto,
    /// False when an idempotency key matched an existing session
    pub created: bool,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummaryDto>,
}

/// A persisted cash box with its computed totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashBoxDetailDto {
    pub id: i64,
    pub position: u32,
    pub date: String,
    pub worker_name: String,
    pub shift: u8,
    pub vale_amount: String,
    pub breakdown: BTreeMap<String, u32>,
    pub breakdown_total: String,
    pub difference: String,
    pub balanced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDetailResponse {
    pub session: SessionSummaryDto,
    pub cash_boxes: Vec<CashBoxDetailDto>,
}

/// Layout of a generated report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    ByCashBox,
    ByDate,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::ByCashBox => "by_cash_box",
            ReportType::ByDate => "by_date",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a report renderer needs, as plain data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDataResponse {
    pub report_type: ReportType,
    pub title: String,
    pub session: SessionSummaryDto,
    pub totals: TotalsDto,
    pub cash_boxes: Vec<CashBoxLineDto>,
    /// Empty for `by_cash_box` reports
    pub by_date: Vec<DateGroupDto>,
    pub denominations: Vec<DenominationLineDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveReportRequest {
    pub report_type: ReportType,
    /// Defaults to a title derived from the session when omitted
    #[serde(default)]
    pub title: Option<String>,
    /// Rendered report (HTML)
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedReportDto {
    pub id: i64,
    pub session_id: i64,
    pub report_type: ReportType,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportListResponse {
    pub reports: Vec<SavedReportDto>,
}

/// Which picker list a saved name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameType {
    Worker,
    Auditor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedNameDto {
    pub id: i64,
    pub name: String,
    pub name_type: NameType,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNameRequest {
    pub name: String,
    pub name_type: NameType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameListResponse {
    pub names: Vec<SavedNameDto>,
}

/// Wizard state as exchanged with the client between transitions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WizardStateDto {
    /// 1 = configuring, 2 = entering boxes, 3 = validating,
    /// 4 = summarizing, 5 = reporting
    pub step: u8,
    /// Current box while in step 2
    #[serde(default)]
    pub box_index: Option<usize>,
    #[serde(default)]
    pub session_date: String,
    #[serde(default)]
    pub auditor_name: String,
    #[serde(default)]
    pub cash_boxes: Vec<CashBoxDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WizardActionDto {
    Configure {
        box_count: usize,
        #[serde(default)]
        session_date: Option<String>,
        #[serde(default)]
        auditor_name: Option<String>,
    },
    Next,
    Back,
    Reset,
    UpdateBox { index: usize, cash_box: CashBoxDto },
    SetAuditor { name: String },
    SetSessionDate { date: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardTransitionRequest {
    pub state: WizardStateDto,
    pub action: WizardActionDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardTransitionResponse {
    pub state: WizardStateDto,
}
