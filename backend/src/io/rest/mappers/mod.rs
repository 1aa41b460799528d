//! Conversions between `shared` DTOs and domain types.

pub mod cash_box_mapper;
pub mod name_mapper;
pub mod reconciliation_mapper;
pub mod report_mapper;
pub mod session_mapper;
pub mod wizard_mapper;

pub use cash_box_mapper::CashBoxMapper;
pub use name_mapper::NameMapper;
pub use reconciliation_mapper::ReconciliationMapper;
pub use report_mapper::ReportMapper;
pub use session_mapper::SessionMapper;
pub use wizard_mapper::WizardMapper;
