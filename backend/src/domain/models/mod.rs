//! Domain models for cash reconciliation.
//!
//! These types are internal to the backend. The REST layer maps them to and
//! from the DTOs of the `shared` crate.

pub mod breakdown;
pub mod cash_box;
pub mod denomination;
pub mod report;
pub mod saved_name;
pub mod session;

pub use breakdown::{raw_total, Breakdown, BreakdownParseError, RawConversion};
pub use cash_box::{parse_entry_date, parse_vale_amount, CashBox, CashBoxValidationError, Shift};
pub use denomination::{Denomination, DenominationKind, DENOMINATIONS, DENOMINATION_COUNT};
pub use report::{NewReport, ReportKind, ReportValidationError, SavedReport};
pub use saved_name::{normalize_name, NameKind, NameValidationError, SavedName};
pub use session::{
    NewSession, ReconciliationSession, SessionStatus, SessionValidationError,
    SessionWithCashBoxes, StoredCashBox,
};
