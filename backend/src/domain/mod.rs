//! # Domain Module
//!
//! Business logic for reconciling gas-station cash boxes against their vales.
//!
//! The core is pure: the denomination table, the breakdown calculator, box
//! aggregation, date/shift grouping, report assembly and the wizard state
//! machine take values in and return values out. Services wrap that core
//! with persistence through the storage traits.
//!
//! ## Module Organization
//!
//! - **models**: denominations, breakdowns, cash boxes, sessions, names, reports
//! - **reconciliation**: totals, differences and the one-cent balance rule
//! - **grouping**: boxes per date and shift, denomination totals
//! - **report_assembler**: data behind the "by cash box" and "by date" reports
//! - **wizard**: the five-step audit workflow
//! - **\*_service**: operations exposed to the REST layer
//!
//! ## Business Rules
//!
//! - A box takes part in totals only once it has a date and a worker name
//! - Difference is always counted cash minus vales; positive means surplus
//! - A difference below one cent in absolute value is balanced
//! - Amounts are exact decimals; nothing is computed in floating point

pub mod commands;
pub mod errors;
pub mod grouping;
pub mod models;
pub mod name_service;
pub mod reconciliation;
pub mod reconciliation_service;
pub mod report_assembler;
pub mod report_service;
pub mod session_service;
pub mod wizard;

pub use errors::{ServiceError, ServiceResult};
pub use name_service::NameService;
pub use reconciliation_service::{BreakdownTotal, ReconciliationService, ReconciliationSummary};
pub use report_service::ReportService;
pub use session_service::SessionService;
