//! # Storage Layer
//!
//! Persistence for sessions, cash boxes, picker names and saved reports.
//! Domain services depend on the traits in [`traits`]; [`sqlite`] provides
//! the implementations backed by `sqlx`.

pub mod sqlite;
pub mod traits;

pub use sqlite::{DbConnection, NameRepository, ReportRepository, SessionRepository};
pub use traits::{NameStorage, ReportStorage, SessionInsert, SessionStorage};
