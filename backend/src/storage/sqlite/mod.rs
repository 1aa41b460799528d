//! # SQLite Storage
//!
//! - **connection.rs** - pool setup and schema
//! - **repositories/** - one repository per storage trait

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{NameRepository, ReportRepository, SessionRepository};
