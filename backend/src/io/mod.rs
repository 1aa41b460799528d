//! # IO Module
//!
//! Interface layer between HTTP clients and the domain. Handlers decode the
//! `shared` DTOs, call a service and encode the result; they hold no
//! reconciliation logic of their own.

pub mod rest;

pub use rest::*;
