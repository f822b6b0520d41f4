//! Common types and utilities shared by the gendump crates.
//!
//! This crate provides:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)
//! - Limits and fixed formatting constants for artifacts and catalogs

pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes, format_message,
};

// Centralized limits and artifact constants
pub mod limits;
