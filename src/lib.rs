//! `gendump` driver library.
//!
//! The resolution engine lives in `gendump-solver` and the catalog-backed
//! registry in `gendump-catalog`. This crate wires them to configuration,
//! output files and the command line.

pub mod cli;
pub mod tracing_config;
