#![forbid(unsafe_code)]

//! Core domain model and persistence for the fitlog daily fitness log.
//!
//! This crate provides:
//! - The validated `FitnessEntry` record
//! - CSV persistence with per-line fault tolerance
//! - Configuration and logging setup shared by the binaries

pub mod error;
pub mod entry;
pub mod csv_store;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use entry::{FitnessEntry, CSV_COLUMNS, CSV_HEADER};
pub use csv_store::{file_exists, load_from_file, parse_line, read_entries, save_to_file, write_entries};
pub use config::Config;
