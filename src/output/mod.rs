//! Output module for the run's durable artifacts
//!
//! This module handles:
//! - Writing the dated CSV snapshot (replacing the previous one)
//! - Appending human-readable entries to the error log

mod csv_writer;
mod error_log;

pub use csv_writer::{records_to_csv, CsvWriter, CSV_HEADERS};
pub use error_log::{format_entry, format_message, ErrorLog};
