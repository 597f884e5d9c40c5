//! Delimited-text interchange
//!
//! Hand-rolled RFC-4180-style parsing and quoting for the spreadsheet
//! surfaces: roster bulk import/export and the report exports.

pub mod csv;
pub mod reports;
pub mod roster;

pub use roster::ImportSummary;
