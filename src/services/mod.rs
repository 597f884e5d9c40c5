//! Services module
//!
//! Business logic services that coordinate between the app surface and
//! the record store.

pub mod accounts;
pub mod expenses;
pub mod payments;
pub mod reports;
pub mod school;
pub mod students;

pub use accounts::AccountService;
pub use expenses::ExpenseService;
pub use payments::PaymentService;
pub use reports::{HistoryFilter, ReportService};
pub use school::SchoolService;
pub use students::StudentService;
