//! Financial aggregation engine
//!
//! Pure functions that turn raw transaction and expense records into
//! derived views: dashboard totals, the monthly principal report and
//! per-student SPP status. Nothing here touches storage or mutates its
//! inputs; callers fetch collection snapshots first and pass them in.

pub mod report;
pub mod stats;
pub mod status;

pub use report::{monthly_report, report_totals, MonthlyRow, ReportTotals};
pub use stats::{dashboard_stats, DashboardStats};
pub use status::{spp_status, student_history, MonthStatus, PaymentState};

use chrono::{DateTime, NaiveDate};

/// Parse the calendar date out of a stored record date.
///
/// Payment dates are RFC 3339 timestamps, expense dates plain
/// `YYYY-MM-DD`. The date is taken as written, with no timezone
/// reinterpretation.
fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Millisecond sort key for record dates. Plain dates count as midnight UTC.
fn parse_record_millis(raw: &str) -> Option<i64> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}
