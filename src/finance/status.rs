//! Per-student SPP status and payment history

use super::parse_record_millis;
use crate::store::models::Transaction;
use serde::Serialize;
use std::cmp::Reverse;

/// Paid/unpaid marker for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Paid,
    Unpaid,
}

/// SPP status of one month for one student
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthStatus {
    pub month: String,
    pub status: PaymentState,
}

/// Derive the twelve-month SPP status for one student.
///
/// A month counts as paid when any of the student's transactions has a
/// category containing both the substring `SPP` and the month name.
/// Categories are free text; historical payloads carry phrasings other
/// than the `SPP - <Month>` the recording flow writes. Amounts are not
/// considered: one matching transaction marks the whole month.
pub fn spp_status(
    student_id: &str,
    transactions: &[Transaction],
    months: &[&str; 12],
) -> Vec<MonthStatus> {
    let own: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.student_id == student_id)
        .collect();

    months
        .iter()
        .map(|month| {
            let paid = own
                .iter()
                .any(|t| t.category.contains("SPP") && t.category.contains(*month));

            MonthStatus {
                month: month.to_string(),
                status: if paid {
                    PaymentState::Paid
                } else {
                    PaymentState::Unpaid
                },
            }
        })
        .collect()
}

/// A student's transactions, most recent first.
///
/// The sort is stable on the parsed timestamp: records with equal dates
/// keep their stored newest-first order, and records whose date does not
/// parse sort to the end.
pub fn student_history(student_id: &str, transactions: &[Transaction]) -> Vec<Transaction> {
    let mut own: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.student_id == student_id)
        .cloned()
        .collect();

    own.sort_by_key(|t| Reverse(parse_record_millis(&t.date).unwrap_or(i64::MIN)));
    own
}
