//! Monthly principal report

use super::parse_record_date;
use crate::store::models::{Expense, Transaction};
use chrono::Datelike;
use serde::Serialize;

/// One month of the principal report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRow {
    pub month: String,
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
}

/// Annual totals across the twelve report rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportTotals {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
}

/// Build the twelve-row income/expense report for one calendar year.
///
/// Rows come out in fixed calendar order. A record buckets by the month
/// and year of its own date; a record whose date does not parse falls
/// out of every bucket.
pub fn monthly_report(
    transactions: &[Transaction],
    expenses: &[Expense],
    year: i32,
    months: &[&str; 12],
) -> Vec<MonthlyRow> {
    (0..12)
        .map(|index| {
            let income: i64 = transactions
                .iter()
                .filter(|t| in_bucket(&t.date, year, index))
                .map(|t| t.amount)
                .sum();
            let expense: i64 = expenses
                .iter()
                .filter(|e| in_bucket(&e.date, year, index))
                .map(|e| e.amount)
                .sum();

            MonthlyRow {
                month: months[index].to_string(),
                income,
                expense,
                balance: income - expense,
            }
        })
        .collect()
}

fn in_bucket(raw_date: &str, year: i32, month_index: usize) -> bool {
    parse_record_date(raw_date)
        .map(|d| d.year() == year && d.month0() as usize == month_index)
        .unwrap_or(false)
}

/// Sum the monthly rows into the annual total row.
pub fn report_totals(rows: &[MonthlyRow]) -> ReportTotals {
    ReportTotals {
        income: rows.iter().map(|r| r.income).sum(),
        expense: rows.iter().map(|r| r.expense).sum(),
        balance: rows.iter().map(|r| r.balance).sum(),
    }
}
