//! Dashboard statistics

use crate::store::models::{Expense, Student, Transaction};
use serde::Serialize;

/// Aggregate money position shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_income: i64,
    pub total_expense: i64,
    /// Estimated shortfall against the annual tuition target, floored at zero
    pub total_arrears: i64,
    pub balance: i64,
    /// One year of SPP across the whole roster
    pub target: i64,
}

/// Compute the dashboard totals over full collection snapshots.
///
/// Income sums every transaction regardless of its `type` field; all
/// creation paths write `IN`. The target is a flat
/// twelve-months-per-student estimate, independent of enrollment date.
pub fn dashboard_stats(
    transactions: &[Transaction],
    expenses: &[Expense],
    students: &[Student],
) -> DashboardStats {
    let total_income: i64 = transactions.iter().map(|t| t.amount).sum();
    let total_expense: i64 = expenses.iter().map(|e| e.amount).sum();
    let target: i64 = students.iter().map(|s| s.spp_amount * 12).sum();

    DashboardStats {
        total_income,
        total_expense,
        total_arrears: (target - total_income).max(0),
        balance: total_income - total_expense,
        target,
    }
}
