//! Report exports

use super::csv;
use crate::finance::MonthlyRow;
use crate::store::models::Transaction;

/// Column headers of the transaction history export
pub const TRANSACTION_HEADER: [&str; 6] =
    ["ID", "Tanggal", "Nama Siswa", "Kategori", "Nominal", "Petugas"];

/// Render transactions as delimited text, one row per record, in the
/// order given (callers pass the filtered view they are looking at).
pub fn render_transactions(transactions: &[Transaction]) -> String {
    let mut out = String::new();
    out.push_str(&csv::line(&TRANSACTION_HEADER));
    out.push('\n');

    for t in transactions {
        let amount = t.amount.to_string();
        out.push_str(&csv::line(&[
            &t.id,
            &t.date,
            &t.student_name,
            &t.category,
            &amount,
            &t.pic,
        ]));
        out.push('\n');
    }

    out
}

/// Render the monthly principal report as delimited text, twelve rows
/// under a `month,income,expense,balance` header.
pub fn render_monthly_report(rows: &[MonthlyRow]) -> String {
    let mut out = String::from("month,income,expense,balance\n");

    for row in rows {
        out.push_str(&format!(
            "{},{},{},{}\n",
            csv::quote(&row.month),
            row.income,
            row.expense,
            row.balance
        ));
    }

    out
}
