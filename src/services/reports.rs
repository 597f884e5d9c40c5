//! Reporting service
//!
//! Read-side glue: fetch collection snapshots, run the aggregation
//! engine over them, and render the export surfaces. Nothing here
//! writes.

use crate::error::Result;
use crate::finance::{self, DashboardStats, MonthStatus, MonthlyRow};
use crate::interchange;
use crate::store::models::{Transaction, TransactionKind, MONTHS};
use crate::store::RecordStore;

/// Type filter for the transaction history view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFilter {
    All,
    In,
    Out,
}

/// Service for derived financial views
#[derive(Clone)]
pub struct ReportService {
    store: RecordStore,
}

impl ReportService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Dashboard totals over the current collections
    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let transactions = self.store.transactions().await?;
        let expenses = self.store.expenses().await?;
        let students = self.store.students().await?;

        Ok(finance::dashboard_stats(&transactions, &expenses, &students))
    }

    /// The principal report for one calendar year
    pub async fn monthly(&self, year: i32) -> Result<Vec<MonthlyRow>> {
        let transactions = self.store.transactions().await?;
        let expenses = self.store.expenses().await?;

        Ok(finance::monthly_report(
            &transactions,
            &expenses,
            year,
            &MONTHS,
        ))
    }

    /// Twelve-month SPP status for one student
    pub async fn spp_status(&self, nis: &str) -> Result<Vec<MonthStatus>> {
        let transactions = self.store.transactions().await?;

        Ok(finance::spp_status(nis, &transactions, &MONTHS))
    }

    /// One student's payment history, most recent first
    pub async fn student_history(&self, nis: &str) -> Result<Vec<Transaction>> {
        let transactions = self.store.transactions().await?;

        Ok(finance::student_history(nis, &transactions))
    }

    /// The transaction history view: an optional type filter plus a
    /// case-insensitive search over student name, category and id.
    pub async fn history(&self, filter: HistoryFilter, search: &str) -> Result<Vec<Transaction>> {
        let transactions = self.store.transactions().await?;

        let search_lower = search.to_lowercase();

        let filtered: Vec<Transaction> = transactions
            .into_iter()
            .filter(|t| match filter {
                HistoryFilter::All => true,
                HistoryFilter::In => t.kind == TransactionKind::In,
                HistoryFilter::Out => t.kind == TransactionKind::Out,
            })
            .filter(|t| {
                search_lower.is_empty()
                    || t.student_name.to_lowercase().contains(&search_lower)
                    || t.category.to_lowercase().contains(&search_lower)
                    || t.id.to_lowercase().contains(&search_lower)
            })
            .collect();

        Ok(filtered)
    }

    /// Render the transaction history view as delimited text
    pub async fn export_history(&self, filter: HistoryFilter, search: &str) -> Result<String> {
        let view = self.history(filter, search).await?;

        Ok(interchange::reports::render_transactions(&view))
    }

    /// Render the principal report for one year as delimited text
    pub async fn export_monthly(&self, year: i32) -> Result<String> {
        let rows = self.monthly(year).await?;

        Ok(interchange::reports::render_monthly_report(&rows))
    }
}
