//! Expense recording service
//!
//! Operational expenses are an append-only log, newest first. Category,
//! description and a positive amount are required before anything is
//! written.

use crate::error::{AppError, Result};
use crate::store::models::Expense;
use crate::store::RecordStore;
use chrono::Utc;

/// Service for recording operational expenses
#[derive(Clone)]
pub struct ExpenseService {
    store: RecordStore,
}

impl ExpenseService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// All expenses, newest first
    pub async fn list(&self) -> Result<Vec<Expense>> {
        self.store.expenses().await
    }

    /// Record an expense.
    ///
    /// `date` is a plain `YYYY-MM-DD`; when omitted it defaults to
    /// today. An empty executor defaults to `Admin`.
    pub async fn record(
        &self,
        date: Option<&str>,
        category: &str,
        description: &str,
        amount: i64,
        executor: &str,
    ) -> Result<Expense> {
        if category.trim().is_empty() || description.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Category and description are required".to_string(),
            ));
        }
        if amount <= 0 {
            return Err(AppError::InvalidInput(
                "Amount must be positive".to_string(),
            ));
        }

        let now = Utc::now();
        let expense = Expense {
            id: format!("EXP-{}", now.timestamp_millis()),
            date: match date {
                Some(d) => d.to_string(),
                None => now.format("%Y-%m-%d").to_string(),
            },
            category: category.to_string(),
            description: description.to_string(),
            amount,
            executor: if executor.trim().is_empty() {
                "Admin".to_string()
            } else {
                executor.to_string()
            },
        };

        self.store.push_expense(expense.clone()).await?;

        tracing::info!("Recorded expense {}: {}", expense.id, expense.category);

        Ok(expense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> ExpenseService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        ExpenseService::new(RecordStore::new(pool))
    }

    #[tokio::test]
    async fn test_record_and_list_newest_first() {
        let service = create_test_service().await;

        service
            .record(Some("2024-06-01"), "ATK", "Spidol dan kertas", 50_000, "kasir")
            .await
            .unwrap();
        service
            .record(Some("2024-06-02"), "Operasional", "Listrik", 450_000, "kasir")
            .await
            .unwrap();

        let all = service.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].category, "Operasional");
        assert_eq!(all[1].category, "ATK");
    }

    #[tokio::test]
    async fn test_missing_fields_rejected_without_write() {
        let service = create_test_service().await;

        let no_category = service
            .record(Some("2024-06-01"), "", "Listrik", 450_000, "kasir")
            .await;
        assert!(matches!(no_category, Err(AppError::InvalidInput(_))));

        let no_description = service
            .record(Some("2024-06-01"), "Operasional", "  ", 450_000, "kasir")
            .await;
        assert!(matches!(no_description, Err(AppError::InvalidInput(_))));

        let zero_amount = service
            .record(Some("2024-06-01"), "Operasional", "Listrik", 0, "kasir")
            .await;
        assert!(matches!(zero_amount, Err(AppError::InvalidInput(_))));

        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_defaults() {
        let service = create_test_service().await;

        let expense = service
            .record(None, "Lainnya", "Konsumsi rapat", 120_000, "")
            .await
            .unwrap();

        assert!(expense.id.starts_with("EXP-"));
        assert_eq!(expense.executor, "Admin");
        // Defaulted date is a plain calendar date
        assert_eq!(expense.date.len(), 10);
        assert!(expense.date.chars().nth(4) == Some('-'));
    }
}
