//! Record store over collection documents
//!
//! Each named collection is one row whose body holds the full JSON
//! payload. Reads of an absent or unreadable collection persist and
//! return the documented seed; writes replace the whole body. There is
//! no partial update and no atomicity across collections.

use super::models::*;
use crate::config;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;

/// Store for collection-backed records
#[derive(Clone)]
pub struct RecordStore {
    pool: SqlitePool,
}

impl RecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn read_body(&self, name: &str) -> Result<Option<String>> {
        let body: Option<String> =
            sqlx::query_scalar("SELECT body FROM collections WHERE name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(body)
    }

    async fn write_body(&self, name: &str, body: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO collections (name, body, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(name) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(name)
        .bind(body)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Wrote collection: {}", name);
        Ok(())
    }

    /// Read a collection, falling back to its seed.
    ///
    /// An unreadable body is treated exactly like a missing one: the seed
    /// is persisted and returned. Reads never fail on bad payloads.
    async fn read_or_seed<T, F>(&self, name: &str, seed: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T>,
    {
        if let Some(body) = self.read_body(name).await? {
            match serde_json::from_str(&body) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!("Collection {} is unreadable ({}), reseeding", name, e);
                }
            }
        }

        let value = seed()?;
        self.write_body(name, &serde_json::to_string(&value)?)
            .await?;

        tracing::debug!("Seeded collection: {}", name);
        Ok(value)
    }

    async fn replace<T>(&self, name: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.write_body(name, &serde_json::to_string(value)?).await
    }

    /// Get the full student roster
    pub async fn students(&self) -> Result<Vec<Student>> {
        self.read_or_seed(config::COLLECTION_STUDENTS, || Ok(seed_students()))
            .await
    }

    /// Replace the full student roster
    pub async fn save_students(&self, students: &[Student]) -> Result<()> {
        self.replace(config::COLLECTION_STUDENTS, students).await
    }

    /// Get all transactions, newest first
    pub async fn transactions(&self) -> Result<Vec<Transaction>> {
        self.read_or_seed(config::COLLECTION_TRANSACTIONS, || Ok(Vec::new()))
            .await
    }

    /// Append a transaction at the head of the log
    pub async fn push_transaction(&self, trx: Transaction) -> Result<()> {
        let mut all = self.transactions().await?;
        all.insert(0, trx);
        self.replace(config::COLLECTION_TRANSACTIONS, &all).await
    }

    /// Get all expenses, newest first
    pub async fn expenses(&self) -> Result<Vec<Expense>> {
        self.read_or_seed(config::COLLECTION_EXPENSES, || Ok(Vec::new()))
            .await
    }

    /// Append an expense at the head of the log
    pub async fn push_expense(&self, expense: Expense) -> Result<()> {
        let mut all = self.expenses().await?;
        all.insert(0, expense);
        self.replace(config::COLLECTION_EXPENSES, &all).await
    }

    /// Get the fee type catalog
    pub async fn fee_types(&self) -> Result<Vec<FeeType>> {
        self.read_or_seed(config::COLLECTION_FEES, || Ok(seed_fee_types()))
            .await
    }

    /// Get the school settings singleton
    pub async fn settings(&self) -> Result<SchoolSettings> {
        self.read_or_seed(config::COLLECTION_SETTINGS, || Ok(seed_settings()))
            .await
    }

    /// Replace the school settings singleton
    pub async fn save_settings(&self, settings: &SchoolSettings) -> Result<()> {
        self.replace(config::COLLECTION_SETTINGS, settings).await
    }

    /// Get all user accounts
    pub async fn users(&self) -> Result<Vec<User>> {
        self.read_or_seed(config::COLLECTION_USERS, seed_users).await
    }

    /// Replace all user accounts
    pub async fn save_users(&self, users: &[User]) -> Result<()> {
        self.replace(config::COLLECTION_USERS, users).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_store() -> RecordStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        RecordStore::new(pool)
    }

    #[tokio::test]
    async fn test_students_seed_on_first_read() {
        let store = create_test_store().await;

        let students = store.students().await.unwrap();
        assert_eq!(students.len(), 3);
        assert_eq!(students[0].id, "2024001");

        // The seed must have been persisted, not just returned
        let body: Option<String> =
            sqlx::query_scalar("SELECT body FROM collections WHERE name = 'edu_students'")
                .fetch_one(&store.pool)
                .await
                .unwrap();
        assert!(body.unwrap().contains("Ahmad Dahlan"));
    }

    #[tokio::test]
    async fn test_second_read_returns_persisted_data() {
        let store = create_test_store().await;

        let mut students = store.students().await.unwrap();
        students.retain(|s| s.id == "2024003");
        store.save_students(&students).await.unwrap();

        // Seeding must not run again once the collection exists
        let reread = store.students().await.unwrap();
        assert_eq!(reread.len(), 1);
        assert_eq!(reread[0].name, "Budi Santoso");
    }

    #[tokio::test]
    async fn test_corrupt_body_falls_back_to_seed() {
        let store = create_test_store().await;

        sqlx::query("INSERT INTO collections (name, body) VALUES ('edu_students', 'not json')")
            .execute(&store.pool)
            .await
            .unwrap();

        let students = store.students().await.unwrap();
        assert_eq!(students.len(), 3);

        // The corrupt body was overwritten with the seed
        let body: String =
            sqlx::query_scalar("SELECT body FROM collections WHERE name = 'edu_students'")
                .fetch_one(&store.pool)
                .await
                .unwrap();
        assert!(serde_json::from_str::<Vec<Student>>(&body).is_ok());
    }

    #[tokio::test]
    async fn test_transactions_seed_empty() {
        let store = create_test_store().await;

        let transactions = store.transactions().await.unwrap();
        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn test_push_transaction_prepends() {
        let store = create_test_store().await;

        let mut trx = Transaction {
            id: "TRX-1".into(),
            date: "2024-01-10T09:00:00Z".into(),
            student_id: "2024001".into(),
            student_name: "Ahmad Dahlan".into(),
            category: "SPP - Januari".into(),
            amount: 150_000,
            kind: TransactionKind::In,
            notes: None,
            pic: "kasir".into(),
        };
        store.push_transaction(trx.clone()).await.unwrap();

        trx.id = "TRX-2".into();
        trx.category = "SPP - Februari".into();
        store.push_transaction(trx).await.unwrap();

        let all = store.transactions().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "TRX-2");
        assert_eq!(all[1].id, "TRX-1");
    }

    #[tokio::test]
    async fn test_push_expense_prepends() {
        let store = create_test_store().await;

        let mut expense = Expense {
            id: "EXP-1".into(),
            date: "2024-01-15".into(),
            category: "ATK".into(),
            description: "Spidol".into(),
            amount: 50_000,
            executor: "Admin".into(),
        };
        store.push_expense(expense.clone()).await.unwrap();

        expense.id = "EXP-2".into();
        store.push_expense(expense).await.unwrap();

        let all = store.expenses().await.unwrap();
        assert_eq!(all[0].id, "EXP-2");
    }

    #[tokio::test]
    async fn test_settings_singleton_replace() {
        let store = create_test_store().await;

        let mut settings = store.settings().await.unwrap();
        assert_eq!(settings.name, "SMA Teladan Bangsa");

        settings.name = "SMA Harapan Baru".into();
        settings.receipt_header = None;
        store.save_settings(&settings).await.unwrap();

        let reread = store.settings().await.unwrap();
        assert_eq!(reread.name, "SMA Harapan Baru");
        assert_eq!(reread.receipt_header, None);
    }

    #[tokio::test]
    async fn test_fee_catalog_seeds() {
        let store = create_test_store().await;

        let fees = store.fee_types().await.unwrap();
        assert_eq!(fees.len(), 3);
        assert_eq!(fees[0].name, "Uang Gedung");
        assert_eq!(fees[0].amount, 1_000_000);
    }

    #[tokio::test]
    async fn test_users_seed_with_hashes() {
        let store = create_test_store().await;

        let users = store.users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u.password_hash.starts_with("$argon2")));
    }
}
