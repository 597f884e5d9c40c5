//! Account service
//!
//! User accounts for the two roles the system knows: admin (full
//! access) and user (cashier screens). Passwords are stored as Argon2id
//! PHC strings. The bootstrap admin account can never be deleted.

use crate::auth;
use crate::config;
use crate::error::{AppError, Result};
use crate::store::models::{Role, User};
use crate::store::RecordStore;

/// Service for managing user accounts
#[derive(Clone)]
pub struct AccountService {
    store: RecordStore,
}

impl AccountService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// All accounts
    pub async fn list(&self) -> Result<Vec<User>> {
        self.store.users().await
    }

    /// Create an account; usernames are unique
    pub async fn create(
        &self,
        username: &str,
        password: &str,
        full_name: &str,
        role: Role,
    ) -> Result<User> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }

        let mut users = self.store.users().await?;

        if users.iter().any(|u| u.username == username) {
            return Err(AppError::DuplicateUsername(username.to_string()));
        }

        let user = User {
            username: username.to_string(),
            password_hash: auth::hash_password(password)?,
            role,
            full_name: full_name.to_string(),
        };

        users.push(user.clone());
        self.store.save_users(&users).await?;

        tracing::info!("Created account: {}", user.username);

        Ok(user)
    }

    /// Delete an account. The bootstrap admin is rejected
    /// unconditionally, before the roster is even read.
    pub async fn delete(&self, username: &str) -> Result<()> {
        if username == config::BOOTSTRAP_ADMIN {
            return Err(AppError::ProtectedAccount(username.to_string()));
        }

        let mut users = self.store.users().await?;

        let before = users.len();
        users.retain(|u| u.username != username);
        if users.len() == before {
            return Err(AppError::AccountNotFound(username.to_string()));
        }

        self.store.save_users(&users).await?;

        tracing::info!("Deleted account: {}", username);

        Ok(())
    }

    /// Verify credentials and return the account.
    /// Unknown usernames and wrong passwords fail with the same error.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let users = self.store.users().await?;

        let user = users
            .into_iter()
            .find(|u| u.username == username)
            .ok_or_else(|| AppError::AccountNotFound(username.to_string()))?;

        if !auth::verify_password(password, &user.password_hash)? {
            return Err(AppError::AccountNotFound(username.to_string()));
        }

        tracing::debug!("Authenticated account: {}", username);

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::schema::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> AccountService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        AccountService::new(RecordStore::new(pool))
    }

    #[tokio::test]
    async fn test_bootstrap_accounts_authenticate() {
        let service = create_test_service().await;

        let admin = service.authenticate("admin", "admin").await.unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.full_name, "Administrator");

        let kasir = service.authenticate("kasir", "kasir").await.unwrap();
        assert_eq!(kasir.role, Role::User);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_fail_alike() {
        let service = create_test_service().await;

        let wrong = service.authenticate("admin", "hunter2").await;
        assert!(matches!(wrong, Err(AppError::AccountNotFound(_))));

        let unknown = service.authenticate("nobody", "hunter2").await;
        assert!(matches!(unknown, Err(AppError::AccountNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_stores_hash_not_password() {
        let service = create_test_service().await;

        let user = service
            .create("bendahara", "rahasia", "Ibu Bendahara", Role::User)
            .await
            .unwrap();

        assert!(user.password_hash.starts_with("$argon2"));
        assert_ne!(user.password_hash, "rahasia");

        let logged_in = service.authenticate("bendahara", "rahasia").await.unwrap();
        assert_eq!(logged_in.full_name, "Ibu Bendahara");
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected_without_write() {
        let service = create_test_service().await;

        let result = service.create("kasir", "baru", "Kasir Kedua", Role::User).await;
        assert!(matches!(result, Err(AppError::DuplicateUsername(_))));

        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_bootstrap_admin_cannot_be_deleted() {
        let service = create_test_service().await;

        let result = service.delete("admin").await;
        assert!(matches!(result, Err(AppError::ProtectedAccount(_))));

        let users = service.list().await.unwrap();
        assert!(users.iter().any(|u| u.username == "admin"));
    }

    #[tokio::test]
    async fn test_delete_other_accounts() {
        let service = create_test_service().await;

        service.delete("kasir").await.unwrap();

        let users = service.list().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, "admin");

        let missing = service.delete("kasir").await;
        assert!(matches!(missing, Err(AppError::AccountNotFound(_))));
    }
}
