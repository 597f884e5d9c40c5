//! School profile service
//!
//! The school settings singleton: institution identity printed on
//! receipts and reports, replaced wholesale on save.

use crate::config;
use crate::error::Result;
use crate::media;
use crate::store::models::SchoolSettings;
use crate::store::RecordStore;

/// Service for the school profile
#[derive(Clone)]
pub struct SchoolService {
    store: RecordStore,
}

impl SchoolService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// The school profile singleton
    pub async fn profile(&self) -> Result<SchoolSettings> {
        self.store.settings().await
    }

    /// Replace the whole profile
    pub async fn update_profile(&self, settings: SchoolSettings) -> Result<SchoolSettings> {
        self.store.save_settings(&settings).await?;

        tracing::info!("Updated school profile: {}", settings.name);

        Ok(settings)
    }

    /// Upload the school logo, stored inline as a base64 data URL.
    /// Logos over the limit are rejected before any write.
    pub async fn set_logo(&self, data: &[u8], mime_type: &str) -> Result<SchoolSettings> {
        let url = media::encode_data_url(data, mime_type, config::MAX_LOGO_BYTES)?;

        let mut settings = self.store.settings().await?;
        settings.logo_url = Some(url);
        self.store.save_settings(&settings).await?;

        tracing::info!("Updated school logo");

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::store::schema::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> SchoolService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        SchoolService::new(RecordStore::new(pool))
    }

    #[tokio::test]
    async fn test_profile_seeds_on_first_read() {
        let service = create_test_service().await;

        let profile = service.profile().await.unwrap();
        assert_eq!(profile.name, "SMA Teladan Bangsa");
        assert_eq!(profile.principal_name, "Drs. H. Suwandi, M.Pd");
        assert_eq!(profile.receipt_header.as_deref(), Some("BUKTI PEMBAYARAN SAH"));
        assert!(profile.logo_url.is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_wholesale() {
        let service = create_test_service().await;

        let mut profile = service.profile().await.unwrap();
        profile.address = "Jl. Merdeka No. 45, Bandung".into();
        profile.receipt_header = None;
        service.update_profile(profile).await.unwrap();

        let reread = service.profile().await.unwrap();
        assert_eq!(reread.address, "Jl. Merdeka No. 45, Bandung");
        assert!(reread.receipt_header.is_none());
    }

    #[tokio::test]
    async fn test_logo_size_limit() {
        let service = create_test_service().await;

        let updated = service.set_logo(b"logo bytes", "image/png").await.unwrap();
        assert!(updated.logo_url.is_some());

        let oversized = vec![0u8; config::MAX_LOGO_BYTES + 1];
        let result = service.set_logo(&oversized, "image/png").await;
        assert!(matches!(result, Err(AppError::ImageTooLarge { .. })));

        // The accepted logo survives the rejected upload
        let profile = service.profile().await.unwrap();
        assert!(profile.logo_url.unwrap().starts_with("data:image/png;base64,"));
    }
}
