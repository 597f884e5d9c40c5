//! Student roster service
//!
//! Roster management: lookups, create/update/delete and photo upload.
//! The NIS is the primary key; duplicates are rejected before any write.

use crate::config;
use crate::error::{AppError, Result};
use crate::interchange::{self, ImportSummary};
use crate::media;
use crate::store::models::Student;
use crate::store::RecordStore;

/// Service for managing the student roster
#[derive(Clone)]
pub struct StudentService {
    store: RecordStore,
}

impl StudentService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Get the full roster
    pub async fn list(&self) -> Result<Vec<Student>> {
        self.store.students().await
    }

    /// Filter the roster by NIS, name or class (case-insensitive)
    pub async fn filter(&self, query: &str) -> Result<Vec<Student>> {
        let all = self.list().await?;

        let query_lower = query.to_lowercase();

        let filtered: Vec<Student> = all
            .into_iter()
            .filter(|s| {
                s.id.to_lowercase().contains(&query_lower)
                    || s.name.to_lowercase().contains(&query_lower)
                    || s.class_name.to_lowercase().contains(&query_lower)
            })
            .collect();

        Ok(filtered)
    }

    /// Find one student by exact NIS or case-insensitive name fragment.
    /// This is the lookup behind the cashier and status screens.
    pub async fn find(&self, query: &str) -> Result<Student> {
        let all = self.list().await?;

        let query_lower = query.to_lowercase();

        all.into_iter()
            .find(|s| s.id == query || s.name.to_lowercase().contains(&query_lower))
            .ok_or_else(|| AppError::StudentNotFound(query.to_string()))
    }

    /// Look up one student by exact NIS
    pub async fn get(&self, nis: &str) -> Result<Student> {
        let all = self.list().await?;

        all.into_iter()
            .find(|s| s.id == nis)
            .ok_or_else(|| AppError::StudentNotFound(nis.to_string()))
    }

    /// Add a student to the roster
    pub async fn create(&self, student: Student) -> Result<Student> {
        if student.id.trim().is_empty() || student.name.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "NIS and name are required".to_string(),
            ));
        }

        let mut all = self.list().await?;

        if all.iter().any(|s| s.id == student.id) {
            return Err(AppError::DuplicateStudent(student.id));
        }

        all.push(student.clone());
        self.store.save_students(&all).await?;

        tracing::info!("Created student: {}", student.id);

        Ok(student)
    }

    /// Replace a student record, matched by NIS
    pub async fn update(&self, student: Student) -> Result<Student> {
        let mut all = self.list().await?;

        let slot = all
            .iter_mut()
            .find(|s| s.id == student.id)
            .ok_or_else(|| AppError::StudentNotFound(student.id.clone()))?;
        *slot = student.clone();

        self.store.save_students(&all).await?;

        tracing::info!("Updated student: {}", student.id);

        Ok(student)
    }

    /// Remove a student from the roster.
    ///
    /// Historical transactions keep their NIS/name snapshot; they are
    /// not touched.
    pub async fn delete(&self, nis: &str) -> Result<()> {
        let mut all = self.list().await?;

        let before = all.len();
        all.retain(|s| s.id != nis);
        if all.len() == before {
            return Err(AppError::StudentNotFound(nis.to_string()));
        }

        self.store.save_students(&all).await?;

        tracing::info!("Deleted student: {}", nis);

        Ok(())
    }

    /// Attach a photo, stored inline as a base64 data URL.
    /// Images over the photo limit are rejected before any write.
    pub async fn set_photo(&self, nis: &str, data: &[u8], mime_type: &str) -> Result<Student> {
        let url = media::encode_data_url(data, mime_type, config::MAX_PHOTO_BYTES)?;

        let mut all = self.list().await?;

        let slot = all
            .iter_mut()
            .find(|s| s.id == nis)
            .ok_or_else(|| AppError::StudentNotFound(nis.to_string()))?;
        slot.photo_url = Some(url);
        let updated = slot.clone();

        self.store.save_students(&all).await?;

        tracing::info!("Updated photo for student: {}", nis);

        Ok(updated)
    }

    /// Bulk-load roster rows from delimited text, merging into the
    /// existing roster by NIS. A parse failure leaves the roster as is.
    pub async fn import_roster(&self, text: &str) -> Result<ImportSummary> {
        let existing = self.list().await?;

        let (merged, summary) = interchange::roster::merge_roster(text, &existing)?;

        self.store.save_students(&merged).await?;

        tracing::info!(
            "Imported {} roster rows ({} skipped)",
            summary.imported,
            summary.skipped
        );

        Ok(summary)
    }

    /// Render the roster as delimited text
    pub async fn export_roster(&self) -> Result<String> {
        let students = self.list().await?;

        Ok(interchange::roster::render_roster(&students))
    }
}
