//! Application configuration constants
//!
//! Central location for all configuration constants, resource limits,
//! and validation boundaries used throughout the application.

// ===== Data Location =====

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "EDUFINANCE_DATA_DIR";

/// Directory name used under the user's home when no override is set
pub const DEFAULT_DATA_DIR: &str = ".edufinance";

/// SQLite database filename inside the data directory
pub const DATABASE_FILE: &str = "edufinance.db";

// ===== Collection Names =====
//
// These are the storage keys of the historical data format. Keeping them
// verbatim lets an existing dataset be carried over collection by collection.

/// Student roster collection
pub const COLLECTION_STUDENTS: &str = "edu_students";
/// Payment transaction log collection
pub const COLLECTION_TRANSACTIONS: &str = "edu_transactions";
/// Operational expense log collection
pub const COLLECTION_EXPENSES: &str = "edu_expenses";
/// Fee type catalog collection
pub const COLLECTION_FEES: &str = "edu_fees";
/// School settings singleton collection
pub const COLLECTION_SETTINGS: &str = "edu_settings";
/// User account collection
pub const COLLECTION_USERS: &str = "edu_users";

// ===== Image Limits =====

/// Maximum size for a student photo in bytes (1 MB).
/// Photos are stored inline as base64 data URLs, so oversized images
/// bloat the roster collection and every roster read.
pub const MAX_PHOTO_BYTES: usize = 1_000_000;

/// Maximum size for the school logo in bytes (500 KB).
/// The logo is embedded in every printed receipt.
pub const MAX_LOGO_BYTES: usize = 500_000;

// ===== Accounts =====

/// Username of the bootstrap administrator account.
/// This account is seeded on first run and can never be deleted.
pub const BOOTSTRAP_ADMIN: &str = "admin";

// ===== Phone Normalization =====

/// Country calling code substituted for a leading local `0` when
/// building WhatsApp links
pub const PHONE_COUNTRY_PREFIX: &str = "62";
