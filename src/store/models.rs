//! Record models
//!
//! Rust structs for the records held in each collection, plus the seed
//! data written on first read. Fields serialize in the camelCase form of
//! the historical data format so existing payloads load unchanged.

use crate::auth;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Indonesian month names, calendar order. SPP payment categories embed
/// these names; the status report matches on them.
pub const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// A student on the roster, keyed by NIS
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// NIS, the school-issued student number. Unique across the roster.
    pub id: String,
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    /// Monthly SPP tuition in whole Rupiah
    pub spp_amount: i64,
    pub phone: String,
    /// Photo as a base64 data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Direction of money movement on a transaction record.
/// Every creation path writes `In`; `Out` appears only in historical
/// payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    In,
    Out,
}

/// An income transaction. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// `TRX-<unix millis>` at creation time
    pub id: String,
    /// RFC 3339 timestamp of the payment
    pub date: String,
    pub student_id: String,
    /// Snapshot of the student's name at payment time; roster edits do
    /// not touch it
    pub student_name: String,
    /// Free text; SPP payments use the `SPP - <Month>` convention
    pub category: String,
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Person in charge: the cashier who recorded the payment
    pub pic: String,
}

/// An operational expense. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// `EXP-<unix millis>` at creation time
    pub id: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: i64,
    pub executor: String,
}

/// A named non-SPP fee in the school's catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeType {
    pub id: String,
    pub name: String,
    pub amount: i64,
}

/// School profile singleton, printed on receipts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolSettings {
    pub name: String,
    pub address: String,
    pub principal_name: String,
    pub principal_phone: String,
    /// Logo as a base64 data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_header: Option<String>,
}

/// Access level of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

/// A user account, keyed by username
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    /// Argon2id PHC string; plaintext passwords are never stored
    pub password_hash: String,
    pub role: Role,
    pub full_name: String,
}

/// Roster seeded on first read
pub fn seed_students() -> Vec<Student> {
    vec![
        Student {
            id: "2024001".into(),
            name: "Ahmad Dahlan".into(),
            class_name: "X-A".into(),
            spp_amount: 150_000,
            phone: "6281234567890".into(),
            photo_url: None,
        },
        Student {
            id: "2024002".into(),
            name: "Siti Aminah".into(),
            class_name: "X-B".into(),
            spp_amount: 150_000,
            phone: "6289876543210".into(),
            photo_url: None,
        },
        Student {
            id: "2024003".into(),
            name: "Budi Santoso".into(),
            class_name: "XI-IPA".into(),
            spp_amount: 175_000,
            phone: "6281122334455".into(),
            photo_url: None,
        },
    ]
}

/// Fee catalog seeded on first read
pub fn seed_fee_types() -> Vec<FeeType> {
    vec![
        FeeType {
            id: "1".into(),
            name: "Uang Gedung".into(),
            amount: 1_000_000,
        },
        FeeType {
            id: "2".into(),
            name: "Seragam".into(),
            amount: 750_000,
        },
        FeeType {
            id: "3".into(),
            name: "Buku Paket".into(),
            amount: 500_000,
        },
    ]
}

/// School profile seeded on first read
pub fn seed_settings() -> SchoolSettings {
    SchoolSettings {
        name: "SMA Teladan Bangsa".into(),
        address: "Jl. Pendidikan No. 123, Jakarta Selatan".into(),
        principal_name: "Drs. H. Suwandi, M.Pd".into(),
        principal_phone: "628111222333".into(),
        logo_url: None,
        receipt_header: Some("BUKTI PEMBAYARAN SAH".into()),
    }
}

/// Bootstrap accounts seeded on first read.
/// Initial passwords equal the usernames and are hashed at seed time.
pub fn seed_users() -> Result<Vec<User>> {
    Ok(vec![
        User {
            username: "admin".into(),
            password_hash: auth::hash_password("admin")?,
            role: Role::Admin,
            full_name: "Administrator".into(),
        },
        User {
            username: "kasir".into(),
            password_hash: auth::hash_password("kasir")?,
            role: Role::User,
            full_name: "Staff Tata Usaha".into(),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_json_field_names() {
        let student = &seed_students()[0];
        let json = serde_json::to_value(student).unwrap();

        assert_eq!(json["id"], "2024001");
        assert_eq!(json["class"], "X-A");
        assert_eq!(json["sppAmount"], 150_000);
        // Absent photo stays absent, not null
        assert!(json.get("photoUrl").is_none());
    }

    #[test]
    fn test_transaction_json_field_names() {
        let trx = Transaction {
            id: "TRX-1700000000000".into(),
            date: "2024-03-05T08:30:00+07:00".into(),
            student_id: "2024001".into(),
            student_name: "Ahmad Dahlan".into(),
            category: "SPP - Maret".into(),
            amount: 150_000,
            kind: TransactionKind::In,
            notes: None,
            pic: "kasir".into(),
        };

        let json = serde_json::to_value(&trx).unwrap();
        assert_eq!(json["studentId"], "2024001");
        assert_eq!(json["studentName"], "Ahmad Dahlan");
        assert_eq!(json["type"], "IN");
    }

    #[test]
    fn test_historical_payload_round_trip() {
        // A record exactly as the previous system stored it
        let raw = r#"{
            "id": "TRX-1700000000001",
            "date": "2024-01-10T09:00:00.000Z",
            "studentId": "2024002",
            "studentName": "Siti Aminah",
            "category": "SPP - Januari",
            "amount": 150000,
            "type": "IN",
            "pic": "Admin"
        }"#;

        let trx: Transaction = serde_json::from_str(raw).unwrap();
        assert_eq!(trx.kind, TransactionKind::In);
        assert_eq!(trx.notes, None);
        assert_eq!(trx.pic, "Admin");
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "admin");
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "user");
    }

    #[test]
    fn test_months_are_calendar_ordered() {
        assert_eq!(MONTHS.len(), 12);
        assert_eq!(MONTHS[0], "Januari");
        assert_eq!(MONTHS[2], "Maret");
        assert_eq!(MONTHS[11], "Desember");
    }

    #[test]
    fn test_seed_users_are_hashed() {
        let users = seed_users().unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "admin");
        assert_eq!(users[0].role, Role::Admin);
        assert!(users[0].password_hash.starts_with("$argon2"));
        assert_ne!(users[1].password_hash, "kasir");
    }
}
