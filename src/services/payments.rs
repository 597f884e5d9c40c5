//! Payment recording service
//!
//! The cashier flow: record SPP or catalog-fee payments as immutable
//! transactions, then hand back the receipt and WhatsApp confirmation
//! for the payer.

use crate::config;
use crate::currency::format_rupiah;
use crate::error::{AppError, Result};
use crate::store::models::{FeeType, Student, Transaction, TransactionKind, MONTHS};
use crate::store::RecordStore;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Data for one printable payment receipt
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub header: String,
    pub school_name: String,
    pub school_address: String,
    pub transaction_id: String,
    pub date: String,
    pub student_name: String,
    pub category: String,
    pub amount: i64,
    pub pic: String,
}

/// Service for recording payments
#[derive(Clone)]
pub struct PaymentService {
    store: RecordStore,
}

impl PaymentService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// The catalog of non-SPP fees
    pub async fn fee_types(&self) -> Result<Vec<FeeType>> {
        self.store.fee_types().await
    }

    /// Record a monthly SPP payment.
    ///
    /// The category is written as `SPP - <month>`, which is what the
    /// status derivation matches on later. `amount` falls back to the
    /// student's monthly SPP when omitted.
    pub async fn record_spp(
        &self,
        nis: &str,
        month: &str,
        amount: Option<i64>,
        pic: &str,
    ) -> Result<Transaction> {
        if !MONTHS.contains(&month) {
            return Err(AppError::InvalidInput(format!("Unknown month: {}", month)));
        }

        let student = self.get_student(nis).await?;
        let amount = amount.unwrap_or(student.spp_amount);

        self.record(&student, format!("SPP - {}", month), amount, pic)
            .await
    }

    /// Record a one-time catalog fee payment, matched by fee name.
    /// `amount` falls back to the catalog amount when omitted.
    pub async fn record_fee(
        &self,
        nis: &str,
        fee_name: &str,
        amount: Option<i64>,
        pic: &str,
    ) -> Result<Transaction> {
        let fees = self.store.fee_types().await?;
        let fee = fees
            .into_iter()
            .find(|f| f.name == fee_name)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown fee type: {}", fee_name)))?;

        let student = self.get_student(nis).await?;
        let amount = amount.unwrap_or(fee.amount);

        self.record(&student, fee.name, amount, pic).await
    }

    async fn get_student(&self, nis: &str) -> Result<Student> {
        let students = self.store.students().await?;

        students
            .into_iter()
            .find(|s| s.id == nis)
            .ok_or_else(|| AppError::StudentNotFound(nis.to_string()))
    }

    async fn record(
        &self,
        student: &Student,
        category: String,
        amount: i64,
        pic: &str,
    ) -> Result<Transaction> {
        if amount <= 0 {
            return Err(AppError::InvalidInput(
                "Amount must be positive".to_string(),
            ));
        }

        let now = Utc::now();
        let trx = Transaction {
            id: format!("TRX-{}", now.timestamp_millis()),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            student_id: student.id.clone(),
            // Snapshot at payment time; later roster edits do not touch it
            student_name: student.name.clone(),
            category,
            amount,
            kind: TransactionKind::In,
            notes: None,
            pic: if pic.trim().is_empty() {
                "Admin".to_string()
            } else {
                pic.to_string()
            },
        };

        self.store.push_transaction(trx.clone()).await?;

        tracing::info!(
            "Recorded payment {} for student {}: {}",
            trx.id,
            trx.student_id,
            trx.category
        );

        Ok(trx)
    }

    /// Build the printable receipt for a recorded transaction
    pub async fn receipt(&self, trx: &Transaction) -> Result<Receipt> {
        let settings = self.store.settings().await?;

        Ok(Receipt {
            header: settings
                .receipt_header
                .unwrap_or_else(|| "Bukti Pembayaran".to_string()),
            school_name: settings.name,
            school_address: settings.address,
            transaction_id: trx.id.clone(),
            date: trx.date.clone(),
            student_name: trx.student_name.clone(),
            category: trx.category.clone(),
            amount: trx.amount,
            pic: trx.pic.clone(),
        })
    }

    /// Build the WhatsApp confirmation for a payment.
    /// Returns the message text and the wa.me link carrying it.
    pub async fn whatsapp_confirmation(
        &self,
        trx: &Transaction,
        student: &Student,
    ) -> Result<(String, String)> {
        let settings = self.store.settings().await?;
        let header = settings
            .receipt_header
            .unwrap_or_else(|| "Bukti Pembayaran".to_string());

        let message = format!(
            "*{}*\n{}\n\n\
             Terima Kasih.\n\
             Telah diterima pembayaran dari:\n\
             Nama: *{}*\n\
             Kelas: {}\n\
             Untuk: {}\n\
             Nominal: {}\n\n\
             Status: *LUNAS*\n\
             Ref: {}",
            header,
            settings.name,
            student.name,
            student.class_name,
            trx.category,
            format_rupiah(trx.amount),
            trx.id,
        );

        let link = whatsapp_link(&student.phone, &message);
        Ok((message, link))
    }
}

/// Build a wa.me link for a phone number and message.
/// The number keeps digits only; a leading local `0` becomes the
/// country prefix.
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    let number = match digits.strip_prefix('0') {
        Some(rest) => format!("{}{}", config::PHONE_COUNTRY_PREFIX, rest),
        None => digits,
    };

    format!("https://wa.me/{}?text={}", number, encode_uri_component(message))
}

/// Percent-encode a query value: alphanumerics and `-_.!~*'()` pass
/// through, everything else is UTF-8 percent-encoded byte by byte.
fn encode_uri_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }

    out
}
