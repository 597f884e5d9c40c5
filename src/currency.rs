//! Rupiah formatting
//!
//! Amounts are whole Rupiah; the id-ID convention groups thousands with
//! dots and writes no decimal part.

/// Format an amount as `Rp 150.000`.
///
/// Negative amounts carry a leading minus, `-Rp 50.000`. A plain ASCII
/// space separates the symbol from the digits.
pub fn format_rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}
