//! Roster bulk import and export
//!
//! Import merges rows into the existing roster rather than replacing
//! it, so a re-import of an exported sheet never wipes photos or
//! fields the sheet does not carry.

use super::csv;
use crate::error::{AppError, Result};
use crate::store::models::Student;
use serde::Serialize;

/// Column headers of the roster export
pub const ROSTER_HEADER: [&str; 5] = ["NIS", "Nama Siswa", "Kelas", "No HP", "Tagihan SPP"];

/// Outcome of a roster import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// One usable row lifted out of the delimited text
struct RosterRow {
    id: String,
    name: String,
    class_name: Option<String>,
    phone: Option<String>,
    spp_amount: Option<i64>,
}

/// Render the roster as delimited text under the canonical header.
pub fn render_roster(students: &[Student]) -> String {
    let mut out = String::new();
    out.push_str(&csv::line(&ROSTER_HEADER));
    out.push('\n');

    for s in students {
        let spp = s.spp_amount.to_string();
        out.push_str(&csv::line(&[
            &s.id,
            &s.name,
            &s.class_name,
            &s.phone,
            &spp,
        ]));
        out.push('\n');
    }

    out
}

/// Merge delimited roster text into an existing roster.
///
/// The first line is a header; recognized column names are
/// case-insensitive with synonyms per field (`NIS`/`ID`,
/// `Nama Siswa`/`Nama`, `Kelas`, `No HP`/`HP`, `Tagihan SPP`/`SPP`).
/// Rows missing NIS or name are skipped and counted. A row matching an
/// existing NIS overwrites only the fields it carries non-empty values
/// for; blank cells and the photo stay untouched. Unknown NIS rows are
/// appended with empty class/phone and zero SPP. Text yielding no
/// usable row is an import error and nothing is merged.
pub fn merge_roster(text: &str, existing: &[Student]) -> Result<(Vec<Student>, ImportSummary)> {
    let mut lines = text.lines();

    let header_line = lines
        .next()
        .ok_or_else(|| AppError::Import("Empty roster file".to_string()))?;
    let header: Vec<String> = csv::parse_record(header_line)
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();

    let id_col = header_index(&header, &["nis", "id"]);
    let name_col = header_index(&header, &["nama siswa", "nama"]);
    let class_col = header_index(&header, &["kelas"]);
    let phone_col = header_index(&header, &["no hp", "hp"]);
    let spp_col = header_index(&header, &["tagihan spp", "spp"]);

    let (Some(id_col), Some(name_col)) = (id_col, name_col) else {
        return Err(AppError::Import(
            "No NIS/name columns recognized in the header".to_string(),
        ));
    };

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for raw in lines {
        if raw.trim().is_empty() {
            continue;
        }

        let fields = csv::parse_record(raw);

        let id = fields.get(id_col).and_then(|f| csv::non_empty_trimmed(f));
        let name = fields.get(name_col).and_then(|f| csv::non_empty_trimmed(f));
        let (Some(id), Some(name)) = (id, name) else {
            skipped += 1;
            continue;
        };

        rows.push(RosterRow {
            id,
            name,
            class_name: cell(&fields, class_col),
            phone: cell(&fields, phone_col),
            spp_amount: cell(&fields, spp_col).and_then(|v| v.parse::<i64>().ok()),
        });
    }

    if rows.is_empty() {
        return Err(AppError::Import("No usable rows found".to_string()));
    }

    let mut merged = existing.to_vec();

    for row in &rows {
        match merged.iter_mut().find(|s| s.id == row.id) {
            Some(slot) => {
                // Merge, never replace: a blank cell keeps the stored
                // value and the photo is not part of any import
                slot.name = row.name.clone();
                if let Some(class_name) = &row.class_name {
                    slot.class_name = class_name.clone();
                }
                if let Some(phone) = &row.phone {
                    slot.phone = phone.clone();
                }
                if let Some(spp) = row.spp_amount {
                    slot.spp_amount = spp;
                }
            }
            None => merged.push(Student {
                id: row.id.clone(),
                name: row.name.clone(),
                class_name: row.class_name.clone().unwrap_or_default(),
                phone: row.phone.clone().unwrap_or_default(),
                spp_amount: row.spp_amount.unwrap_or(0),
                photo_url: None,
            }),
        }
    }

    let summary = ImportSummary {
        imported: rows.len(),
        skipped,
    };

    Ok((merged, summary))
}

fn header_index(header: &[String], aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| header.iter().position(|h| h == alias))
}

fn cell(fields: &[String], col: Option<usize>) -> Option<String> {
    col.and_then(|c| fields.get(c))
        .and_then(|f| csv::non_empty_trimmed(f))
}
