use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{RowReason, Transaction, TxnKind, UNCATEGORIZED};

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// Accepts `YYYY-MM-DD`, ISO timestamps (`YYYY-MM-DDTHH:MM:SS[.fff][Z]`) and
/// `MM/DD/YYYY`. Calendar validity is enforced: month 13 or day 40 fail.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let iso = raw.strip_suffix('Z').unwrap_or(raw);
    if let Ok(dt) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() == 3 {
        let m: u32 = parts[0].trim().parse().ok()?;
        let d: u32 = parts[1].trim().parse().ok()?;
        let y: i32 = parts[2].trim().parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0);
    }
    None
}

/// Plain decimal number; the sign is parsed but callers discard it.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Resolved indices of the five logical columns within a CSV record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: usize,
    pub description: usize,
    pub category: usize,
    pub amount: usize,
    pub kind: usize,
}

/// Turn one naive comma-split record into a transaction, or reject it with a
/// single reason. Rules are checked in a fixed order so the first failing rule
/// wins: date, amount, type, description.
///
/// A field containing a literal comma misaligns the columns; that is the value
/// format's accepted limitation (no quoted-field escaping), and the rejection
/// reasons are defined against this simple split.
pub fn parse_row(fields: &[String], columns: &ColumnMap, id: String) -> Result<Transaction, RowReason> {
    let field = |i: usize| fields.get(i).map(String::as_str).unwrap_or("");

    let date = parse_date(field(columns.date)).ok_or(RowReason::InvalidDate)?;
    let amount = parse_amount(field(columns.amount)).ok_or(RowReason::InvalidAmount)?;
    let kind = TxnKind::parse(field(columns.kind)).ok_or(RowReason::InvalidType)?;
    let description = field(columns.description).trim();
    if description.is_empty() {
        return Err(RowReason::MissingDescription);
    }
    let category = field(columns.category).trim();
    let category = if category.is_empty() { UNCATEGORIZED } else { category };

    Ok(Transaction {
        id,
        date,
        description: description.to_string(),
        category: category.to_string(),
        // Sign is discarded; `kind` alone conveys direction.
        amount: amount.abs(),
        kind,
        confidence: None,
    })
}
