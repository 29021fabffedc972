use csv::{ReaderBuilder, StringRecord};

use crate::error::{PennyError, Result};
use crate::models::{MalformedRow, Transaction};
use crate::parser::{parse_row, ColumnMap};

const DESCRIPTION_ALIAS: &str = "transaction description";

/// Outcome of ingesting one file: accepted transactions plus the rows that
/// failed validation, both in original row order. A non-empty `malformed` next
/// to a non-empty `valid` is a data-quality report for the caller to confirm,
/// not an error.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub valid: Vec<Transaction>,
    pub malformed: Vec<MalformedRow>,
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

/// Locate the five logical columns in the header row. Cells are trimmed and
/// lower-cased; column order in the file is irrelevant. `description` also
/// accepts the alias `transaction description`.
fn resolve_columns(header: &StringRecord) -> Result<ColumnMap> {
    let cells: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
    let find = |name: &str| cells.iter().position(|c| c == name);

    let date = find("date");
    let description = find("description").or_else(|| find(DESCRIPTION_ALIAS));
    let category = find("category");
    let amount = find("amount");
    let kind = find("type");

    if let (Some(date), Some(description), Some(category), Some(amount), Some(kind)) =
        (date, description, category, amount, kind)
    {
        return Ok(ColumnMap {
            date,
            description,
            category,
            amount,
            kind,
        });
    }

    let mut missing = Vec::new();
    if date.is_none() {
        missing.push("date");
    }
    if description.is_none() {
        missing.push("description");
    }
    if category.is_none() {
        missing.push("category");
    }
    if amount.is_none() {
        missing.push("amount");
    }
    if kind.is_none() {
        missing.push("type");
    }
    Err(PennyError::MissingColumns(missing.join(", ")))
}

// A record produced from a whitespace-only line: single field, nothing in it.
// Truly empty lines never reach us; the reader drops them. A line like `,,,`
// still counts as a data row.
fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(|f| f.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

/// Ingest raw CSV text. Fails outright when the file has no non-blank rows,
/// when header columns are missing, or when zero valid transactions result;
/// otherwise returns the partitioned report.
pub fn ingest(content: &str) -> Result<IngestReport> {
    ingest_batch(content, chrono::Utc::now().timestamp_millis())
}

/// Same as [`ingest`], with the id prefix supplied by the caller. Generated ids
/// are `{batch_id}-{row_index}`, unique within the batch.
pub fn ingest_batch(content: &str, batch_id: i64) -> Result<IngestReport> {
    // quoting(false) keeps the naive comma split the row format is defined
    // against: a quoted field with an embedded comma misaligns columns.
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(content.as_bytes());

    let mut records = rdr.records();
    let header = loop {
        match records.next() {
            Some(record) => {
                let record = record?;
                if is_blank(&record) {
                    continue;
                }
                break record;
            }
            None => return Err(PennyError::EmptyFile),
        }
    };

    let columns = resolve_columns(&header)?;

    let mut valid = Vec::new();
    let mut malformed = Vec::new();
    let mut index = 0usize;
    for record in records {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        match parse_row(&fields, &columns, format!("{batch_id}-{index}")) {
            Ok(txn) => valid.push(txn),
            Err(reason) => malformed.push(MalformedRow { row: fields, reason }),
        }
        index += 1;
    }

    if valid.is_empty() {
        return Err(PennyError::NoValidRows);
    }
    Ok(IngestReport { valid, malformed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RowReason;

    fn ingest_fixture(content: &str) -> Result<IngestReport> {
        ingest_batch(content, 1700000000000)
    }

    #[test]
    fn test_basic_ingest() {
        let report = ingest_fixture(
            "date,description,category,amount,type\n\
             2024-01-05,Coffee,Food,5,expense\n\
             2024-01-06,Salary,Income,2000,income\n",
        )
        .unwrap();
        assert_eq!(report.valid.len(), 2);
        assert!(report.malformed.is_empty());
        assert_eq!(report.valid[0].id, "1700000000000-0");
        assert_eq!(report.valid[1].id, "1700000000000-1");
    }

    #[test]
    fn test_header_columns_any_order_case_insensitive() {
        let report = ingest_fixture(
            "Type, Amount ,CATEGORY,Description,Date\n\
             expense,5,Food,Coffee,2024-01-05\n",
        )
        .unwrap();
        assert_eq!(report.valid[0].description, "Coffee");
        assert_eq!(report.valid[0].amount, 5.0);
    }

    #[test]
    fn test_description_alias_accepted() {
        let report = ingest_fixture(
            "Date,Transaction Description,Category,Amount,Type\n\
             2024-01-05,Coffee,Food,5,expense\n",
        )
        .unwrap();
        assert_eq!(report.valid[0].description, "Coffee");
    }

    #[test]
    fn test_missing_columns_named_exactly() {
        let err = ingest_fixture(
            "date,description,category,type\n\
             2024-01-05,Coffee,Food,expense\n",
        )
        .unwrap_err();
        match err {
            PennyError::MissingColumns(missing) => assert_eq!(missing, "amount"),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_missing_columns() {
        let err = ingest_fixture("description,category\nCoffee,Food\n").unwrap_err();
        match err {
            PennyError::MissingColumns(missing) => assert_eq!(missing, "date, amount, type"),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(ingest_fixture("").unwrap_err(), PennyError::EmptyFile));
        assert!(matches!(
            ingest_fixture("\n   \n\n").unwrap_err(),
            PennyError::EmptyFile
        ));
    }

    #[test]
    fn test_all_rows_malformed_is_fatal() {
        let err = ingest_fixture(
            "date,description,category,amount,type\n\
             nope,Coffee,Food,5,expense\n\
             2024-01-05,Coffee,Food,abc,expense\n",
        )
        .unwrap_err();
        assert!(matches!(err, PennyError::NoValidRows));
    }

    #[test]
    fn test_header_only_is_fatal() {
        let err = ingest_fixture("date,description,category,amount,type\n").unwrap_err();
        assert!(matches!(err, PennyError::NoValidRows));
    }

    #[test]
    fn test_partial_success_reports_each_reason() {
        let report = ingest_fixture(
            "date,description,category,amount,type\n\
             2024-13-40,Coffee,Food,5,expense\n\
             2024-01-05,Coffee,Food,abc,expense\n\
             2024-01-05,Coffee,Food,5,withdrawal\n\
             2024-01-05,,Food,5,expense\n\
             2024-01-05,Coffee,Food,5,expense\n",
        )
        .unwrap();
        assert_eq!(report.valid.len(), 1);
        let reasons: Vec<_> = report.malformed.iter().map(|m| m.reason).collect();
        assert_eq!(
            reasons,
            vec![
                RowReason::InvalidDate,
                RowReason::InvalidAmount,
                RowReason::InvalidType,
                RowReason::MissingDescription,
            ]
        );
    }

    #[test]
    fn test_every_non_blank_row_is_accounted_for() {
        let report = ingest_fixture(
            "date,description,category,amount,type\n\
             2024-01-05,Coffee,Food,5,expense\n\
             \n\
             bad-date,Lunch,Food,12,expense\n\
             \x20\x20\n\
             2024-01-07,Bus,Transport,2.50,expense\n",
        )
        .unwrap();
        // 3 non-blank data rows: 2 valid + 1 malformed.
        assert_eq!(report.valid.len() + report.malformed.len(), 3);
    }

    #[test]
    fn test_comma_only_line_counts_as_malformed() {
        let report = ingest_fixture(
            "date,description,category,amount,type\n\
             2024-01-05,Coffee,Food,5,expense\n\
             ,,,,\n",
        )
        .unwrap();
        assert_eq!(report.malformed.len(), 1);
        assert_eq!(report.malformed[0].reason, RowReason::InvalidDate);
    }

    #[test]
    fn test_malformed_rows_keep_raw_fields() {
        let report = ingest_fixture(
            "date,description,category,amount,type\n\
             2024-01-05,Coffee,Food,5,expense\n\
             nope,Lunch,Food,12,expense\n",
        )
        .unwrap();
        assert_eq!(
            report.malformed[0].row,
            vec!["nope", "Lunch", "Food", "12", "expense"]
        );
    }

    #[test]
    fn test_embedded_comma_misaligns_columns() {
        // "Dinner, drinks" splits into two cells; the amount cell lands on
        // "Food" and the row is rejected rather than silently repaired.
        let report = ingest_fixture(
            "date,description,category,amount,type\n\
             2024-01-05,Coffee,Food,5,expense\n\
             2024-01-06,\"Dinner, drinks\",Food,40,expense\n",
        )
        .unwrap();
        assert_eq!(report.valid.len(), 1);
        assert_eq!(report.malformed.len(), 1);
        assert_eq!(report.malformed[0].reason, RowReason::InvalidAmount);
    }

    #[test]
    fn test_leading_blank_lines_before_header() {
        let report = ingest_fixture(
            "\n\
             date,description,category,amount,type\n\
             2024-01-05,Coffee,Food,5,expense\n",
        )
        .unwrap();
        assert_eq!(report.valid.len(), 1);
    }
}
