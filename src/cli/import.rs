use std::path::Path;

use colored::Colorize;
use comfy_table::Table;

use crate::categorizer::{apply_suggestions, pending_review, Categorizer, RuleCategorizer};
use crate::error::Result;
use crate::ingest::ingest;
use crate::models::MalformedRow;
use crate::settings::ledger_path;
use crate::store::{file_checksum, Ledger};

fn print_malformed(rows: &[MalformedRow]) {
    let mut table = Table::new();
    table.set_header(vec!["Row data", "Reason"]);
    for row in rows {
        table.add_row(vec![row.row.join(", "), row.reason.message().to_string()]);
    }
    println!("{}", "Some rows could not be read:".yellow().bold());
    println!("{table}");
}

pub fn run(file: &str, yes: bool) -> Result<()> {
    let path = Path::new(file);
    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;

    let checksum = file_checksum(path)?;
    if ledger.has_import(&checksum) {
        println!("This file has already been imported (duplicate checksum).");
        return Ok(());
    }

    let content = std::fs::read_to_string(path)?;
    let mut report = ingest(&content)?;

    if !report.malformed.is_empty() {
        print_malformed(&report.malformed);
        let question = format!(
            "Import the {} valid row(s) and skip the {} malformed one(s)?",
            report.valid.len(),
            report.malformed.len()
        );
        if !yes && !super::confirm(&question)? {
            println!("Import cancelled. Fix the source file and try again.");
            return Ok(());
        }
    }

    // Best-effort category suggestions for rows the file left blank. A
    // categorizer failure leaves them Uncategorized; it never fails the import.
    let pending = pending_review(&report.valid);
    let mut suggested = 0usize;
    if !pending.is_empty() {
        let allowed = ledger.expense_categories();
        match RuleCategorizer::new().suggest(&pending, &allowed) {
            Ok(suggestions) => {
                suggested = apply_suggestions(&mut report.valid, &suggestions, &allowed);
            }
            Err(e) => println!("{} {e}", "Categorization skipped:".yellow()),
        }
    }

    ledger.absorb_categories(&report.valid);
    let imported = report.valid.len();
    for txn in report.valid {
        ledger.add_transaction(txn);
    }
    ledger.record_import(checksum);
    ledger.save(&ledger_file)?;

    println!(
        "{} imported, {} skipped, {} auto-categorized",
        imported,
        report.malformed.len(),
        suggested
    );
    Ok(())
}
