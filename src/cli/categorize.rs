use crate::categorizer::{apply_suggestions, pending_review, Categorizer, RuleCategorizer};
use crate::error::Result;
use crate::settings::ledger_path;
use crate::store::Ledger;

/// Run the keyword categorizer over every uncategorized expense in the ledger.
pub fn run() -> Result<()> {
    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;

    let mut snapshot = ledger.transactions_by_date();
    let pending = pending_review(&snapshot);
    if pending.is_empty() {
        println!("Nothing to categorize.");
        return Ok(());
    }

    let allowed = ledger.expense_categories();
    let suggestions = RuleCategorizer::new().suggest(&pending, &allowed)?;
    let applied = apply_suggestions(&mut snapshot, &suggestions, &allowed);

    for txn in snapshot {
        if txn.confidence.is_some() {
            ledger.update_transaction(txn)?;
        }
    }
    ledger.save(&ledger_file)?;

    println!(
        "{} of {} uncategorized expense(s) categorized.",
        applied,
        pending.len()
    );
    Ok(())
}
