use colored::Colorize;

use crate::error::Result;
use crate::filter::available_months;
use crate::settings::ledger_path;
use crate::store::Ledger;

pub fn run() -> Result<()> {
    let ledger_file = ledger_path();
    let ledger = Ledger::load(&ledger_file)?;

    println!("{}", "Penny status".bold());
    println!("  ledger: {}", ledger_file.display());
    if !ledger_file.exists() {
        println!("  {}", "ledger file not found; run 'penny init' first".yellow());
    }
    println!("  transactions: {}", ledger.transaction_count());
    let months = available_months(&ledger.transactions_by_date());
    if let Some(latest) = months.first() {
        println!("  months on record: {} (latest {latest})", months.len());
    }
    println!("  categories: {}", ledger.categories.len());
    println!("  budgets: {}", ledger.budgets.len());
    println!(
        "  debts: {} ({} open)",
        ledger.debts.len(),
        ledger.debts.iter().filter(|d| !d.is_settled).count()
    );
    println!("  assets: {}", ledger.assets.len());
    println!("  liabilities: {}", ledger.liabilities.len());
    println!("  goals: {}", ledger.goals.len());
    Ok(())
}
