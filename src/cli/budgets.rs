use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::budget::{evaluate, BudgetLevel};
use crate::error::Result;
use crate::filter::{MonthSelection, TransactionFilter};
use crate::fmt::money;
use crate::settings::ledger_path;
use crate::store::Ledger;

pub fn set(category: &str, amount: f64) -> Result<()> {
    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;
    ledger.set_budget(category, amount)?;
    ledger.save(&ledger_file)?;
    println!("Budget set: {category} at {}", money(amount));
    Ok(())
}

pub fn update(category: &str, amount: f64) -> Result<()> {
    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;
    ledger.update_budget(category, amount)?;
    ledger.save(&ledger_file)?;
    println!("Budget updated: {category} at {}", money(amount));
    Ok(())
}

pub fn remove(category: &str) -> Result<()> {
    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;
    ledger.remove_budget(category)?;
    ledger.save(&ledger_file)?;
    println!("Budget removed: {category}");
    Ok(())
}

pub fn list() -> Result<()> {
    let ledger = Ledger::load(&ledger_path())?;
    if ledger.budgets.is_empty() {
        println!("No budgets set.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Category", "Target"]);
    for b in &ledger.budgets {
        table.add_row(vec![b.category.clone(), money(b.amount)]);
    }
    println!("{table}");
    Ok(())
}

pub fn status(month: Option<&str>) -> Result<()> {
    let selection = match month {
        Some(raw) => MonthSelection::parse(raw)?,
        None => MonthSelection::All,
    };
    let ledger = Ledger::load(&ledger_path())?;
    let all = ledger.transactions_by_date();
    let filter = TransactionFilter {
        month: selection,
        ..Default::default()
    };
    let scoped: Vec<_> = filter.apply(&all).into_iter().cloned().collect();

    let statuses = evaluate(&scoped, &ledger.budgets);
    if statuses.is_empty() {
        println!("No budgets set.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Spent", "Target", "Used", "Status"]);
    for s in &statuses {
        let status = match s.level {
            BudgetLevel::Under => Cell::new("under".green()),
            BudgetLevel::Near => Cell::new("near".yellow()),
            BudgetLevel::Over => Cell::new("over".red().bold()),
        };
        table.add_row(vec![
            Cell::new(&s.category),
            Cell::new(money(s.spent)),
            Cell::new(money(s.budgeted)),
            Cell::new(format!("{:.1}%", s.percentage)),
            status,
        ]);
    }
    println!("{table}");
    Ok(())
}
