use std::collections::BTreeSet;

use colored::Colorize;
use comfy_table::Table;

use crate::error::{PennyError, Result};
use crate::filter::{MonthSelection, TransactionFilter};
use crate::fmt::money;
use crate::models::{Transaction, TxnKind, UNCATEGORIZED};
use crate::parser::parse_date;
use crate::settings::ledger_path;
use crate::store::Ledger;

fn parse_date_arg(raw: &str) -> Result<chrono::NaiveDateTime> {
    parse_date(raw).ok_or_else(|| PennyError::Other(format!("invalid date: '{raw}'")))
}

pub fn add(
    description: &str,
    amount: f64,
    kind: &str,
    category: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let kind = super::parse_kind(kind)?;
    let now = chrono::Local::now().naive_local();
    let date = match date {
        Some(raw) => parse_date_arg(raw)?,
        None => now,
    };
    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(UNCATEGORIZED);

    let txn = Transaction {
        id: format!("manual-{}", now.and_utc().timestamp_millis()),
        date,
        description: description.to_string(),
        category: category.to_string(),
        amount: amount.abs(),
        kind,
        confidence: None,
    };

    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;
    ledger.absorb_categories(std::slice::from_ref(&txn));
    let id = txn.id.clone();
    ledger.add_transaction(txn);
    ledger.save(&ledger_file)?;
    println!("Added transaction {id}");
    Ok(())
}

pub fn edit(
    id: &str,
    description: Option<&str>,
    amount: Option<f64>,
    category: Option<&str>,
    kind: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;
    let mut txn = ledger
        .transaction(id)
        .cloned()
        .ok_or_else(|| PennyError::UnknownTransaction(id.to_string()))?;

    if let Some(d) = description {
        txn.description = d.to_string();
    }
    if let Some(a) = amount {
        txn.amount = a.abs();
    }
    if let Some(c) = category {
        txn.category = c.to_string();
        // Category came from the user, not the categorizer; drop the tag.
        txn.confidence = None;
    }
    if let Some(k) = kind {
        txn.kind = super::parse_kind(k)?;
    }
    if let Some(raw) = date {
        txn.date = parse_date_arg(raw)?;
    }

    ledger.update_transaction(txn)?;
    ledger.save(&ledger_file)?;
    println!("Updated transaction {id}");
    Ok(())
}

pub fn delete(id: &str) -> Result<()> {
    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;
    let removed = ledger.remove_transaction(id)?;
    ledger.save(&ledger_file)?;
    println!("Deleted '{}' ({})", removed.description, money(removed.amount));
    Ok(())
}

pub fn list(
    month: Option<&str>,
    categories: &[String],
    kind: Option<&str>,
    drill: Option<&str>,
) -> Result<()> {
    let filter = TransactionFilter {
        month: match month {
            Some(raw) => MonthSelection::parse(raw)?,
            None => MonthSelection::All,
        },
        categories: categories.iter().cloned().collect::<BTreeSet<_>>(),
        kind: kind.map(super::parse_kind).transpose()?,
        drill_down: drill.map(super::parse_drill).transpose()?,
    };

    let ledger = Ledger::load(&ledger_path())?;
    let all = ledger.transactions_by_date();
    let rows = filter.apply(&all);

    let mut table = Table::new();
    table.set_header(vec!["Id", "Date", "Description", "Category", "Type", "Amount"]);
    let mut total = 0.0f64;
    for t in &rows {
        let signed = match t.kind {
            TxnKind::Income => t.amount,
            TxnKind::Expense => -t.amount,
        };
        total += signed;
        table.add_row(vec![
            t.id.clone(),
            t.day_key(),
            t.description.clone(),
            t.category.clone(),
            t.kind.label().to_string(),
            money(signed),
        ]);
    }
    println!("{table}");
    println!("{} transactions, net {}", rows.len(), money(total).bold());
    Ok(())
}
