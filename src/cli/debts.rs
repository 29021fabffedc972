use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{PennyError, Result};
use crate::fmt::money;
use crate::models::{Debt, DebtKind};
use crate::parser::parse_date;
use crate::settings::ledger_path;
use crate::store::Ledger;

fn parse_debt_kind(raw: &str) -> Result<DebtKind> {
    DebtKind::parse(raw)
        .ok_or_else(|| PennyError::Other(format!("type must be 'owed' or 'iou', got '{raw}'")))
}

pub fn add(description: &str, amount: f64, kind: &str, due: Option<String>) -> Result<()> {
    let kind = parse_debt_kind(kind)?;
    let due_date = match due {
        Some(raw) => {
            let parsed = parse_date(&raw)
                .ok_or_else(|| PennyError::Other(format!("invalid due date: '{raw}'")))?;
            Some(parsed.format("%Y-%m-%d").to_string())
        }
        None => None,
    };

    let debt = Debt {
        id: format!("debt-{}", chrono::Local::now().naive_local().and_utc().timestamp_millis()),
        description: description.to_string(),
        amount: amount.abs(),
        kind,
        due_date,
        is_settled: false,
    };

    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;
    let id = debt.id.clone();
    ledger.debts.push(debt);
    ledger.save(&ledger_file)?;
    println!("Recorded debt {id}");
    Ok(())
}

pub fn list() -> Result<()> {
    let ledger = Ledger::load(&ledger_path())?;
    if ledger.debts.is_empty() {
        println!("No debts recorded.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Id", "Description", "Amount", "Direction", "Due", "Status"]);
    for d in &ledger.debts {
        let direction = match d.kind {
            DebtKind::Owed => Cell::new("I owe".red()),
            DebtKind::Iou => Cell::new("owed to me".green()),
        };
        let status = if d.is_settled {
            Cell::new("settled".dimmed())
        } else {
            Cell::new("open")
        };
        table.add_row(vec![
            Cell::new(&d.id),
            Cell::new(&d.description),
            Cell::new(money(d.amount)),
            direction,
            Cell::new(d.due_date.as_deref().unwrap_or("-")),
            status,
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn settle(id: &str) -> Result<()> {
    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;
    ledger.settle_debt(id)?;
    ledger.save(&ledger_file)?;
    println!("Debt {id} settled.");
    Ok(())
}
