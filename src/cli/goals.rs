use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::{PennyError, Result};
use crate::fmt::money;
use crate::models::Goal;
use crate::parser::parse_date;
use crate::settings::ledger_path;
use crate::store::Ledger;

pub fn add(name: &str, target: f64, deadline: &str) -> Result<()> {
    let parsed = parse_date(deadline)
        .ok_or_else(|| PennyError::Other(format!("invalid deadline: '{deadline}'")))?;

    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;
    if ledger.goals.iter().any(|g| g.name == name) {
        return Err(PennyError::Other(format!("a goal named '{name}' already exists")));
    }
    ledger.goals.push(Goal {
        id: format!(
            "goal-{}",
            chrono::Local::now().naive_local().and_utc().timestamp_millis()
        ),
        name: name.to_string(),
        target_amount: target.abs(),
        saved_amount: 0.0,
        deadline: parsed.format("%Y-%m-%d").to_string(),
    });
    ledger.save(&ledger_file)?;
    println!("Goal '{name}' added: target {}", money(target.abs()));
    Ok(())
}

pub fn list() -> Result<()> {
    let ledger = Ledger::load(&ledger_path())?;
    if ledger.goals.is_empty() {
        println!("No goals set.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Name", "Saved", "Target", "Progress", "Deadline"]);
    for g in &ledger.goals {
        let pct = if g.target_amount > 0.0 {
            g.saved_amount / g.target_amount * 100.0
        } else {
            0.0
        };
        let progress = if pct >= 100.0 {
            Cell::new(format!("{pct:.0}%").green().bold())
        } else {
            Cell::new(format!("{pct:.0}%"))
        };
        table.add_row(vec![
            Cell::new(&g.name),
            Cell::new(money(g.saved_amount)),
            Cell::new(money(g.target_amount)),
            progress,
            Cell::new(&g.deadline),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn contribute(name: &str, amount: f64) -> Result<()> {
    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;
    let when = chrono::Local::now().naive_local();
    let txn = ledger.contribute_to_goal(name, amount.abs(), when)?;
    ledger.save(&ledger_file)?;
    println!(
        "Contributed {} to '{name}' (transaction {})",
        money(amount.abs()),
        txn.id
    );
    Ok(())
}
