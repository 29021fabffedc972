use comfy_table::Table;

use crate::error::{PennyError, Result};
use crate::fmt::money;
use crate::models::{Asset, AssetKind, Liability, LiabilityKind};
use crate::settings::ledger_path;
use crate::store::Ledger;

fn millis_now() -> i64 {
    chrono::Local::now().naive_local().and_utc().timestamp_millis()
}

pub fn add_asset(name: &str, value: f64, kind: &str) -> Result<()> {
    let kind = AssetKind::parse(kind).ok_or_else(|| {
        PennyError::Other(format!(
            "asset type must be cash, investment, property or other, got '{kind}'"
        ))
    })?;
    let asset = Asset {
        id: format!("asset-{}", millis_now()),
        name: name.to_string(),
        kind,
        value: value.abs(),
    };

    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;
    ledger.assets.push(asset);
    ledger.save(&ledger_file)?;
    println!("Added asset '{name}' ({})", money(value.abs()));
    Ok(())
}

pub fn list_assets() -> Result<()> {
    let ledger = Ledger::load(&ledger_path())?;
    if ledger.assets.is_empty() {
        println!("No assets recorded.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Name", "Type", "Value"]);
    let mut total = 0.0f64;
    for a in &ledger.assets {
        total += a.value;
        table.add_row(vec![a.name.clone(), format!("{:?}", a.kind), money(a.value)]);
    }
    println!("{table}");
    println!("Total assets: {}", money(total));
    Ok(())
}

pub fn add_liability(name: &str, value: f64, kind: &str) -> Result<()> {
    let kind = LiabilityKind::parse(kind).ok_or_else(|| {
        PennyError::Other(format!(
            "liability type must be loan, credit-card, mortgage or other, got '{kind}'"
        ))
    })?;
    let liability = Liability {
        id: format!("liability-{}", millis_now()),
        name: name.to_string(),
        kind,
        value: value.abs(),
    };

    let ledger_file = ledger_path();
    let mut ledger = Ledger::load(&ledger_file)?;
    ledger.liabilities.push(liability);
    ledger.save(&ledger_file)?;
    println!("Added liability '{name}' ({})", money(value.abs()));
    Ok(())
}

pub fn list_liabilities() -> Result<()> {
    let ledger = Ledger::load(&ledger_path())?;
    if ledger.liabilities.is_empty() {
        println!("No liabilities recorded.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Name", "Type", "Value"]);
    let mut total = 0.0f64;
    for l in &ledger.liabilities {
        total += l.value;
        table.add_row(vec![l.name.clone(), format!("{:?}", l.kind), money(l.value)]);
    }
    println!("{table}");
    println!("Total liabilities: {}", money(total));
    Ok(())
}
