use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::filter::{MonthSelection, TransactionFilter};
use crate::fmt::{money, month_display, percent};
use crate::settings::ledger_path;
use crate::store::Ledger;
use crate::summary::summarize;
use crate::trends::{analyze, TopCategory};

fn month_selection(month: Option<&str>) -> Result<MonthSelection> {
    match month {
        Some(raw) => MonthSelection::parse(raw),
        None => Ok(MonthSelection::All),
    }
}

pub fn summary(month: Option<&str>) -> Result<()> {
    let selection = month_selection(month)?;
    let ledger = Ledger::load(&ledger_path())?;
    let all = ledger.transactions_by_date();
    let filter = TransactionFilter {
        month: selection.clone(),
        ..Default::default()
    };
    let scoped: Vec<_> = filter.apply(&all).into_iter().cloned().collect();
    let s = summarize(&scoped, &ledger.debts, &ledger.assets, &ledger.liabilities);

    let scope = match &selection {
        MonthSelection::All => "all time".to_string(),
        MonthSelection::Month(key) => month_display(key),
    };
    println!("Financial summary ({scope})\n");

    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![Cell::new("Income".green()), Cell::new(money(s.total_income))]);
    table.add_row(vec![Cell::new("Expenses".red()), Cell::new(money(s.total_expenses))]);
    let savings_label = if s.net_savings >= 0.0 {
        "Net savings".green().bold()
    } else {
        "Net deficit".red().bold()
    };
    table.add_row(vec![Cell::new(savings_label), Cell::new(money(s.net_savings))]);
    table.add_row(vec![Cell::new("Debt owed"), Cell::new(money(s.total_debt))]);
    table.add_row(vec![Cell::new("Receivables"), Cell::new(money(s.total_receivables))]);
    table.add_row(vec![Cell::new("Net worth".bold()), Cell::new(money(s.net_worth))]);
    println!("{table}");

    if !s.expenses_by_category.is_empty() {
        let mut cats = Table::new();
        cats.set_header(vec!["Category", "Spent"]);
        for c in &s.expenses_by_category {
            cats.add_row(vec![c.category.clone(), money(c.amount)]);
        }
        println!("\nExpenses by category\n{cats}");
    }

    if !s.monthly_data.is_empty() {
        let mut months = Table::new();
        months.set_header(vec!["Month", "Income", "Expenses"]);
        for m in &s.monthly_data {
            months.add_row(vec![
                month_display(&m.month),
                money(m.income),
                money(m.expenses),
            ]);
        }
        println!("\nMonthly breakdown\n{months}");
    }
    Ok(())
}

pub fn trends(month: &str) -> Result<()> {
    let selection = MonthSelection::parse(month)?;
    let ledger = Ledger::load(&ledger_path())?;
    let all = ledger.transactions_by_date();
    let filter = TransactionFilter {
        month: selection.clone(),
        ..Default::default()
    };
    let period: Vec<_> = filter.apply(&all).into_iter().cloned().collect();

    let report = match (&selection, analyze(&selection, &period, &all)) {
        (MonthSelection::Month(_), Some(report)) => report,
        _ => {
            println!("Not enough data to compute trends for '{month}'.");
            return Ok(());
        }
    };
    println!("Spending trends for {}\n", month_display(month.trim()));
    println!("  vs previous month: {}", percent(report.vs_prev_month).bold());
    println!("  vs monthly average: {}", percent(report.vs_average).bold());

    match report.top_growing {
        TopCategory::None => println!("  top growing category: N/A"),
        TopCategory::Growth { category, pct } => {
            println!("  top growing category: {category} ({})", percent(pct))
        }
        TopCategory::New { category } => {
            println!("  top growing category: {category} ({})", "new".yellow())
        }
    }
    match report.largest_spending_day {
        Some((day, total)) => println!("  largest spending day: {day} ({})", money(total)),
        None => println!("  largest spending day: N/A"),
    }
    Ok(())
}
