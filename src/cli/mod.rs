pub mod budgets;
pub mod categorize;
pub mod debts;
pub mod demo;
pub mod goals;
pub mod import;
pub mod init;
pub mod networth;
pub mod report;
pub mod status;
pub mod transactions;

use clap::{Parser, Subcommand};

use crate::error::{PennyError, Result};
use crate::filter::DrillDown;
use crate::models::TxnKind;

pub(crate) fn parse_kind(raw: &str) -> Result<TxnKind> {
    TxnKind::parse(raw)
        .ok_or_else(|| PennyError::Other(format!("type must be 'income' or 'expense', got '{raw}'")))
}

/// Drill-down argument from the command line: `category=Food` or `type=income`.
pub(crate) fn parse_drill(raw: &str) -> Result<DrillDown> {
    match raw.split_once('=') {
        Some(("category", value)) if !value.trim().is_empty() => {
            Ok(DrillDown::Category(value.trim().to_string()))
        }
        Some(("type", value)) => Ok(DrillDown::Kind(parse_kind(value)?)),
        _ => Err(PennyError::Other(format!(
            "drill filter must be 'category=<name>' or 'type=<income|expense>', got '{raw}'"
        ))),
    }
}

/// Ask a yes/no question on stdin. Defaults to no.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    use std::io::Write;
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[derive(Parser)]
#[command(name = "penny", about = "Personal finance ledger: CSV import, budgets, debts, net worth and spending trends.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up Penny: choose a data directory for the ledger file.
    Init {
        /// Path for Penny data (default: ~/.local/share/penny)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Import a transaction CSV, reviewing malformed rows before accepting.
    Import {
        /// Path to the CSV file
        file: String,
        /// Accept the valid rows without prompting
        #[arg(long)]
        yes: bool,
    },
    /// Add a transaction by hand.
    Add {
        description: String,
        amount: f64,
        /// income or expense
        #[arg(long = "type")]
        kind: String,
        /// Defaults to Uncategorized
        #[arg(long)]
        category: Option<String>,
        /// YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Edit any field of a transaction except its id.
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a transaction by id.
    Delete { id: String },
    /// List transactions with optional filters.
    List {
        /// YYYY-MM or 'all'
        #[arg(long)]
        month: Option<String>,
        /// May be repeated; empty means all categories
        #[arg(long)]
        category: Vec<String>,
        /// income or expense
        #[arg(long = "type")]
        kind: Option<String>,
        /// Ad hoc drill-down: 'category=<name>' or 'type=<income|expense>'
        #[arg(long)]
        drill: Option<String>,
    },
    /// Show the financial summary (totals, categories, months, net worth).
    Summary {
        /// YYYY-MM or 'all' (default)
        #[arg(long)]
        month: Option<String>,
    },
    /// Spending trends for one month vs. history.
    Trends {
        /// YYYY-MM
        #[arg(long)]
        month: String,
    },
    /// Manage category budgets.
    Budget {
        #[command(subcommand)]
        command: BudgetCommands,
    },
    /// Track money owed and receivable.
    Debt {
        #[command(subcommand)]
        command: DebtCommands,
    },
    /// Track assets for net worth.
    Asset {
        #[command(subcommand)]
        command: AssetCommands,
    },
    /// Track liabilities for net worth.
    Liability {
        #[command(subcommand)]
        command: LiabilityCommands,
    },
    /// Savings goals and contributions.
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Suggest categories for uncategorized expenses.
    Categorize,
    /// Load sample data to explore Penny.
    Demo,
    /// Show ledger location and record counts.
    Status,
}

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set a budget for a category (one budget per category).
    Set { category: String, amount: f64 },
    /// Change an existing budget's target.
    Update { category: String, amount: f64 },
    /// Remove a category's budget.
    Remove { category: String },
    /// List budget targets.
    List,
    /// Spent vs. budget per category with under/near/over classification.
    Status {
        /// YYYY-MM or 'all' (default)
        #[arg(long)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DebtCommands {
    /// Record a debt.
    Add {
        description: String,
        amount: f64,
        /// owed (I owe) or iou (owed to me)
        #[arg(long = "type")]
        kind: String,
        /// YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    List,
    /// Mark a debt settled; settled debts drop out of the summary.
    Settle { id: String },
}

#[derive(Subcommand)]
pub enum AssetCommands {
    Add {
        name: String,
        value: f64,
        /// cash, investment, property or other
        #[arg(long = "type", default_value = "other")]
        kind: String,
    },
    List,
}

#[derive(Subcommand)]
pub enum LiabilityCommands {
    Add {
        name: String,
        value: f64,
        /// loan, credit-card, mortgage or other
        #[arg(long = "type", default_value = "other")]
        kind: String,
    },
    List,
}

#[derive(Subcommand)]
pub enum GoalCommands {
    Add {
        name: String,
        target: f64,
        /// YYYY-MM-DD
        #[arg(long)]
        deadline: String,
    },
    List,
    /// Put money toward a goal (records a Savings Goal transaction).
    Contribute { name: String, amount: f64 },
}
