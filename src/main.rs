mod budget;
mod categorizer;
mod cli;
mod error;
mod filter;
mod fmt;
mod ingest;
mod models;
mod parser;
mod settings;
mod store;
mod summary;
mod trends;

use clap::Parser;

use cli::{
    AssetCommands, BudgetCommands, Cli, Commands, DebtCommands, GoalCommands, LiabilityCommands,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Import { file, yes } => cli::import::run(&file, yes),
        Commands::Add {
            description,
            amount,
            kind,
            category,
            date,
        } => cli::transactions::add(&description, amount, &kind, category.as_deref(), date.as_deref()),
        Commands::Edit {
            id,
            description,
            amount,
            category,
            kind,
            date,
        } => cli::transactions::edit(
            &id,
            description.as_deref(),
            amount,
            category.as_deref(),
            kind.as_deref(),
            date.as_deref(),
        ),
        Commands::Delete { id } => cli::transactions::delete(&id),
        Commands::List {
            month,
            category,
            kind,
            drill,
        } => cli::transactions::list(month.as_deref(), &category, kind.as_deref(), drill.as_deref()),
        Commands::Summary { month } => cli::report::summary(month.as_deref()),
        Commands::Trends { month } => cli::report::trends(&month),
        Commands::Budget { command } => match command {
            BudgetCommands::Set { category, amount } => cli::budgets::set(&category, amount),
            BudgetCommands::Update { category, amount } => cli::budgets::update(&category, amount),
            BudgetCommands::Remove { category } => cli::budgets::remove(&category),
            BudgetCommands::List => cli::budgets::list(),
            BudgetCommands::Status { month } => cli::budgets::status(month.as_deref()),
        },
        Commands::Debt { command } => match command {
            DebtCommands::Add {
                description,
                amount,
                kind,
                due,
            } => cli::debts::add(&description, amount, &kind, due),
            DebtCommands::List => cli::debts::list(),
            DebtCommands::Settle { id } => cli::debts::settle(&id),
        },
        Commands::Asset { command } => match command {
            AssetCommands::Add { name, value, kind } => cli::networth::add_asset(&name, value, &kind),
            AssetCommands::List => cli::networth::list_assets(),
        },
        Commands::Liability { command } => match command {
            LiabilityCommands::Add { name, value, kind } => {
                cli::networth::add_liability(&name, value, &kind)
            }
            LiabilityCommands::List => cli::networth::list_liabilities(),
        },
        Commands::Goal { command } => match command {
            GoalCommands::Add {
                name,
                target,
                deadline,
            } => cli::goals::add(&name, target, &deadline),
            GoalCommands::List => cli::goals::list(),
            GoalCommands::Contribute { name, amount } => cli::goals::contribute(&name, amount),
        },
        Commands::Categorize => cli::categorize::run(),
        Commands::Demo => cli::demo::run(),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
