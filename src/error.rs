use thiserror::Error;

#[derive(Error, Debug)]
pub enum PennyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ledger file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV file is empty or contains only a header")]
    EmptyFile,

    #[error("CSV must contain headers: date, description (or transaction description), category, amount, type. Missing: {0}")]
    MissingColumns(String),

    #[error("No valid transactions found in the file. Please check the data format")]
    NoValidRows,

    #[error("Invalid month (expected YYYY-MM or 'all'): {0}")]
    InvalidMonth(String),

    #[error("A budget for category '{0}' already exists")]
    DuplicateBudget(String),

    #[error("No budget for category: {0}")]
    UnknownBudget(String),

    #[error("Unknown transaction id: {0}")]
    UnknownTransaction(String),

    #[error("Unknown goal: {0}")]
    UnknownGoal(String),

    #[error("Unknown debt id: {0}")]
    UnknownDebt(String),

    #[error("Categorization failed: {0}")]
    Categorizer(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PennyError>;
