use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Category assigned when a CSV row leaves the category cell blank, and the
/// pool the categorizer draws from for review.
pub const UNCATEGORIZED: &str = "Uncategorized";
/// Category stamped on transactions synthesized by goal contributions.
pub const SAVINGS_GOAL_CATEGORY: &str = "Savings Goal";
/// Reserved label for generated income entries; excluded from expense category pickers.
pub const INCOME_CATEGORY: &str = "Income";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Income,
    Expense,
}

impl TxnKind {
    /// Case-insensitive, trimmed. Anything other than `income`/`expense` is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// A single dated money movement. Amount is always non-negative; direction is
/// carried by `kind` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDateTime,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub kind: TxnKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl Transaction {
    /// Canonical `YYYY-MM` grouping key. Lexicographic order == chronological order.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Calendar-day key, `YYYY-MM-DD`.
    pub fn day_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Why a CSV row was rejected. Exactly one reason per row; earlier rules win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowReason {
    InvalidDate,
    InvalidAmount,
    InvalidType,
    MissingDescription,
}

impl RowReason {
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidDate => "Invalid date",
            Self::InvalidAmount => "Invalid amount",
            Self::InvalidType => "Invalid type",
            Self::MissingDescription => "Missing description",
        }
    }
}

/// A rejected CSV line, kept with its raw fields for user review. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedRow {
    pub row: Vec<String>,
    pub reason: RowReason,
}

/// One budget per category; the category is the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebtKind {
    /// Money I owe someone else.
    Owed,
    /// Money someone else owes me.
    Iou,
}

impl DebtKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "owed" => Some(Self::Owed),
            "iou" => Some(Self::Iou),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub kind: DebtKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub is_settled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    Cash,
    Investment,
    Property,
    Other,
}

impl AssetKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "investment" => Some(Self::Investment),
            "property" => Some(Self::Property),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub kind: AssetKind,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiabilityKind {
    Loan,
    CreditCard,
    Mortgage,
    Other,
}

impl LiabilityKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "loan" => Some(Self::Loan),
            "credit-card" | "credit_card" | "creditcard" => Some(Self::CreditCard),
            "mortgage" => Some(Self::Mortgage),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liability {
    pub id: String,
    pub name: String,
    pub kind: LiabilityKind,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub saved_amount: f64,
    pub deadline: String,
}

/// Summed expenses for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Income and expenses for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
}

/// Derived view over a transaction snapshot plus debts, assets and liabilities.
/// Recomputed on demand; never mutated directly.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    /// `total_income - total_expenses`; negative means a net deficit.
    pub net_savings: f64,
    pub total_debt: f64,
    pub total_receivables: f64,
    pub net_worth: f64,
    /// Descending by amount, ties broken by category name ascending.
    pub expenses_by_category: Vec<CategoryTotal>,
    /// Ascending by month key.
    pub monthly_data: Vec<MonthTotal>,
}
