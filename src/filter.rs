use std::collections::BTreeSet;

use crate::error::{PennyError, Result};
use crate::models::{Transaction, TxnKind};

// ---------------------------------------------------------------------------
// Month selection
// ---------------------------------------------------------------------------

/// Either the "all time" sentinel or one concrete `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthSelection {
    All,
    Month(String),
}

impl MonthSelection {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        if let Some((y, m)) = raw.split_once('-') {
            let year_ok = y.len() == 4 && y.chars().all(|c| c.is_ascii_digit());
            let month_ok = m.len() == 2 && matches!(m.parse::<u32>(), Ok(1..=12));
            if year_ok && month_ok {
                return Ok(Self::Month(raw.to_string()));
            }
        }
        Err(PennyError::InvalidMonth(raw.to_string()))
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Month(key) => txn.month_key() == *key,
        }
    }
}

impl Default for MonthSelection {
    fn default() -> Self {
        Self::All
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Single-dimension ad hoc filter layered on top of the standard filters,
/// typically driven by picking one chart segment.
#[derive(Debug, Clone, PartialEq)]
pub enum DrillDown {
    Category(String),
    Kind(TxnKind),
}

/// Predicate composition over a transaction collection. Every dimension is
/// independent and ANDed; applying the filters in any order yields the same
/// result set.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub month: MonthSelection,
    /// Empty set means no category filter.
    pub categories: BTreeSet<String>,
    pub kind: Option<TxnKind>,
    pub drill_down: Option<DrillDown>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.month.matches(txn)
            && (self.categories.is_empty() || self.categories.contains(&txn.category))
            && self.kind.map_or(true, |k| k == txn.kind)
            && self.drill_down.as_ref().map_or(true, |d| match d {
                DrillDown::Category(c) => txn.category == *c,
                DrillDown::Kind(k) => txn.kind == *k,
            })
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Distinct month keys present in the collection, most recent first.
pub fn available_months(transactions: &[Transaction]) -> Vec<String> {
    let keys: BTreeSet<String> = transactions.iter().map(|t| t.month_key()).collect();
    keys.into_iter().rev().collect()
}
