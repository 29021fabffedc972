use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{PennyError, Result};
use crate::models::{
    Asset, Budget, Debt, Goal, Liability, Transaction, TxnKind, INCOME_CATEGORY,
    SAVINGS_GOAL_CATEGORY, UNCATEGORIZED,
};

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Shopping",
    "Utilities",
    "Entertainment",
    "Health",
    UNCATEGORIZED,
];

/// The whole persisted state, serialized as one JSON document. Transactions
/// live in an id-keyed ordered map so edit and delete are O(log n) by id;
/// display order is always derived from the `date` field, never from map
/// iteration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    transactions: BTreeMap<String, Transaction>,
    pub categories: Vec<String>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub liabilities: Vec<Liability>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    imported_checksums: Vec<String>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            transactions: BTreeMap::new(),
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            budgets: Vec::new(),
            debts: Vec::new(),
            assets: Vec::new(),
            liabilities: Vec::new(),
            goals: Vec::new(),
            imported_checksums: Vec::new(),
        }
    }
}

impl Ledger {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, format!("{json}\n"))?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Transactions
    // -----------------------------------------------------------------------

    pub fn add_transaction(&mut self, txn: Transaction) {
        self.transactions.insert(txn.id.clone(), txn);
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    pub fn update_transaction(&mut self, txn: Transaction) -> Result<()> {
        match self.transactions.get_mut(&txn.id) {
            Some(slot) => {
                *slot = txn;
                Ok(())
            }
            None => Err(PennyError::UnknownTransaction(txn.id)),
        }
    }

    pub fn remove_transaction(&mut self, id: &str) -> Result<Transaction> {
        self.transactions
            .remove(id)
            .ok_or_else(|| PennyError::UnknownTransaction(id.to_string()))
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Snapshot of all transactions ordered by date (id as a final tie-break
    /// so the projection is fully deterministic).
    pub fn transactions_by_date(&self) -> Vec<Transaction> {
        let mut out: Vec<Transaction> = self.transactions.values().cloned().collect();
        out.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        out
    }

    /// Add any expense categories seen in new transactions to the known list,
    /// keeping it sorted.
    pub fn absorb_categories(&mut self, transactions: &[Transaction]) {
        for t in transactions {
            if t.kind == TxnKind::Expense && !self.categories.contains(&t.category) {
                self.categories.push(t.category.clone());
            }
        }
        self.categories.sort();
    }

    /// Categories offered for expense classification (the reserved income
    /// label is not one of them).
    pub fn expense_categories(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| c.as_str() != INCOME_CATEGORY)
            .cloned()
            .collect()
    }

    // -----------------------------------------------------------------------
    // Budgets — category is the unique key
    // -----------------------------------------------------------------------

    pub fn set_budget(&mut self, category: &str, amount: f64) -> Result<()> {
        if self.budgets.iter().any(|b| b.category == category) {
            return Err(PennyError::DuplicateBudget(category.to_string()));
        }
        self.budgets.push(Budget {
            category: category.to_string(),
            amount,
        });
        Ok(())
    }

    pub fn update_budget(&mut self, category: &str, amount: f64) -> Result<()> {
        match self.budgets.iter_mut().find(|b| b.category == category) {
            Some(b) => {
                b.amount = amount;
                Ok(())
            }
            None => Err(PennyError::UnknownBudget(category.to_string())),
        }
    }

    pub fn remove_budget(&mut self, category: &str) -> Result<Budget> {
        match self.budgets.iter().position(|b| b.category == category) {
            Some(i) => Ok(self.budgets.remove(i)),
            None => Err(PennyError::UnknownBudget(category.to_string())),
        }
    }

    // -----------------------------------------------------------------------
    // Debts and goals
    // -----------------------------------------------------------------------

    pub fn settle_debt(&mut self, id: &str) -> Result<()> {
        match self.debts.iter_mut().find(|d| d.id == id) {
            Some(d) => {
                d.is_settled = true;
                Ok(())
            }
            None => Err(PennyError::UnknownDebt(id.to_string())),
        }
    }

    /// Record money put toward a goal. Bumps the goal's saved amount and
    /// synthesizes a matching `Savings Goal` expense transaction so the
    /// contribution shows up in summaries.
    pub fn contribute_to_goal(
        &mut self,
        name: &str,
        amount: f64,
        when: NaiveDateTime,
    ) -> Result<Transaction> {
        let goal = self
            .goals
            .iter_mut()
            .find(|g| g.name == name)
            .ok_or_else(|| PennyError::UnknownGoal(name.to_string()))?;
        goal.saved_amount += amount;

        let txn = Transaction {
            id: format!("goal-{}", when.and_utc().timestamp_millis()),
            date: when,
            description: format!("Contribution to goal: {name}"),
            category: SAVINGS_GOAL_CATEGORY.to_string(),
            amount,
            kind: TxnKind::Expense,
            confidence: None,
        };
        self.add_transaction(txn.clone());
        Ok(txn)
    }

    // -----------------------------------------------------------------------
    // Import dedupe
    // -----------------------------------------------------------------------

    pub fn has_import(&self, checksum: &str) -> bool {
        self.imported_checksums.iter().any(|c| c == checksum)
    }

    pub fn record_import(&mut self, checksum: String) {
        if !self.has_import(&checksum) {
            self.imported_checksums.push(checksum);
        }
    }
}

/// SHA-256 of a file's bytes, hex-encoded. Used to skip re-importing a file.
pub fn file_checksum(path: &Path) -> Result<String> {
    let data = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(id: &str, date: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            description: "test".to_string(),
            category: "Food".to_string(),
            amount: 10.0,
            kind: TxnKind::Expense,
            confidence: None,
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("penny.json");
        let mut ledger = Ledger::default();
        ledger.add_transaction(txn("a", "2024-01-05"));
        ledger.set_budget("Food", 200.0).unwrap();
        ledger.save(&path).unwrap();

        let loaded = Ledger::load(&path).unwrap();
        assert_eq!(loaded.transaction_count(), 1);
        let t = loaded.transaction("a").unwrap();
        assert_eq!(t.date, txn("a", "2024-01-05").date);
        assert_eq!(loaded.budgets.len(), 1);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(ledger.transaction_count(), 0);
        assert!(ledger.categories.contains(&UNCATEGORIZED.to_string()));
    }

    #[test]
    fn test_transactions_by_date_ignores_insertion_order() {
        let mut ledger = Ledger::default();
        ledger.add_transaction(txn("z-later", "2024-03-01"));
        ledger.add_transaction(txn("a-earlier", "2024-01-01"));
        let ordered = ledger.transactions_by_date();
        assert_eq!(ordered[0].id, "a-earlier");
        assert_eq!(ordered[1].id, "z-later");
    }

    #[test]
    fn test_update_and_remove_by_id() {
        let mut ledger = Ledger::default();
        ledger.add_transaction(txn("a", "2024-01-05"));
        let mut edited = txn("a", "2024-01-05");
        edited.amount = 99.0;
        ledger.update_transaction(edited).unwrap();
        assert_eq!(ledger.transaction("a").unwrap().amount, 99.0);

        ledger.remove_transaction("a").unwrap();
        assert!(ledger.transaction("a").is_none());
        assert!(ledger.remove_transaction("a").is_err());
    }

    #[test]
    fn test_duplicate_budget_rejected() {
        let mut ledger = Ledger::default();
        ledger.set_budget("Food", 100.0).unwrap();
        let err = ledger.set_budget("Food", 250.0).unwrap_err();
        assert!(matches!(err, PennyError::DuplicateBudget(_)));
        // Original target untouched.
        assert_eq!(ledger.budgets[0].amount, 100.0);
    }

    #[test]
    fn test_absorb_categories_adds_new_expense_categories_sorted() {
        let mut ledger = Ledger::default();
        let txns = vec![
            Transaction {
                category: "Aquarium".to_string(),
                ..txn("a", "2024-01-05")
            },
            Transaction {
                category: "Paycheck".to_string(),
                kind: TxnKind::Income,
                ..txn("b", "2024-01-06")
            },
        ];
        ledger.absorb_categories(&txns);
        assert!(ledger.categories.contains(&"Aquarium".to_string()));
        // Income transaction categories are not expense categories.
        assert!(!ledger.categories.contains(&"Paycheck".to_string()));
        let mut sorted = ledger.categories.clone();
        sorted.sort();
        assert_eq!(ledger.categories, sorted);
    }

    #[test]
    fn test_goal_contribution_synthesizes_savings_goal_txn() {
        let mut ledger = Ledger::default();
        ledger.goals.push(Goal {
            id: "g1".to_string(),
            name: "Vacation".to_string(),
            target_amount: 1000.0,
            saved_amount: 100.0,
            deadline: "2025-06-01".to_string(),
        });
        let when = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let txn = ledger.contribute_to_goal("Vacation", 50.0, when).unwrap();
        assert_eq!(txn.category, SAVINGS_GOAL_CATEGORY);
        assert_eq!(txn.kind, TxnKind::Expense);
        assert_eq!(ledger.goals[0].saved_amount, 150.0);
        assert!(ledger.transaction(&txn.id).is_some());

        assert!(ledger.contribute_to_goal("Nope", 50.0, when).is_err());
    }

    #[test]
    fn test_settle_debt() {
        let mut ledger = Ledger::default();
        ledger.debts.push(Debt {
            id: "d1".to_string(),
            description: "Lunch money".to_string(),
            amount: 20.0,
            kind: crate::models::DebtKind::Owed,
            due_date: None,
            is_settled: false,
        });
        ledger.settle_debt("d1").unwrap();
        assert!(ledger.debts[0].is_settled);
        assert!(ledger.settle_debt("dX").is_err());
    }

    #[test]
    fn test_import_checksum_dedupe() {
        let mut ledger = Ledger::default();
        assert!(!ledger.has_import("abc"));
        ledger.record_import("abc".to_string());
        ledger.record_import("abc".to_string());
        assert!(ledger.has_import("abc"));
        assert_eq!(ledger.imported_checksums.len(), 1);
    }

    #[test]
    fn test_file_checksum_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "date,amount\n").unwrap();
        let a = file_checksum(&path).unwrap();
        let b = file_checksum(&path).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }
}
