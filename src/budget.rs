use crate::models::{Budget, Transaction, TxnKind};

/// Spend-vs-target state for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLevel {
    /// At or below 90% of target.
    Under,
    /// Above 90%, up to and including 100%.
    Near,
    /// Above 100%.
    Over,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub category: String,
    pub budgeted: f64,
    pub spent: f64,
    pub percentage: f64,
    pub level: BudgetLevel,
}

fn classify(percentage: f64) -> BudgetLevel {
    if percentage > 100.0 {
        BudgetLevel::Over
    } else if percentage > 90.0 {
        BudgetLevel::Near
    } else {
        BudgetLevel::Under
    }
}

/// Evaluate each budget against the supplied transactions (already filtered to
/// the scope the caller cares about). Assumes budget categories are unique;
/// the store enforces that on insert.
pub fn evaluate(transactions: &[Transaction], budgets: &[Budget]) -> Vec<BudgetStatus> {
    budgets
        .iter()
        .map(|b| {
            let spent: f64 = transactions
                .iter()
                .filter(|t| t.kind == TxnKind::Expense && t.category == b.category)
                .map(|t| t.amount)
                .sum();
            let percentage = if b.amount > 0.0 {
                spent / b.amount * 100.0
            } else {
                0.0
            };
            BudgetStatus {
                category: b.category.clone(),
                budgeted: b.amount,
                spent,
                percentage,
                level: classify(percentage),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(category: &str, amount: f64, kind: TxnKind) -> Transaction {
        Transaction {
            id: format!("{category}-{amount}"),
            date: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            description: "test".to_string(),
            category: category.to_string(),
            amount,
            kind,
            confidence: None,
        }
    }

    fn budget(category: &str, amount: f64) -> Budget {
        Budget {
            category: category.to_string(),
            amount,
        }
    }

    #[test]
    fn test_spent_sums_only_matching_expenses() {
        let txns = vec![
            txn("Food", 30.0, TxnKind::Expense),
            txn("Food", 20.0, TxnKind::Expense),
            txn("Transport", 99.0, TxnKind::Expense),
            txn("Food", 500.0, TxnKind::Income), // income never counts as spend
        ];
        let out = evaluate(&txns, &[budget("Food", 100.0)]);
        assert_eq!(out[0].spent, 50.0);
        assert_eq!(out[0].percentage, 50.0);
        assert_eq!(out[0].level, BudgetLevel::Under);
    }

    #[test]
    fn test_threshold_boundaries() {
        let cases = [
            (90.0, BudgetLevel::Under),  // exactly 90% is still under
            (90.5, BudgetLevel::Near),
            (100.0, BudgetLevel::Near),  // exactly 100% is near, not over
            (100.1, BudgetLevel::Over),
        ];
        for (spent, expected) in cases {
            let out = evaluate(&[txn("Food", spent, TxnKind::Expense)], &[budget("Food", 100.0)]);
            assert_eq!(out[0].level, expected, "spent {spent}");
        }
    }

    #[test]
    fn test_zero_budget_yields_zero_percentage_under() {
        let out = evaluate(&[txn("Food", 50.0, TxnKind::Expense)], &[budget("Food", 0.0)]);
        assert_eq!(out[0].percentage, 0.0);
        assert_eq!(out[0].level, BudgetLevel::Under);
    }

    #[test]
    fn test_budget_with_no_spend() {
        let out = evaluate(&[], &[budget("Food", 100.0)]);
        assert_eq!(out[0].spent, 0.0);
        assert_eq!(out[0].percentage, 0.0);
        assert_eq!(out[0].level, BudgetLevel::Under);
    }

    #[test]
    fn test_one_status_per_budget_in_input_order() {
        let budgets = vec![budget("Transport", 50.0), budget("Food", 100.0)];
        let out = evaluate(&[], &budgets);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].category, "Transport");
        assert_eq!(out[1].category, "Food");
    }
}
