use std::collections::BTreeMap;

use crate::models::{
    Asset, CategoryTotal, Debt, DebtKind, FinancialSummary, Liability, MonthTotal, Transaction,
    TxnKind,
};

/// Compute the derived financial view in a single pass over the transactions.
///
/// Pure and deterministic: the same snapshot always yields a bit-identical
/// summary. Category totals come out descending by amount; because they are
/// accumulated in a name-ordered map and the sort is stable, ties fall back to
/// category name ascending. Month rows come out ascending by month key.
pub fn summarize(
    transactions: &[Transaction],
    debts: &[Debt],
    assets: &[Asset],
    liabilities: &[Liability],
) -> FinancialSummary {
    let mut total_income = 0.0f64;
    let mut total_expenses = 0.0f64;
    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_month: BTreeMap<String, (f64, f64)> = BTreeMap::new();

    for t in transactions {
        let month = by_month.entry(t.month_key()).or_insert((0.0, 0.0));
        match t.kind {
            TxnKind::Income => {
                total_income += t.amount;
                month.0 += t.amount;
            }
            TxnKind::Expense => {
                total_expenses += t.amount;
                month.1 += t.amount;
                *by_category.entry(t.category.clone()).or_insert(0.0) += t.amount;
            }
        }
    }

    // Settled debts are removed from the picture entirely, not zeroed.
    let mut total_debt = 0.0f64;
    let mut total_receivables = 0.0f64;
    for d in debts {
        if d.is_settled {
            continue;
        }
        match d.kind {
            DebtKind::Owed => total_debt += d.amount,
            DebtKind::Iou => total_receivables += d.amount,
        }
    }

    let total_assets: f64 = assets.iter().map(|a| a.value).sum();
    let total_liabilities: f64 = liabilities.iter().map(|l| l.value).sum();

    let mut expenses_by_category: Vec<CategoryTotal> = by_category
        .into_iter()
        .map(|(category, amount)| CategoryTotal { category, amount })
        .collect();
    expenses_by_category.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let monthly_data: Vec<MonthTotal> = by_month
        .into_iter()
        .map(|(month, (income, expenses))| MonthTotal {
            month,
            income,
            expenses,
        })
        .collect();

    FinancialSummary {
        total_income,
        total_expenses,
        net_savings: total_income - total_expenses,
        total_debt,
        total_receivables,
        net_worth: total_assets - total_liabilities,
        expenses_by_category,
        monthly_data,
    }
}
