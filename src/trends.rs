use std::collections::BTreeMap;

use crate::filter::MonthSelection;
use crate::models::{Transaction, TxnKind};

/// The category whose spend grew the most month over month.
#[derive(Debug, Clone, PartialEq)]
pub enum TopCategory {
    /// No category had prior-period spend to compare against and nothing new
    /// appeared. Rendered as "N/A" with growth 0.
    None,
    Growth { category: String, pct: f64 },
    /// Spend this period, zero spend in the previous period. Treated as a
    /// maximal growth signal: always beats any finite rate.
    New { category: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendReport {
    /// Percent change vs. the previous calendar month's total expenses.
    /// 0.0 when the previous month has no recorded expenses (no baseline).
    pub vs_prev_month: f64,
    /// Percent change vs. the average monthly expense across all history.
    /// 0.0 when there is no history.
    pub vs_average: f64,
    pub top_growing: TopCategory,
    /// `(day key, total)` for the day with the highest summed expenses.
    pub largest_spending_day: Option<(String, f64)>,
}

/// `YYYY-MM` of the calendar month before `month`, rolling over year ends.
pub fn prev_month_key(month: &str) -> Option<String> {
    let (y, m) = month.split_once('-')?;
    let year: i32 = y.parse().ok()?;
    let month_num: u32 = m.parse().ok()?;
    if !(1..=12).contains(&month_num) {
        return None;
    }
    if month_num == 1 {
        Some(format!("{:04}-12", year - 1))
    } else {
        Some(format!("{year:04}-{:02}", month_num - 1))
    }
}

/// Compute spending trends for one selected month against full history.
///
/// Returns `None` — no partial results — for the "all time" selection or when
/// the period holds no transactions; the caller must present that as
/// "insufficient data", distinct from zero change.
///
/// Tie-breaks are deterministic by construction: categories are visited in
/// ascending name order (the first new category by name wins among new ones,
/// and a finite rate must be strictly larger to displace an earlier name), and
/// the earliest day key wins among equal day totals.
pub fn analyze(
    selection: &MonthSelection,
    period: &[Transaction],
    all: &[Transaction],
) -> Option<TrendReport> {
    let month = match selection {
        MonthSelection::All => return None,
        MonthSelection::Month(m) => m,
    };
    if period.is_empty() {
        return None;
    }
    let prev_key = prev_month_key(month)?;

    // Current period.
    let mut current_expenses = 0.0f64;
    let mut by_day: BTreeMap<String, f64> = BTreeMap::new();
    let mut current_by_category: BTreeMap<String, f64> = BTreeMap::new();
    for t in period.iter().filter(|t| t.kind == TxnKind::Expense) {
        current_expenses += t.amount;
        *by_day.entry(t.day_key()).or_insert(0.0) += t.amount;
        *current_by_category.entry(t.category.clone()).or_insert(0.0) += t.amount;
    }

    // History: expense totals per month, and the previous month's per-category split.
    let mut monthly_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut prev_by_category: BTreeMap<String, f64> = BTreeMap::new();
    for t in all.iter().filter(|t| t.kind == TxnKind::Expense) {
        let key = t.month_key();
        if key == prev_key {
            *prev_by_category.entry(t.category.clone()).or_insert(0.0) += t.amount;
        }
        *monthly_totals.entry(key).or_insert(0.0) += t.amount;
    }

    let prev_expenses = monthly_totals.get(&prev_key).copied().unwrap_or(0.0);
    let average = if monthly_totals.is_empty() {
        0.0
    } else {
        monthly_totals.values().sum::<f64>() / monthly_totals.len() as f64
    };

    let vs_prev_month = if prev_expenses > 0.0 {
        (current_expenses - prev_expenses) / prev_expenses * 100.0
    } else {
        0.0
    };
    let vs_average = if average > 0.0 {
        (current_expenses - average) / average * 100.0
    } else {
        0.0
    };

    let mut top = TopCategory::None;
    let mut max_growth = f64::NEG_INFINITY;
    let mut found_new = false;
    for (category, current) in &current_by_category {
        let prev = prev_by_category.get(category).copied().unwrap_or(0.0);
        if prev > 0.0 {
            if found_new {
                continue;
            }
            let growth = (current - prev) / prev * 100.0;
            if growth > max_growth {
                max_growth = growth;
                top = TopCategory::Growth {
                    category: category.clone(),
                    pct: growth,
                };
            }
        } else if *current > 0.0 && !found_new {
            found_new = true;
            top = TopCategory::New {
                category: category.clone(),
            };
        }
    }

    let mut largest_spending_day: Option<(String, f64)> = None;
    for (day, total) in &by_day {
        let beats = largest_spending_day
            .as_ref()
            .map_or(true, |(_, best)| total > best);
        if beats {
            largest_spending_day = Some((day.clone(), *total));
        }
    }

    Some(TrendReport {
        vs_prev_month,
        vs_average,
        top_growing: top,
        largest_spending_day,
    })
}
