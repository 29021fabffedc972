use std::collections::HashMap;

use regex::Regex;

use crate::error::Result;
use crate::models::{Confidence, Transaction, TxnKind, UNCATEGORIZED};

/// A category suggestion for one transaction id.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub category: String,
    pub confidence: Confidence,
}

/// An `(id, description)` pair sent out for categorization.
pub type CategorizeItem = (String, String);

/// External categorization collaborator. Given descriptions and the allowed
/// category list it returns suggestions keyed by transaction id. Fallible and
/// best-effort: a failure degrades to leaving rows Uncategorized, it never
/// blocks ingestion or aggregation.
pub trait Categorizer {
    fn suggest(
        &self,
        items: &[CategorizeItem],
        categories: &[String],
    ) -> Result<HashMap<String, Suggestion>>;
}

/// Uncategorized expenses — the rows worth sending to a categorizer.
pub fn pending_review(transactions: &[Transaction]) -> Vec<CategorizeItem> {
    transactions
        .iter()
        .filter(|t| t.kind == TxnKind::Expense && t.category == UNCATEGORIZED)
        .map(|t| (t.id.clone(), t.description.clone()))
        .collect()
}

/// Apply suggestions in place. Only Uncategorized expenses are touched, and a
/// suggestion is accepted only when its category appears in the allowed list;
/// everything else stays Uncategorized with no confidence tag. Returns the
/// number of transactions updated.
pub fn apply_suggestions(
    transactions: &mut [Transaction],
    suggestions: &HashMap<String, Suggestion>,
    categories: &[String],
) -> usize {
    let mut applied = 0usize;
    for t in transactions.iter_mut() {
        if t.kind != TxnKind::Expense || t.category != UNCATEGORIZED {
            continue;
        }
        if let Some(s) = suggestions.get(&t.id) {
            if categories.iter().any(|c| c == &s.category) {
                t.category = s.category.clone();
                t.confidence = Some(s.confidence);
                applied += 1;
            }
        }
    }
    applied
}

// ---------------------------------------------------------------------------
// Built-in keyword categorizer
// ---------------------------------------------------------------------------

/// Offline keyword matcher so `penny import` and `penny categorize` work
/// without any external service. Patterns are checked in order; the first hit
/// wins, tagged medium confidence.
pub struct RuleCategorizer {
    rules: Vec<(Regex, &'static str)>,
}

const KEYWORD_RULES: &[(&str, &str)] = &[
    (r"(?i)grocer|supermarket|market|bakery|restaurant|cafe|coffee|pizza|burger|deli", "Food"),
    (r"(?i)uber|lyft|taxi|metro|transit|parking|fuel|gas station|shell|chevron", "Transport"),
    (r"(?i)netflix|spotify|hulu|cinema|theater|steam|playstation|concert", "Entertainment"),
    (r"(?i)electric|water bill|internet|broadband|phone|mobile|utility", "Utilities"),
    (r"(?i)pharmacy|drugstore|clinic|dental|doctor|hospital|gym|fitness", "Health"),
    (r"(?i)amazon|ebay|target|walmart|mall|store|clothing|ikea", "Shopping"),
];

impl RuleCategorizer {
    pub fn new() -> Self {
        let rules = KEYWORD_RULES
            .iter()
            .filter_map(|(pattern, category)| Regex::new(pattern).ok().map(|re| (re, *category)))
            .collect();
        Self { rules }
    }
}

impl Default for RuleCategorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Categorizer for RuleCategorizer {
    fn suggest(
        &self,
        items: &[CategorizeItem],
        categories: &[String],
    ) -> Result<HashMap<String, Suggestion>> {
        let mut out = HashMap::new();
        for (id, description) in items {
            for (re, category) in &self.rules {
                if re.is_match(description) && categories.iter().any(|c| c == category) {
                    out.insert(
                        id.clone(),
                        Suggestion {
                            category: (*category).to_string(),
                            confidence: Confidence::Medium,
                        },
                    );
                    break;
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(id: &str, description: &str, category: &str, kind: TxnKind) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            description: description.to_string(),
            category: category.to_string(),
            amount: 10.0,
            kind,
            confidence: None,
        }
    }

    fn default_categories() -> Vec<String> {
        ["Food", "Transport", "Shopping", "Utilities", "Entertainment", "Health", UNCATEGORIZED]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_pending_review_selects_uncategorized_expenses_only() {
        let txns = vec![
            txn("a", "Corner market", UNCATEGORIZED, TxnKind::Expense),
            txn("b", "Paycheck", UNCATEGORIZED, TxnKind::Income),
            txn("c", "Lunch", "Food", TxnKind::Expense),
        ];
        let pending = pending_review(&txns);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].0, "a");
    }

    #[test]
    fn test_rule_categorizer_matches_keywords() {
        let cat = RuleCategorizer::new();
        let items = vec![
            ("a".to_string(), "WHOLE FOODS MARKET".to_string()),
            ("b".to_string(), "UBER TRIP".to_string()),
            ("c".to_string(), "mystery merchant".to_string()),
        ];
        let suggestions = cat.suggest(&items, &default_categories()).unwrap();
        assert_eq!(suggestions.get("a").unwrap().category, "Food");
        assert_eq!(suggestions.get("b").unwrap().category, "Transport");
        assert!(!suggestions.contains_key("c"));
    }

    #[test]
    fn test_rule_categorizer_respects_allowed_list() {
        let cat = RuleCategorizer::new();
        let items = vec![("a".to_string(), "UBER TRIP".to_string())];
        // Transport not allowed -> no suggestion rather than an off-list category.
        let allowed = vec!["Food".to_string()];
        let suggestions = cat.suggest(&items, &allowed).unwrap();
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_apply_suggestions_sets_category_and_confidence() {
        let mut txns = vec![txn("a", "Corner market", UNCATEGORIZED, TxnKind::Expense)];
        let mut suggestions = HashMap::new();
        suggestions.insert(
            "a".to_string(),
            Suggestion {
                category: "Food".to_string(),
                confidence: Confidence::High,
            },
        );
        let applied = apply_suggestions(&mut txns, &suggestions, &default_categories());
        assert_eq!(applied, 1);
        assert_eq!(txns[0].category, "Food");
        assert_eq!(txns[0].confidence, Some(Confidence::High));
    }

    #[test]
    fn test_apply_suggestions_rejects_off_list_category() {
        let mut txns = vec![txn("a", "Corner market", UNCATEGORIZED, TxnKind::Expense)];
        let mut suggestions = HashMap::new();
        suggestions.insert(
            "a".to_string(),
            Suggestion {
                category: "Made Up".to_string(),
                confidence: Confidence::High,
            },
        );
        let applied = apply_suggestions(&mut txns, &suggestions, &default_categories());
        assert_eq!(applied, 0);
        assert_eq!(txns[0].category, UNCATEGORIZED);
        assert_eq!(txns[0].confidence, None);
    }

    #[test]
    fn test_apply_suggestions_never_touches_categorized_rows() {
        let mut txns = vec![txn("a", "Lunch", "Food", TxnKind::Expense)];
        let mut suggestions = HashMap::new();
        suggestions.insert(
            "a".to_string(),
            Suggestion {
                category: "Transport".to_string(),
                confidence: Confidence::High,
            },
        );
        let applied = apply_suggestions(&mut txns, &suggestions, &default_categories());
        assert_eq!(applied, 0);
        assert_eq!(txns[0].category, "Food");
    }
}
