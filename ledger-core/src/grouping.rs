//! Group transactions by category label.

use std::collections::HashMap;

use crate::category::Category;
use crate::finance::Transaction;

/// One category bucket, borrowing from the source list.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: &'a Category,
    pub transactions: Vec<&'a Transaction>,
}

impl CategoryGroup<'_> {
    pub fn heading(&self) -> &'static str {
        self.category.display_name()
    }
}

/// Partition `transactions` by category.
///
/// Groups come out in the order each category first appears in the input, and every
/// group keeps the input's relative order. Input is expected newest-first, so the
/// group holding the most recent transaction leads.
pub fn group_by_category(transactions: &[Transaction]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    let mut index: HashMap<&Category, usize> = HashMap::new();

    for t in transactions {
        let slot = *index.entry(&t.category).or_insert_with(|| {
            groups.push(CategoryGroup {
                category: &t.category,
                transactions: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].transactions.push(t);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::{RecordId, TxnType};
    use chrono::NaiveDate;

    fn txn(id: &str, label: &str, day: u32) -> Transaction {
        Transaction {
            id: RecordId::new(id),
            name: id.to_string(),
            amount: 1.0,
            kind: TxnType::Expense,
            category: Category::from_label(label),
            date: NaiveDate::from_ymd_opt(2024, 1, day),
        }
    }

    fn ids(group: &CategoryGroup<'_>) -> Vec<String> {
        group
            .transactions
            .iter()
            .map(|t| t.id.to_string())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_category(&[]).is_empty());
    }

    #[test]
    fn test_first_occurrence_order() {
        let txns = vec![
            txn("a", "🚗", 9),
            txn("b", "🍔", 8),
            txn("c", "🚗", 7),
            txn("d", "💰", 6),
            txn("e", "🍔", 5),
        ];
        let groups = group_by_category(&txns);
        let heads: Vec<&str> = groups.iter().map(|g| g.heading()).collect();
        assert_eq!(heads, vec!["Transport", "Food & Drink", "Income"]);
        assert_eq!(ids(&groups[0]), vec!["a", "c"]);
        assert_eq!(ids(&groups[1]), vec!["b", "e"]);
        assert_eq!(ids(&groups[2]), vec!["d"]);
    }

    #[test]
    fn test_distinct_unknown_labels_stay_separate() {
        let txns = vec![txn("a", "🐶", 3), txn("b", "🎁", 2), txn("c", "🐶", 1)];
        let groups = group_by_category(&txns);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.heading() == "Other"));
        assert_eq!(groups[0].category.label(), "🐶");
        assert_eq!(ids(&groups[0]), vec!["a", "c"]);
    }
}
