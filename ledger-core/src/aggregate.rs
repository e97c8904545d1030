//! Income / expense totals

use serde::{Deserialize, Serialize};

use crate::finance::{Transaction, TxnType};

/// Totals derived from a transaction list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    /// `income - expenses`
    pub balance: f64,
}

/// Sum income and expenses over `transactions`.
///
/// Records whose type is neither income nor expense are ignored.
pub fn summarize(transactions: &[Transaction]) -> Totals {
    let mut income = 0.0;
    let mut expenses = 0.0;

    for t in transactions {
        match t.kind {
            TxnType::Income => income += t.amount,
            TxnType::Expense => expenses += t.amount,
            TxnType::Unrecognized => {}
        }
    }

    Totals {
        income,
        expenses,
        balance: income - expenses,
    }
}
