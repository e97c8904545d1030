//! In-memory ledger state and its reducer.
//!
//! The presentation layer owns exactly one [`LedgerState`]. It changes only by feeding a
//! completed store result through [`reduce`], which returns a fresh state plus any
//! follow-up the caller has to run. Failed writes never produce an event, so a failure
//! leaves the state untouched.

use crate::aggregate::{Totals, summarize};
use crate::finance::{RecordId, Transaction};
use crate::goals::SavingsGoal;
use crate::grouping::{CategoryGroup, group_by_category};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerState {
    /// Newest first
    pub transactions: Vec<Transaction>,
    /// Newest first
    pub goals: Vec<SavingsGoal>,
    /// True until the transaction list request has finished (either way).
    pub loading: bool,
}

/// A completed (or started) store interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    TransactionsRequested,
    TransactionsLoaded(Vec<Transaction>),
    /// List read failed. The previous list is kept.
    TransactionsFailed,
    GoalsLoaded(Vec<SavingsGoal>),
    TransactionInserted(Transaction),
    GoalInserted(SavingsGoal),
    /// A contribution update was accepted by the store.
    ContributionSaved,
}

/// Work the caller must perform after applying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    Nothing,
    /// Re-read the whole goal list instead of patching locally.
    RefreshGoals,
}

impl LedgerState {
    /// State before the first load: empty lists, loading.
    pub fn initial() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn totals(&self) -> Totals {
        summarize(&self.transactions)
    }

    pub fn groups(&self) -> Vec<CategoryGroup<'_>> {
        group_by_category(&self.transactions)
    }

    pub fn find_goal(&self, id: &RecordId) -> Option<&SavingsGoal> {
        self.goals.iter().find(|g| &g.id == id)
    }
}

/// Apply `event` to `prev`, producing the next state.
///
/// Inserts are merged optimistically by prepending the returned record. A saved
/// contribution is not merged at all; it asks for a full goal refresh.
pub fn reduce(prev: &LedgerState, event: LedgerEvent) -> (LedgerState, FollowUp) {
    match event {
        LedgerEvent::TransactionsRequested => (
            LedgerState {
                loading: true,
                ..prev.clone()
            },
            FollowUp::Nothing,
        ),
        LedgerEvent::TransactionsLoaded(transactions) => (
            LedgerState {
                transactions,
                loading: false,
                ..prev.clone()
            },
            FollowUp::Nothing,
        ),
        LedgerEvent::TransactionsFailed => (
            LedgerState {
                loading: false,
                ..prev.clone()
            },
            FollowUp::Nothing,
        ),
        LedgerEvent::GoalsLoaded(goals) => (
            LedgerState {
                goals,
                ..prev.clone()
            },
            FollowUp::Nothing,
        ),
        LedgerEvent::TransactionInserted(t) => {
            let mut transactions = Vec::with_capacity(prev.transactions.len() + 1);
            transactions.push(t);
            transactions.extend(prev.transactions.iter().cloned());
            (
                LedgerState {
                    transactions,
                    ..prev.clone()
                },
                FollowUp::Nothing,
            )
        }
        LedgerEvent::GoalInserted(goal) => {
            let mut goals = Vec::with_capacity(prev.goals.len() + 1);
            goals.push(goal);
            goals.extend(prev.goals.iter().cloned());
            (
                LedgerState {
                    goals,
                    ..prev.clone()
                },
                FollowUp::Nothing,
            )
        }
        LedgerEvent::ContributionSaved => (prev.clone(), FollowUp::RefreshGoals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::finance::TxnType;
    use chrono::NaiveDate;

    fn txn(id: &str) -> Transaction {
        Transaction {
            id: RecordId::new(id),
            name: id.to_string(),
            amount: 10.0,
            kind: TxnType::Expense,
            category: Category::Food,
            date: NaiveDate::from_ymd_opt(2024, 1, 1),
        }
    }

    fn goal(id: &str, current: f64) -> SavingsGoal {
        SavingsGoal {
            id: RecordId::new(id),
            name: id.to_string(),
            target_amount: 100.0,
            current_amount: current,
            is_completed: false,
            created_at: None,
            emoji: Some("🎯".to_string()),
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let s = LedgerState::initial();
        assert!(s.loading);
        assert!(s.transactions.is_empty());
        assert_eq!(s.totals(), Totals::default());
    }

    #[test]
    fn test_load_clears_loading_flag() {
        let (s, f) = reduce(
            &LedgerState::initial(),
            LedgerEvent::TransactionsLoaded(vec![txn("1")]),
        );
        assert!(!s.loading);
        assert_eq!(s.transactions.len(), 1);
        assert_eq!(f, FollowUp::Nothing);
    }

    #[test]
    fn test_failed_load_keeps_previous_list() {
        let (loaded, _) = reduce(
            &LedgerState::default(),
            LedgerEvent::TransactionsLoaded(vec![txn("1")]),
        );
        let (requested, _) = reduce(&loaded, LedgerEvent::TransactionsRequested);
        assert!(requested.loading);
        let (failed, _) = reduce(&requested, LedgerEvent::TransactionsFailed);
        assert!(!failed.loading);
        assert_eq!(failed.transactions, loaded.transactions);
    }

    #[test]
    fn test_transaction_insert_prepends() {
        let (s, _) = reduce(
            &LedgerState::default(),
            LedgerEvent::TransactionsLoaded(vec![txn("old")]),
        );
        let (s, f) = reduce(&s, LedgerEvent::TransactionInserted(txn("new")));
        let ids: Vec<&str> = s.transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(f, FollowUp::Nothing);
    }

    #[test]
    fn test_goal_insert_prepends() {
        let (s, _) = reduce(
            &LedgerState::default(),
            LedgerEvent::GoalsLoaded(vec![goal("g1", 0.0)]),
        );
        let (s, _) = reduce(&s, LedgerEvent::GoalInserted(goal("g2", 0.0)));
        assert_eq!(s.goals[0].id, RecordId::new("g2"));
        assert_eq!(s.goals.len(), 2);
    }

    #[test]
    fn test_contribution_requests_refresh_without_local_patch() {
        let (s, _) = reduce(
            &LedgerState::default(),
            LedgerEvent::GoalsLoaded(vec![goal("g1", 80.0)]),
        );
        let (after, f) = reduce(&s, LedgerEvent::ContributionSaved);
        assert_eq!(f, FollowUp::RefreshGoals);
        assert_eq!(after, s);
    }

    #[test]
    fn test_find_goal() {
        let (s, _) = reduce(
            &LedgerState::default(),
            LedgerEvent::GoalsLoaded(vec![goal("g1", 1.0), goal("g2", 2.0)]),
        );
        assert_eq!(s.find_goal(&RecordId::new("g2")).map(|g| g.current_amount), Some(2.0));
        assert!(s.find_goal(&RecordId::new("nope")).is_none());
    }
}
