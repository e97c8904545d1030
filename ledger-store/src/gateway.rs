//! Store gateway traits.
//!
//! Each operation touches one resource and returns its outcome as a `StoreResult`, so
//! every caller decides for itself whether a failure is logged and swallowed or
//! surfaced.

use async_trait::async_trait;
use ledger_core::{GoalContribution, GoalDraft, SavingsGoal, Transaction, TransactionDraft};

use crate::error::StoreResult;

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// All transactions, newest date first.
    async fn list_transactions(&self) -> StoreResult<Vec<Transaction>>;

    /// Insert one transaction and return the stored record with its assigned id.
    async fn insert_transaction(&self, draft: &TransactionDraft) -> StoreResult<Transaction>;
}

#[async_trait]
pub trait GoalStore: Send + Sync {
    /// All goals, most recently created first.
    async fn list_goals(&self) -> StoreResult<Vec<SavingsGoal>>;

    /// Insert one goal; the store defaults `current_amount` and `is_completed`.
    async fn insert_goal(&self, draft: &GoalDraft) -> StoreResult<SavingsGoal>;

    /// Write `current_amount` and `is_completed` for one goal in a single update.
    /// The values are taken as given; nothing is recomputed server-side.
    async fn contribute(&self, update: &GoalContribution) -> StoreResult<()>;
}
