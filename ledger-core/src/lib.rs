//! ledger-core: transaction and savings-goal types plus the derived views over them

pub mod aggregate;
pub mod category;
pub mod finance;
pub mod format;
pub mod goals;
pub mod grouping;
pub mod state;

pub use aggregate::{Totals, summarize};
pub use category::{Category, KNOWN_CATEGORIES};
pub use finance::{
    DraftError, RecordId, Transaction, TransactionDraft, TxnType, coerce_amount,
    parse_amount_input,
};
pub use goals::{
    GoalContribution, GoalDraft, SavingsGoal, goal_progress, meets_target, plan_contribution,
};
pub use grouping::{CategoryGroup, group_by_category};
pub use state::{FollowUp, LedgerEvent, LedgerState, reduce};
