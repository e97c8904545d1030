//! ledger-store: gateways to the hosted transaction and savings-goal tables

pub mod error;
pub mod gateway;
pub mod rest;

pub use error::{StoreError, StoreResult};
pub use gateway::{GoalStore, TransactionStore};
pub use rest::{RestStore, SAVINGS_GOALS, TRANSACTIONS};
