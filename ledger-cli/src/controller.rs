//! Presentation controller: owns the ledger state and drives the store gateways.

use chrono::NaiveDate;
use ledger_core::{
    Category, DraftError, FollowUp, GoalContribution, GoalDraft, LedgerEvent, LedgerState,
    RecordId, SavingsGoal, Transaction, TransactionDraft, TxnType, parse_amount_input,
    plan_contribution, reduce,
};
use ledger_store::{GoalStore, StoreError, TransactionStore};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("{0}")]
    Draft(#[from] DraftError),
    #[error("no savings goal with id {0}")]
    UnknownGoal(RecordId),
    #[error("Failed to add transaction. Check your Supabase connection.")]
    TransactionNotSaved(#[source] StoreError),
    #[error("failed to add savings goal: {0}")]
    GoalNotSaved(#[source] StoreError),
    #[error("failed to update savings goal: {0}")]
    ContributionNotSaved(#[source] StoreError),
}

/// The new-transaction form. Defaults to an expense in Shopping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionForm {
    pub name: String,
    pub amount: String,
    pub kind: TxnType,
    pub category: Category,
}

impl TransactionForm {
    pub fn to_draft(&self, today: NaiveDate) -> Result<TransactionDraft, DraftError> {
        TransactionDraft::new(
            &self.name,
            parse_amount_input(&self.amount),
            self.kind,
            self.category.clone(),
            today,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContributionOutcome {
    /// Blank or non-numeric input; nothing was sent.
    Skipped,
    /// The update was stored. `refreshed` is false when the goal list could not be
    /// re-read afterwards, so the local goals still show the old total.
    Recorded {
        update: GoalContribution,
        refreshed: bool,
    },
}

pub struct Controller {
    transactions: Arc<dyn TransactionStore>,
    goals: Arc<dyn GoalStore>,
    state: LedgerState,
}

impl Controller {
    pub fn new(transactions: Arc<dyn TransactionStore>, goals: Arc<dyn GoalStore>) -> Self {
        Self {
            transactions,
            goals,
            state: LedgerState::initial(),
        }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    fn apply(&mut self, event: LedgerEvent) -> FollowUp {
        let (next, follow_up) = reduce(&self.state, event);
        self.state = next;
        follow_up
    }

    /// Fetch both lists. A failed read is logged and leaves that list as it was.
    pub async fn load(&mut self) {
        self.apply(LedgerEvent::TransactionsRequested);

        let (transactions, goals) = tokio::join!(
            self.transactions.list_transactions(),
            self.goals.list_goals()
        );

        match transactions {
            Ok(list) => {
                info!("Loaded {} transactions", list.len());
                self.apply(LedgerEvent::TransactionsLoaded(list));
            }
            Err(e) => {
                error!("Error fetching transactions: {e}");
                self.apply(LedgerEvent::TransactionsFailed);
            }
        }

        self.apply_goal_list(goals);
    }

    /// Re-read every goal. Returns false if the read failed and the list is stale.
    pub async fn refresh_goals(&mut self) -> bool {
        let goals = self.goals.list_goals().await;
        self.apply_goal_list(goals)
    }

    fn apply_goal_list(&mut self, goals: Result<Vec<SavingsGoal>, StoreError>) -> bool {
        match goals {
            Ok(list) => {
                info!("Loaded {} savings goals", list.len());
                self.apply(LedgerEvent::GoalsLoaded(list));
                true
            }
            Err(e) => {
                error!("Error fetching savings: {e}");
                false
            }
        }
    }

    /// Insert the form's transaction and prepend the stored record.
    /// The form is reset only when the insert succeeds.
    pub async fn submit_transaction(
        &mut self,
        form: &mut TransactionForm,
        today: NaiveDate,
    ) -> Result<Transaction, ControllerError> {
        let draft = form.to_draft(today)?;

        let saved = match self.transactions.insert_transaction(&draft).await {
            Ok(t) => t,
            Err(e) => {
                error!("Error adding transaction: {e}");
                return Err(ControllerError::TransactionNotSaved(e));
            }
        };

        info!("Added transaction {} ({})", saved.id, saved.name);
        self.apply(LedgerEvent::TransactionInserted(saved.clone()));
        *form = TransactionForm::default();
        Ok(saved)
    }

    pub async fn add_goal(
        &mut self,
        name: &str,
        target: &str,
    ) -> Result<SavingsGoal, ControllerError> {
        let draft = GoalDraft::new(name, target)?;

        let saved = match self.goals.insert_goal(&draft).await {
            Ok(g) => g,
            Err(e) => {
                error!("Error adding goal: {e}");
                return Err(ControllerError::GoalNotSaved(e));
            }
        };

        info!("Added savings goal {} ({})", saved.id, saved.name);
        self.apply(LedgerEvent::GoalInserted(saved.clone()));
        Ok(saved)
    }

    /// Add `input` to a goal's running total, then re-read every goal.
    pub async fn contribute(
        &mut self,
        goal_id: &RecordId,
        input: &str,
    ) -> Result<ContributionOutcome, ControllerError> {
        let Some(amount) = parse_amount_input(input) else {
            return Ok(ContributionOutcome::Skipped);
        };

        let goal = self
            .state
            .find_goal(goal_id)
            .ok_or_else(|| ControllerError::UnknownGoal(goal_id.clone()))?;
        let update = plan_contribution(goal, amount);

        if let Err(e) = self.goals.contribute(&update).await {
            error!("Error updating goal: {e}");
            return Err(ControllerError::ContributionNotSaved(e));
        }

        info!(
            "Goal {} now at {} (completed: {})",
            update.goal_id, update.current_amount, update.is_completed
        );
        let refreshed = match self.apply(LedgerEvent::ContributionSaved) {
            FollowUp::RefreshGoals => self.refresh_goals().await,
            FollowUp::Nothing => true,
        };
        Ok(ContributionOutcome::Recorded { update, refreshed })
    }
}
