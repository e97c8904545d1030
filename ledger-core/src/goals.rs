//! Savings goals and progress math

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::finance::{DraftError, RecordId, lenient_amount, parse_amount_input};

/// A persisted savings goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub target_amount: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub current_amount: f64,
    /// Persisted flag; kept equal to `current_amount >= target_amount` on every write.
    #[serde(default)]
    pub is_completed: bool,
    /// Server timestamp; only used for ordering, so an unreadable value becomes `None`.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub emoji: Option<String>,
}

impl SavingsGoal {
    /// Unrounded progress percentage, capped at 100.
    pub fn progress(&self) -> f64 {
        goal_progress(self.current_amount, self.target_amount)
    }

    /// Whether the current amount reaches the target.
    pub fn meets_target(&self) -> bool {
        meets_target(self.current_amount, self.target_amount)
    }
}

/// Payload for a new goal. Current amount and completion are left to server defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalDraft {
    pub name: String,
    pub target_amount: f64,
}

impl GoalDraft {
    /// Build from the two prompt answers. Both must be present.
    pub fn new(name: &str, target: &str) -> Result<Self, DraftError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }
        let target_amount = parse_amount_input(target).ok_or(DraftError::MissingAmount)?;
        Ok(Self {
            name: name.to_string(),
            target_amount,
        })
    }
}

/// Field update sent for a contribution: the new running total plus the recomputed flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalContribution {
    #[serde(skip)]
    pub goal_id: RecordId,
    pub current_amount: f64,
    pub is_completed: bool,
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let raw = value.as_ref().and_then(Value::as_str);
    Ok(raw.and_then(|s| {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|n| n.and_utc())
            })
    }))
}

/// `min(current / target * 100, 100)`.
///
/// No lower clamp: a negative current amount gives a negative percentage.
/// A zero target is outside the valid domain and the result is unspecified.
pub fn goal_progress(current_amount: f64, target_amount: f64) -> f64 {
    (current_amount / target_amount * 100.0).min(100.0)
}

pub fn meets_target(current_amount: f64, target_amount: f64) -> bool {
    current_amount >= target_amount
}

/// Derive the update for adding `contribution` to `goal`.
///
/// The completion flag is computed here, on the client, from the goal as last read.
/// The store performs a plain field write, so two clients contributing at once can
/// overwrite each other's total; an atomic server-side increment would close that gap.
pub fn plan_contribution(goal: &SavingsGoal, contribution: f64) -> GoalContribution {
    let current_amount = goal.current_amount + contribution;
    GoalContribution {
        goal_id: goal.id.clone(),
        current_amount,
        is_completed: meets_target(current_amount, goal.target_amount),
    }
}
