//! Transaction record types

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::category::Category;

/// Server-assigned record identifier.
///
/// The hosted store may hand back integer or UUID keys; both are kept as text and
/// only ever echoed back in filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => RecordId(n.to_string()),
            Raw::Text(s) => RecordId(s),
        })
    }
}

/// Direction of a transaction. Amounts are stored unsigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Income,
    #[default]
    Expense,
    /// A type string this client does not know; counted in neither total.
    #[serde(other)]
    Unrecognized,
}

impl TxnType {
    /// Sign prefix used when listing the transaction.
    pub fn sign(&self) -> char {
        match self {
            TxnType::Income => '+',
            _ => '-',
        }
    }
}

/// A persisted income/expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    /// A missing or null type decodes as [`TxnType::Unrecognized`].
    #[serde(
        rename = "type",
        default = "unrecognized_kind",
        deserialize_with = "lenient_kind"
    )]
    pub kind: TxnType,
    /// A missing or null label decodes as an empty [`Category::Other`].
    #[serde(default = "unlabelled", deserialize_with = "lenient_category")]
    pub category: Category,
    /// Day the record was submitted (YYYY-MM-DD). `None` when absent or unreadable.
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
}

impl Transaction {
    /// The date as listed, blank when unknown.
    pub fn date_label(&self) -> String {
        self.date.map(|d| d.to_string()).unwrap_or_default()
    }

    pub fn is_income(&self) -> bool {
        self.kind == TxnType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TxnType::Expense
    }
}

/// Client-built payload for a new transaction; the store assigns `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TxnType,
    pub category: Category,
    pub date: NaiveDate,
}

impl TransactionDraft {
    /// Build a draft after the presence checks the entry form performs.
    pub fn new(
        name: &str,
        amount: Option<f64>,
        kind: TxnType,
        category: Category,
        date: NaiveDate,
    ) -> Result<Self, DraftError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }
        let amount = amount
            .filter(|a| a.is_finite())
            .ok_or(DraftError::MissingAmount)?;

        Ok(Self {
            name: name.to_string(),
            amount,
            kind,
            category,
            date,
        })
    }
}

/// Presence-check failure on a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    MissingName,
    MissingAmount,
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingName => write!(f, "a name is required"),
            DraftError::MissingAmount => write!(f, "an amount is required"),
        }
    }
}

impl std::error::Error for DraftError {}

/// Parse a free-text amount field. Blank or non-numeric input yields `None`.
pub fn parse_amount_input(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
}

/// Coerce a wire value into an amount. Anything non-numeric counts as zero.
pub fn coerce_amount(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|a| a.is_finite()).unwrap_or(0.0)
}

pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_amount).unwrap_or(0.0))
}

fn unrecognized_kind() -> TxnType {
    TxnType::Unrecognized
}

fn unlabelled() -> Category {
    Category::Other(String::new())
}

fn lenient_kind<'de, D>(deserializer: D) -> Result<TxnType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value.as_ref().and_then(Value::as_str) {
        Some("income") => TxnType::Income,
        Some("expense") => TxnType::Expense,
        _ => TxnType::Unrecognized,
    })
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(label)) => Category::from(label),
        _ => unlabelled(),
    })
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.get(..10))
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_decode_transaction_row() {
        let row = json!({
            "id": 7,
            "name": "Coffee",
            "amount": 4.5,
            "type": "expense",
            "category": "🍔",
            "date": "2024-01-01"
        });
        let t: Transaction = serde_json::from_value(row).unwrap();
        assert_eq!(t.id, RecordId::new("7"));
        assert_eq!(t.amount, 4.5);
        assert!(t.is_expense());
        assert_eq!(t.category, Category::Food);
        assert_eq!(t.date, Some(day()));
        assert_eq!(t.date_label(), "2024-01-01");
    }

    #[test]
    fn test_null_fields_do_not_drop_the_list() {
        let rows = json!([
            {
                "id": 1,
                "name": "Coffee",
                "amount": 4.5,
                "type": "expense",
                "category": "🍔",
                "date": "2024-01-02"
            },
            {
                "id": 2,
                "name": "Mystery",
                "amount": 10,
                "type": null,
                "category": null,
                "date": null
            },
            {
                "id": 3,
                "name": "Bare",
                "amount": 1
            }
        ]);
        let list: Vec<Transaction> = serde_json::from_value(rows).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].category, Category::Food);
        assert!(list[0].is_expense());

        for t in &list[1..] {
            assert_eq!(t.kind, TxnType::Unrecognized);
            assert_eq!(t.category, Category::Other(String::new()));
            assert_eq!(t.category.display_name(), "Other");
            assert_eq!(t.date, None);
            assert_eq!(t.date_label(), "");
        }
    }

    #[test]
    fn test_timestamp_date_keeps_calendar_day() {
        let row = json!({
            "id": 4,
            "type": "income",
            "category": "💰",
            "date": "2024-03-05T08:00:00+00:00"
        });
        let t: Transaction = serde_json::from_value(row).unwrap();
        assert_eq!(t.date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert!(t.is_income());
    }

    #[test]
    fn test_decode_coerces_bad_amounts_to_zero() {
        for amount in [json!("abc"), json!(null), json!(true), json!({})] {
            let row = json!({
                "id": "a1",
                "name": "Odd",
                "amount": amount,
                "type": "income",
                "category": "💰",
                "date": "2024-01-01"
            });
            let t: Transaction = serde_json::from_value(row).unwrap();
            assert_eq!(t.amount, 0.0);
        }

        let missing = json!({
            "id": "a2",
            "type": "income",
            "category": "💰",
            "date": "2024-01-01"
        });
        let t: Transaction = serde_json::from_value(missing).unwrap();
        assert_eq!(t.amount, 0.0);
        assert_eq!(t.name, "");
    }

    #[test]
    fn test_decode_numeric_string_amount() {
        assert_eq!(coerce_amount(&json!("12.25")), 12.25);
        assert_eq!(coerce_amount(&json!(" 3 ")), 3.0);
    }

    #[test]
    fn test_unknown_type_is_unrecognized() {
        let t: TxnType = serde_json::from_value(json!("transfer")).unwrap();
        assert_eq!(t, TxnType::Unrecognized);
        assert_eq!(t.sign(), '-');
        assert_eq!(TxnType::Income.sign(), '+');
    }

    #[test]
    fn test_draft_presence_checks() {
        let err = TransactionDraft::new("  ", Some(1.0), TxnType::Expense, Category::Food, day());
        assert_eq!(err, Err(DraftError::MissingName));

        let err = TransactionDraft::new("Lunch", None, TxnType::Expense, Category::Food, day());
        assert_eq!(err, Err(DraftError::MissingAmount));

        let ok = TransactionDraft::new("Lunch", Some(12.0), TxnType::Expense, Category::Food, day())
            .unwrap();
        assert_eq!(ok.name, "Lunch");
    }

    #[test]
    fn test_draft_serializes_wire_fields() {
        let d = TransactionDraft::new("Coffee", Some(4.5), TxnType::Expense, Category::Food, day())
            .unwrap();
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(
            v,
            json!({
                "name": "Coffee",
                "amount": 4.5,
                "type": "expense",
                "category": "🍔",
                "date": "2024-01-01"
            })
        );
    }

    #[test]
    fn test_parse_amount_input() {
        assert_eq!(parse_amount_input("4.5"), Some(4.5));
        assert_eq!(parse_amount_input(""), None);
        assert_eq!(parse_amount_input("ten"), None);
        assert_eq!(parse_amount_input("NaN"), None);
    }
}
