//! REST gateway for the hosted data service (PostgREST dialect).

use async_trait::async_trait;
use ledger_core::{
    GoalContribution, GoalDraft, RecordId, SavingsGoal, Transaction, TransactionDraft,
};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, InvalidHeaderValue};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::gateway::{GoalStore, TransactionStore};

pub const TRANSACTIONS: &str = "transactions";
pub const SAVINGS_GOALS: &str = "savings_goals";

/// Talks to `{url}/rest/v1/{resource}` with the project's access key.
#[derive(Debug, Clone)]
pub struct RestStore {
    base_url: String,
    client: Client,
}

impl RestStore {
    pub fn new(url: &str, access_key: &str) -> StoreResult<Self> {
        Self::with_client_builder(url, access_key, Client::builder())
    }

    /// Like [`RestStore::new`], starting from a caller-tuned client builder.
    /// The auth headers are installed on top of whatever the builder carries.
    pub fn with_client_builder(
        url: &str,
        access_key: &str,
        builder: ClientBuilder,
    ) -> StoreResult<Self> {
        let base_url = url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(StoreError::Config("service URL is empty".into()));
        }
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(StoreError::Config(format!(
                "service URL must start with https:// (got {base_url})"
            )));
        }

        let key = access_key.trim();
        if key.is_empty() {
            return Err(StoreError::Config("access key is empty".into()));
        }
        let invalid_key = |_: InvalidHeaderValue| {
            StoreError::Config("access key contains invalid characters".into())
        };

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(key).map_err(invalid_key)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {key}")).map_err(invalid_key)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = builder.default_headers(headers).build()?;

        Ok(Self {
            base_url: base_url.to_string(),
            client,
        })
    }

    pub fn resource_url(&self, resource: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, resource)
    }

    async fn list<T>(&self, resource: &'static str, order_column: &str) -> StoreResult<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let url = self.resource_url(resource);
        debug!("GET {} order={}.desc", url, order_column);

        let resp = self
            .client
            .get(&url)
            .query(&list_query(order_column))
            .send()
            .await?;
        let body = read_success(resp).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn insert<B, T>(&self, resource: &'static str, draft: &B) -> StoreResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = self.resource_url(resource);
        debug!("POST {}", url);

        let resp = self
            .client
            .post(&url)
            .header("Prefer", "return=representation")
            .json(&[draft])
            .send()
            .await?;
        let body = read_success(resp).await?;
        let rows: Vec<T> = serde_json::from_str(&body)?;
        first_record(rows, resource)
    }
}

#[async_trait]
impl TransactionStore for RestStore {
    async fn list_transactions(&self) -> StoreResult<Vec<Transaction>> {
        self.list(TRANSACTIONS, "date").await
    }

    async fn insert_transaction(&self, draft: &TransactionDraft) -> StoreResult<Transaction> {
        self.insert(TRANSACTIONS, draft).await
    }
}

#[async_trait]
impl GoalStore for RestStore {
    async fn list_goals(&self) -> StoreResult<Vec<SavingsGoal>> {
        self.list(SAVINGS_GOALS, "created_at").await
    }

    async fn insert_goal(&self, draft: &GoalDraft) -> StoreResult<SavingsGoal> {
        self.insert(SAVINGS_GOALS, draft).await
    }

    async fn contribute(&self, update: &GoalContribution) -> StoreResult<()> {
        let url = self.resource_url(SAVINGS_GOALS);
        debug!("PATCH {} id={}", url, update.goal_id);

        let resp = self
            .client
            .patch(&url)
            .query(&[id_filter(&update.goal_id)])
            .json(update)
            .send()
            .await?;
        read_success(resp).await?;
        Ok(())
    }
}

/// `select=*&order={column}.desc`
pub fn list_query(order_column: &str) -> [(&'static str, String); 2] {
    [
        ("select", "*".to_string()),
        ("order", format!("{order_column}.desc")),
    ]
}

/// `id=eq.{id}`
pub fn id_filter(id: &RecordId) -> (&'static str, String) {
    ("id", format!("eq.{id}"))
}

/// Take the single record an insert echoes back.
pub fn first_record<T>(rows: Vec<T>, resource: &'static str) -> StoreResult<T> {
    rows.into_iter()
        .next()
        .ok_or(StoreError::EmptyResponse(resource))
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    message: Option<String>,
    code: Option<String>,
}

/// Map a non-2xx response onto the error taxonomy.
pub fn error_from_status(status: u16, body: &str) -> StoreError {
    let trimmed = body.trim();
    let (code, message) = match serde_json::from_str::<ServiceErrorBody>(trimmed) {
        Ok(parsed) => (
            parsed.code,
            parsed.message.unwrap_or_else(|| trimmed.to_string()),
        ),
        Err(_) => (None, trimmed.to_string()),
    };
    let message = if message.is_empty() {
        format!("HTTP {status}")
    } else {
        message
    };

    match status {
        401 | 403 => StoreError::Unauthorized { status, message },
        _ => StoreError::Rejected {
            status,
            code,
            message,
        },
    }
}

async fn read_success(resp: Response) -> StoreResult<String> {
    let status = resp.status();
    let body = resp.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(error_from_status(status.as_u16(), &body))
    }
}
