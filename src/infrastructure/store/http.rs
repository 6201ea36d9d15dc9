//! Remote log store client
//!
//! Speaks the store's REST dialect over reqwest:
//!
//! - `GET {base}/logs` with filter/sort/page query parameters, returning
//!   `{ "entries": [...], "total": n }`
//! - `GET {base}/logs/status-counts?start=..&end=..`, returning
//!   `[{ "status": ".." }, ...]`
//! - `POST {base}/orders/status` with a JSON body, the order-mutation
//!   authority endpoint
//!
//! Requests carry the API key as a bearer token. The client has a 30 second
//! timeout so a hung store request resolves as a failure instead of leaving
//! the controllers loading forever.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::domain::{DomainError, LogFilter, LogPage, LogSort, LogStore, OrderAuthority};
use crate::models::OrderStatus;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpLogStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpLogStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn query_params(filter: &LogFilter, sort: &LogSort, page: u64, page_size: u64) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", page.to_string()),
            ("page_size", page_size.to_string()),
            ("sort_by", sort.column.as_str().to_string()),
            ("ascending", sort.ascending.to_string()),
        ];
        if let Some(range) = &filter.date_range {
            params.push(("start", rfc3339(range.start)));
            params.push(("end", rfc3339(range.end)));
        }
        if let Some(v) = &filter.from_address {
            params.push(("from_address", v.clone()));
        }
        if let Some(v) = &filter.file_name {
            params.push(("file_name", v.clone()));
        }
        if let Some(v) = &filter.stage {
            params.push(("stage", v.clone()));
        }
        if let Some(v) = &filter.status {
            params.push(("status", v.clone()));
        }
        params
    }
}

fn rfc3339(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Deserialize)]
struct StatusRow {
    status: String,
}

#[derive(Debug, Deserialize)]
struct RejectionBody {
    error: String,
}

#[async_trait]
impl LogStore for HttpLogStore {
    async fn query_logs(
        &self,
        filter: &LogFilter,
        sort: &LogSort,
        page: u64,
        page_size: u64,
    ) -> Result<LogPage, DomainError> {
        let url = format!("{}/logs", self.base_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&Self::query_params(filter, sort, page, page_size))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(DomainError::QueryFailed(format!(
                "Log store returned status {}",
                resp.status()
            )));
        }

        let body: LogPage = resp
            .json()
            .await
            .map_err(|e| DomainError::QueryFailed(format!("Failed to parse response: {}", e)))?;
        Ok(body)
    }

    async fn query_status_counts(
        &self,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> Result<Vec<String>, DomainError> {
        let url = format!("{}/logs/status-counts", self.base_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&[("start", rfc3339(day_start)), ("end", rfc3339(day_end))])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(DomainError::QueryFailed(format!(
                "Log store returned status {}",
                resp.status()
            )));
        }

        let rows: Vec<StatusRow> = resp
            .json()
            .await
            .map_err(|e| DomainError::QueryFailed(format!("Failed to parse response: {}", e)))?;
        Ok(rows.into_iter().map(|r| r.status).collect())
    }
}

#[async_trait]
impl OrderAuthority for HttpLogStore {
    async fn set_order_status(
        &self,
        log_id: &str,
        status: OrderStatus,
        linked_order_ref: &str,
    ) -> Result<(), DomainError> {
        let url = format!("{}/orders/status", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "log_id": log_id,
                "order_status": status.as_str(),
                "linked_order_ref": linked_order_ref,
            }))
            .send()
            .await
            .map_err(|e| DomainError::MutationFailed(e.to_string()))?;

        let code = resp.status();
        if code.is_success() {
            return Ok(());
        }

        if code.is_client_error() {
            // The authority explains its refusals in the body.
            let reason = match resp.json::<RejectionBody>().await {
                Ok(body) => body.error,
                Err(_) => format!("Authority returned status {}", code),
            };
            return Err(DomainError::MutationRejected(reason));
        }

        Err(DomainError::MutationFailed(format!(
            "Authority returned status {}",
            code
        )))
    }
}
