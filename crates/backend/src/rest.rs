//! REST client for fetching messages.
//!
//! Two request shapes, never mixed in one call:
//! - no structured filter → `GET /api/team/{team_id}/messages` with flat
//!   query parameters;
//! - any structured filter set → `POST /api/team/{team_id}/messages/query`
//!   with the full filter as the JSON body.
//!
//! Transport failures and non-success statuses surface as
//! [`BackendError`] at this boundary; there are no retries.

use serde::Deserialize;
use tracing::debug;

use crewlink_core::{BackendError, CallContext, ChatMessage, MessageFilter};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Flat fetch criteria for the plain GET path.
///
/// A set `filter` switches the call to the structured POST path and the
/// flat fields are ignored — the two shapes never combine.
#[derive(Debug, Clone, Default)]
pub struct FetchCriteria {
    pub filter: Option<MessageFilter>,
    pub since_message_id: Option<i64>,
    pub sender: Option<String>,
    pub limit: Option<u32>,
    pub mention_only: bool,
    pub dm_only: bool,
    pub content_regex: Option<String>,
}

impl FetchCriteria {
    /// Criteria carrying only a limit — the "recent messages" read.
    pub fn recent(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    fn structured_filter(&self) -> Option<&MessageFilter> {
        self.filter.as_ref().filter(|f| !f.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct MessagesEnvelope {
    #[serde(default)]
    messages: Vec<ChatMessage>,
}

/// HTTP client for the backend's message endpoints.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
}

impl RestClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");
        Self { http }
    }

    /// Fetch messages for the context's team.
    pub async fn fetch(
        &self,
        ctx: &CallContext,
        criteria: &FetchCriteria,
    ) -> Result<Vec<ChatMessage>, BackendError> {
        let base = format!(
            "http://{}/api/team/{}/messages",
            ctx.backend_host, ctx.team_id
        );

        let response = match criteria.structured_filter() {
            Some(filter) => {
                let url = format!("{base}/query");
                debug!(url = %url, "querying messages with structured filter");
                self.http.post(&url).json(filter).send().await
            }
            None => {
                let params = Self::query_params(criteria);
                debug!(url = %base, params = ?params, "fetching messages");
                self.http.get(&base).query(&params).send().await
            }
        }
        .map_err(|e| BackendError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let envelope: MessagesEnvelope = response
            .json()
            .await
            .map_err(|e| BackendError::Protocol(e.to_string()))?;
        Ok(envelope.messages)
    }

    fn query_params(criteria: &FetchCriteria) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(id) = criteria.since_message_id {
            params.push(("since_message_id", id.to_string()));
        }
        if let Some(sender) = &criteria.sender {
            params.push(("sender", sender.clone()));
        }
        if let Some(limit) = criteria.limit {
            params.push(("limit", limit.to_string()));
        }
        if criteria.mention_only {
            params.push(("mention_only", "true".into()));
        }
        if criteria.dm_only {
            params.push(("dm_only", "true".into()));
        }
        if let Some(pattern) = &criteria.content_regex {
            params.push(("content_regex", pattern.clone()));
        }
        params
    }
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new()
    }
}
