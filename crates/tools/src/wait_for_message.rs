//! Wait for the next message matching a filter on the live stream.
//!
//! Thin wrapper over the wait dispatch loop in `crewlink-backend`. All
//! three terminal states come back as structured results: `success`
//! carries the message fields, `timeout` and `error` carry a detail
//! string. Nothing raises past this tool.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crewlink_backend::{WaitOutcome, wait_for_message};
use crewlink_core::{CallContext, MessageFilter, Tool, ToolError, ToolResponse};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct WaitForMessageTool;

#[derive(Debug, Deserialize)]
struct WaitForMessageArgs {
    #[serde(default)]
    filters: Option<Value>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Serialize)]
struct WaitForMessageOutput {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl WaitForMessageOutput {
    fn from_outcome(outcome: WaitOutcome) -> Self {
        match outcome {
            WaitOutcome::Matched(m) => Self {
                status: "success",
                id: m.id,
                user: Some(m.user),
                message: Some(m.message),
                timestamp: m.timestamp,
                channel: m.channel,
                detail: None,
            },
            WaitOutcome::TimedOut => Self {
                status: "timeout",
                id: None,
                user: None,
                message: None,
                timestamp: None,
                channel: None,
                detail: Some("No matching message received in time.".into()),
            },
            WaitOutcome::ConnectionFailed(detail) => Self {
                status: "error",
                id: None,
                user: None,
                message: None,
                timestamp: None,
                channel: None,
                detail: Some(detail),
            },
        }
    }
}

#[async_trait]
impl Tool for WaitForMessageTool {
    fn name(&self) -> &str {
        "wait_for_message"
    }

    fn description(&self) -> &str {
        "Wait for a message matching the given filter on the team chat \
         stream, up to a timeout."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filters": {
                    "type": "object",
                    "description": "Advanced message filter (all fields optional); accepts a JSON object or string"
                },
                "timeout_secs": {
                    "type": "integer",
                    "description": "Total time budget to wait for a match, in seconds",
                    "default": DEFAULT_TIMEOUT_SECS
                }
            }
        })
    }

    fn output_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "status": { "type": "string", "description": "success, timeout, or error" },
                "id": { "type": "integer" },
                "user": { "type": "string" },
                "message": { "type": "string" },
                "timestamp": { "type": "string" },
                "channel": { "type": "string" },
                "detail": { "type": "string" }
            },
            "required": ["status"]
        })
    }

    async fn execute(&self, ctx: &CallContext, input: Value) -> Result<ToolResponse, ToolError> {
        let args: WaitForMessageArgs = serde_json::from_value(input)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let filter = args
            .filters
            .as_ref()
            .map(MessageFilter::from_value)
            .unwrap_or_default();
        let timeout =
            std::time::Duration::from_secs(args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        let outcome = wait_for_message(ctx, &filter, timeout).await;
        let output = WaitForMessageOutput::from_outcome(outcome);
        ToolResponse::from_output(&output).map_err(|e| ToolError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crewlink_core::ChatMessage;

    #[test]
    fn matched_outcome_maps_to_success() {
        let output = WaitForMessageOutput::from_outcome(WaitOutcome::Matched(ChatMessage {
            id: None,
            user: "alice".into(),
            message: "hi @bob".into(),
            timestamp: None,
            channel: Some("general".into()),
        }));
        let wire = serde_json::to_value(&output).unwrap();
        assert_eq!(wire["status"], "success");
        assert_eq!(wire["user"], "alice");
        assert_eq!(wire["channel"], "general");
        // not echoed by the backend on the stream path
        assert!(wire.get("id").is_none());
        assert!(wire.get("timestamp").is_none());
    }

    #[test]
    fn timeout_outcome_is_distinct_from_error() {
        let timeout = serde_json::to_value(WaitForMessageOutput::from_outcome(
            WaitOutcome::TimedOut,
        ))
        .unwrap();
        assert_eq!(timeout["status"], "timeout");

        let error = serde_json::to_value(WaitForMessageOutput::from_outcome(
            WaitOutcome::ConnectionFailed("refused".into()),
        ))
        .unwrap();
        assert_eq!(error["status"], "error");
        assert_eq!(error["detail"], "refused");
    }

    #[tokio::test]
    async fn unreachable_backend_yields_structured_error() {
        let ctx = CallContext::new("127.0.0.1:1", "t1", "bob");
        let response = WaitForMessageTool
            .execute(&ctx, json!({"timeout_secs": 1}))
            .await
            .unwrap();
        let wire = response.to_wire();
        assert_eq!(wire["status"], "error");
    }
}
