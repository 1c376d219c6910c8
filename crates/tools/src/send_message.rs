//! Send a message to the team chat over the socket.
//!
//! With a `reply_to_user` hint the tool injects a `@<user>` mention into
//! the outgoing body unless that exact token is already present
//! (case-insensitive). The injection is purely textual — no backend
//! round-trip.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crewlink_backend::socket;
use crewlink_core::{CallContext, Tool, ToolError, ToolResponse};

pub struct SendMessageTool;

#[derive(Debug, Deserialize)]
struct SendMessageArgs {
    message: String,
    #[serde(default)]
    reply_to_user: Option<String>,
}

/// Prepend `@<reply_to>` unless the message already mentions that user.
fn inject_mention(message: &str, reply_to: &str) -> String {
    let mention = format!("@{reply_to}");
    if message.to_lowercase().contains(&mention.to_lowercase()) {
        message.to_string()
    } else {
        format!("{mention} {message}")
    }
}

#[async_trait]
impl Tool for SendMessageTool {
    fn name(&self) -> &str {
        "send_message"
    }

    fn description(&self) -> &str {
        "Send a message to the team chat as the calling user. \
         Optionally mentions a user if not already mentioned."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "Message content"
                },
                "reply_to_user": {
                    "type": "string",
                    "description": "If set, mention this user in the message unless already present"
                }
            },
            "required": ["message"]
        })
    }

    fn output_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "status": { "type": "string", "description": "success or error" },
                "detail": { "type": "string" }
            },
            "required": ["status"]
        })
    }

    async fn execute(&self, ctx: &CallContext, input: Value) -> Result<ToolResponse, ToolError> {
        let args: SendMessageArgs = serde_json::from_value(input)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let message = match args.reply_to_user.as_deref() {
            Some(reply_to) if !reply_to.is_empty() => inject_mention(&args.message, reply_to),
            _ => args.message,
        };

        // Transport failure is a structured error result, not a raised
        // error — the caller always gets a status.
        let output = match socket::send_message(ctx, &ctx.user, &message).await {
            Ok(()) => json!({ "status": "success" }),
            Err(e) => json!({ "status": "error", "detail": e.to_string() }),
        };
        Ok(ToolResponse::json(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mention_injected_when_absent() {
        assert_eq!(inject_mention("hi", "alice"), "@alice hi");
    }

    #[test]
    fn mention_not_duplicated() {
        assert_eq!(inject_mention("hi @alice", "alice"), "hi @alice");
    }

    #[test]
    fn mention_containment_is_case_insensitive() {
        assert_eq!(inject_mention("hi @Alice", "alice"), "hi @Alice");
        assert_eq!(inject_mention("hi @alice", "Alice"), "hi @alice");
    }

    #[tokio::test]
    async fn unreachable_backend_yields_structured_error() {
        let ctx = CallContext::new("127.0.0.1:1", "t1", "bob");
        let response = SendMessageTool
            .execute(&ctx, json!({"message": "hello"}))
            .await
            .unwrap();
        let wire = response.to_wire();
        assert_eq!(wire["status"], "error");
        assert!(wire["detail"].as_str().unwrap().len() > 0);
    }

    #[tokio::test]
    async fn missing_message_is_invalid_arguments() {
        let ctx = CallContext::new("127.0.0.1:1", "t1", "bob");
        let err = SendMessageTool.execute(&ctx, json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
