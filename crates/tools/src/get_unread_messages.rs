//! Fetch unread messages over REST, with optional structured filtering.
//!
//! Flat criteria go out as a plain GET; a structured `filters` value
//! (object or JSON string) switches to the POST query path. This tool
//! also declares the one legacy relocation in the system: a historical
//! top-level `from_user` moves into `filters.user` during normalization.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crewlink_backend::{FetchCriteria, RestClient};
use crewlink_core::{CallContext, InputFixup, MessageFilter, Tool, ToolError, ToolResponse};

const DEFAULT_LIMIT: u32 = 20;

const FIXUPS: [InputFixup; 1] = [InputFixup {
    source: "from_user",
    target_object: "filters",
    target_field: "user",
}];

pub struct GetUnreadMessagesTool {
    rest: RestClient,
}

impl GetUnreadMessagesTool {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GetUnreadMessagesArgs {
    #[serde(default)]
    since_message_id: Option<i64>,
    #[serde(default)]
    sender: Option<String>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    mention_only: Option<bool>,
    #[serde(default)]
    dm_only: Option<bool>,
    #[serde(default)]
    content_regex: Option<String>,
    #[serde(default)]
    filters: Option<Value>,
}

#[async_trait]
impl Tool for GetUnreadMessagesTool {
    fn name(&self) -> &str {
        "get_unread_messages"
    }

    fn description(&self) -> &str {
        "Fetch unread messages for the team from the chat backend. \
         Supports flat criteria or an advanced structured filter."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "since_message_id": {
                    "type": "integer",
                    "description": "Only messages with id greater than this"
                },
                "sender": {
                    "type": "string",
                    "description": "Only messages from this user"
                },
                "limit": {
                    "type": "integer",
                    "description": "Max number of messages to return",
                    "default": DEFAULT_LIMIT
                },
                "mention_only": {
                    "type": "boolean",
                    "description": "Only messages mentioning the calling user"
                },
                "dm_only": {
                    "type": "boolean",
                    "description": "Only direct messages"
                },
                "content_regex": {
                    "type": "string",
                    "description": "Only messages matching this regex"
                },
                "filters": {
                    "type": "object",
                    "description": "Advanced message filter (all fields optional); accepts a JSON object or string"
                }
            }
        })
    }

    fn output_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "messages": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer" },
                            "user": { "type": "string" },
                            "message": { "type": "string" },
                            "timestamp": { "type": "string" },
                            "channel": { "type": "string" }
                        }
                    }
                }
            }
        })
    }

    fn input_fixups(&self) -> &[InputFixup] {
        &FIXUPS
    }

    async fn execute(&self, ctx: &CallContext, input: Value) -> Result<ToolResponse, ToolError> {
        let args: GetUnreadMessagesArgs = serde_json::from_value(input)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let filter = args.filters.as_ref().map(MessageFilter::from_value);
        if let Some(f) = &filter {
            debug!(filter = ?f, "canonicalized structured filter");
        }

        let criteria = FetchCriteria {
            filter,
            since_message_id: args.since_message_id,
            sender: args.sender,
            limit: Some(args.limit.unwrap_or(DEFAULT_LIMIT)),
            mention_only: args.mention_only.unwrap_or(false),
            dm_only: args.dm_only.unwrap_or(false),
            content_regex: args.content_regex,
        };

        let output = match self.rest.fetch(ctx, &criteria).await {
            Ok(messages) => json!({ "messages": messages }),
            Err(e) => json!({ "status": "error", "detail": e.to_string() }),
        };
        Ok(ToolResponse::json(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(host: &str) -> CallContext {
        CallContext::new(host, "t24", "bob")
    }

    #[tokio::test]
    async fn flat_args_fetch_over_get() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/team/t24/messages")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("since_message_id".into(), "5".into()),
                mockito::Matcher::UrlEncoded("limit".into(), "20".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({"messages": [
                    {"id": 6, "user": "alice", "message": "hi", "timestamp": "2026-08-28T10:00:00Z"}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let tool = GetUnreadMessagesTool::new(RestClient::new());
        let response = tool
            .execute(&ctx(&server.host_with_port()), json!({"since_message_id": 5}))
            .await
            .unwrap();

        mock.assert_async().await;
        let wire = response.to_wire();
        assert_eq!(wire["messages"][0]["user"], "alice");
    }

    #[tokio::test]
    async fn structured_filter_fetches_over_post_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/team/t24/messages/query")
            .match_body(mockito::Matcher::PartialJson(json!({"user": "alice"})))
            .with_status(200)
            .with_body(json!({"messages": []}).to_string())
            .create_async()
            .await;

        let tool = GetUnreadMessagesTool::new(RestClient::new());
        tool.execute(
            &ctx(&server.host_with_port()),
            json!({"filters": {"user": "alice"}}),
        )
        .await
        .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn filter_as_json_string_is_canonicalized() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/team/t24/messages/query")
            .match_body(mockito::Matcher::PartialJson(json!({"dm_only": true})))
            .with_status(200)
            .with_body(json!({"messages": []}).to_string())
            .create_async()
            .await;

        let tool = GetUnreadMessagesTool::new(RestClient::new());
        tool.execute(
            &ctx(&server.host_with_port()),
            json!({"filters": r#"{"dm_only": true}"#}),
        )
        .await
        .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn undecodable_filter_falls_back_to_plain_get() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/team/t24/messages")
            .match_query(mockito::Matcher::UrlEncoded("limit".into(), "20".into()))
            .with_status(200)
            .with_body(json!({"messages": []}).to_string())
            .create_async()
            .await;

        let tool = GetUnreadMessagesTool::new(RestClient::new());
        tool.execute(
            &ctx(&server.host_with_port()),
            json!({"filters": "definitely not json"}),
        )
        .await
        .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn backend_failure_is_structured_error() {
        let tool = GetUnreadMessagesTool::new(RestClient::new());
        let response = tool.execute(&ctx("127.0.0.1:1"), json!({})).await.unwrap();
        let wire = response.to_wire();
        assert_eq!(wire["status"], "error");
    }

    #[test]
    fn declares_from_user_fixup() {
        let tool = GetUnreadMessagesTool::new(RestClient::new());
        let fixups = tool.input_fixups();
        assert_eq!(fixups.len(), 1);
        assert_eq!(fixups[0].source, "from_user");
        assert_eq!(fixups[0].target_object, "filters");
        assert_eq!(fixups[0].target_field, "user");
    }
}
