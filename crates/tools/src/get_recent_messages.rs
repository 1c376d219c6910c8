//! Fetch the most recent messages over a plain GET.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crewlink_backend::{FetchCriteria, RestClient};
use crewlink_core::{CallContext, Tool, ToolError, ToolResponse};

const DEFAULT_LIMIT: u32 = 20;

pub struct GetRecentMessagesTool {
    rest: RestClient,
}

impl GetRecentMessagesTool {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[derive(Debug, Deserialize)]
struct GetRecentMessagesArgs {
    #[serde(default)]
    limit: Option<u32>,
}

#[async_trait]
impl Tool for GetRecentMessagesTool {
    fn name(&self) -> &str {
        "get_recent_messages"
    }

    fn description(&self) -> &str {
        "Fetch the most recent messages for the team from the chat backend."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "description": "Max number of messages to return",
                    "default": DEFAULT_LIMIT
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
                    "items": { "type": "object" }
                }
            }
        })
    }

    async fn execute(&self, ctx: &CallContext, input: Value) -> Result<ToolResponse, ToolError> {
        let args: GetRecentMessagesArgs = serde_json::from_value(input)
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        let criteria = FetchCriteria::recent(args.limit.unwrap_or(DEFAULT_LIMIT));
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

    #[tokio::test]
    async fn fetches_with_limit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/team/t24/messages")
            .match_query(mockito::Matcher::UrlEncoded("limit".into(), "3".into()))
            .with_status(200)
            .with_body(
                json!({"messages": [
                    {"id": 1, "user": "a", "message": "one"},
                    {"id": 2, "user": "b", "message": "two"},
                    {"id": 3, "user": "c", "message": "three"}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let ctx = CallContext::new(server.host_with_port(), "t24", "bob");
        let tool = GetRecentMessagesTool::new(RestClient::new());
        let response = tool.execute(&ctx, json!({"limit": 3})).await.unwrap();

        mock.assert_async().await;
        let wire = response.to_wire();
        assert_eq!(wire["messages"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn limit_defaults_to_twenty() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/team/t24/messages")
            .match_query(mockito::Matcher::UrlEncoded("limit".into(), "20".into()))
            .with_status(200)
            .with_body(json!({"messages": []}).to_string())
            .create_async()
            .await;

        let ctx = CallContext::new(server.host_with_port(), "t24", "bob");
        let tool = GetRecentMessagesTool::new(RestClient::new());
        tool.execute(&ctx, json!({})).await.unwrap();
        mock.assert_async().await;
    }
}
