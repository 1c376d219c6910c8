//! Report the adapter version. Useful for debugging and support.

use async_trait::async_trait;
use serde_json::{Value, json};

use crewlink_core::{CallContext, Tool, ToolError, ToolResponse};

pub struct GetVersionTool;

#[async_trait]
impl Tool for GetVersionTool {
    fn name(&self) -> &str {
        "get_version"
    }

    fn description(&self) -> &str {
        "Return the current Crewlink adapter version."
    }

    fn input_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    fn output_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "version": { "type": "string" }
            },
            "required": ["version"]
        })
    }

    async fn execute(&self, _ctx: &CallContext, _input: Value) -> Result<ToolResponse, ToolError> {
        Ok(ToolResponse::json(json!({
            "version": env!("CARGO_PKG_VERSION")
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_crate_version() {
        let ctx = CallContext::new("localhost:8000", "t1", "bob");
        let wire = GetVersionTool
            .execute(&ctx, json!({}))
            .await
            .unwrap()
            .to_wire();
        assert_eq!(wire["version"], env!("CARGO_PKG_VERSION"));
    }
}
