//! `crewlink wait` — Block until a matching message arrives (or time out).

use serde_json::{json, Value};

use super::Session;

pub async fn run(
    session: Session,
    filters: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut args = json!({});
    if let Some(filters) = filters {
        let parsed: Value =
            serde_json::from_str(&filters).map_err(|e| format!("invalid --filters JSON: {e}"))?;
        args["filters"] = parsed;
    }
    args["timeout_secs"] = json!(timeout_secs.unwrap_or(session.config.wait_timeout_secs));
    session.call("wait_for_message", args).await
}
