//! `crewlink recent` — Fetch the most recent messages.

use serde_json::json;

use super::Session;

pub async fn run(session: Session, limit: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    let mut args = json!({});
    if let Some(limit) = limit {
        args["limit"] = json!(limit);
    }
    session.call("get_recent_messages", args).await
}
