//! `crewlink unread` — Fetch unread messages with optional filters.

use serde_json::{json, Value};

use super::Session;

pub struct UnreadArgs {
    pub since_id: Option<i64>,
    pub sender: Option<String>,
    pub limit: Option<u32>,
    pub mention_only: bool,
    pub dm_only: bool,
    pub content_regex: Option<String>,
    pub filters: Option<String>,
}

pub async fn run(session: Session, args: UnreadArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut call = json!({});
    if let Some(id) = args.since_id {
        call["since_message_id"] = json!(id);
    }
    if let Some(sender) = args.sender {
        call["sender"] = json!(sender);
    }
    if let Some(limit) = args.limit {
        call["limit"] = json!(limit);
    }
    if args.mention_only {
        call["mention_only"] = json!(true);
    }
    if args.dm_only {
        call["dm_only"] = json!(true);
    }
    if let Some(pattern) = args.content_regex {
        call["content_regex"] = json!(pattern);
    }
    if let Some(filters) = args.filters {
        let parsed: Value =
            serde_json::from_str(&filters).map_err(|e| format!("invalid --filters JSON: {e}"))?;
        call["filters"] = parsed;
    }
    session.call("get_unread_messages", call).await
}
