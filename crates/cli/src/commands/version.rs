//! `crewlink version` — Report the adapter version via the version tool.

use serde_json::json;

use super::Session;

pub async fn run(session: Session) -> Result<(), Box<dyn std::error::Error>> {
    session.call("get_version", json!({})).await
}
