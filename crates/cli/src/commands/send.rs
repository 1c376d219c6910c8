//! `crewlink send` — Post a message to the team channel.

use serde_json::json;

use super::Session;

pub async fn run(
    session: Session,
    message: String,
    reply_to: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut args = json!({ "message": message });
    if let Some(user) = reply_to {
        args["reply_to_user"] = json!(user);
    }
    session.call("send_message", args).await
}
