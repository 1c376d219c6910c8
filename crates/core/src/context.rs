//! Call context — the explicit identity record threaded into every tool.
//!
//! The backend location, team, and calling user are parameters of every
//! tool invocation, not ambient process state. The bootstrap layer (CLI,
//! config) builds one `CallContext` per call and passes it down; nothing
//! below this type reads environment variables.

use serde::{Deserialize, Serialize};

/// Per-call identity and backend location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallContext {
    /// Backend host and port, e.g. `localhost:8000`
    pub backend_host: String,

    /// Team whose chat this call operates on
    pub team_id: String,

    /// The calling user — the sender for outgoing messages and the
    /// identity resolved by `mention_only` filters
    pub user: String,
}

impl CallContext {
    pub fn new(
        backend_host: impl Into<String>,
        team_id: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            backend_host: backend_host.into(),
            team_id: team_id.into(),
            user: user.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_construction() {
        let ctx = CallContext::new("localhost:8000", "t24", "alice");
        assert_eq!(ctx.backend_host, "localhost:8000");
        assert_eq!(ctx.team_id, "t24");
        assert_eq!(ctx.user, "alice");
    }
}
