//! Subcommand implementations. Each one builds a call context from the
//! loaded config plus any CLI overrides, dispatches through the tool
//! registry, and prints the serialized result as pretty JSON.

pub mod init;
pub mod recent;
pub mod send;
pub mod tools;
pub mod unread;
pub mod version;
pub mod wait;

use std::time::Duration;

use crewlink_config::AppConfig;
use crewlink_core::{CallContext, ToolRegistry};
use serde_json::Value;

/// Connection overrides taken from the global CLI flags.
pub struct Overrides {
    pub backend_host: Option<String>,
    pub team: Option<String>,
    pub user: Option<String>,
}

/// A loaded config, the resolved call context, and a ready registry.
pub struct Session {
    pub config: AppConfig,
    pub ctx: CallContext,
    pub registry: ToolRegistry,
}

impl Session {
    pub fn open(overrides: Overrides) -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

        let ctx = CallContext::new(
            overrides.backend_host.unwrap_or_else(|| config.backend_host.clone()),
            overrides.team.unwrap_or_else(|| config.team_id.clone()),
            overrides.user.unwrap_or_else(|| config.user.clone()),
        );

        let mut registry = crewlink_tools::default_registry();
        if let Some(ms) = config.post_dispatch_delay_ms {
            registry = registry.with_post_dispatch_delay(Duration::from_millis(ms));
        }

        Ok(Self { config, ctx, registry })
    }

    /// Dispatch a tool call and print the wire value.
    pub async fn call(&self, name: &str, args: Value) -> Result<(), Box<dyn std::error::Error>> {
        let wire = self.registry.dispatch(name, args, &self.ctx).await?;
        println!("{}", serde_json::to_string_pretty(&wire)?);
        Ok(())
    }
}
