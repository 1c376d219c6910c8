//! Tool trait, registry, and the dispatch pipeline.
//!
//! A tool is a named capability with a declared input/output schema and
//! an executor. The registry is the static dispatch table: built once at
//! startup, read-only during request handling, safe for unsynchronized
//! concurrent reads. Dispatch routes a `(name, argument map)` call
//! through lookup → normalization → execution → serialization.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::context::CallContext;
use crate::error::ToolError;
use crate::normalize::normalize_arguments;
use crate::response::ToolResponse;

/// A declared legacy-field relocation, applied during normalization.
///
/// Moves a historical top-level field into a nested object field when the
/// nested object does not already set it. Declared per tool — nothing is
/// relocated unless the tool names it.
#[derive(Debug, Clone, Copy)]
pub struct InputFixup {
    /// Top-level key in the raw caller arguments
    pub source: &'static str,
    /// Declared property holding the nested object
    pub target_object: &'static str,
    /// Field inside the nested object
    pub target_field: &'static str,
}

/// The published shape of a tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub output_schema: Value,
}

/// The core Tool trait.
///
/// Executors receive a [`CallContext`] and the *normalized* argument map.
/// Typed construction (deserializing into the tool's input struct) is the
/// strict-validation step; its failures are reported as
/// [`ToolError::InvalidArguments`] before any side effect.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "send_message").
    fn name(&self) -> &str;

    /// A description of what this tool does (published to the caller).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's input.
    fn input_schema(&self) -> Value;

    /// JSON Schema describing this tool's output.
    fn output_schema(&self) -> Value;

    /// Legacy-field relocations this tool declares. Default: none.
    fn input_fixups(&self) -> &[InputFixup] {
        &[]
    }

    /// Execute the tool with normalized input.
    async fn execute(&self, ctx: &CallContext, input: Value) -> Result<ToolResponse, ToolError>;

    /// The published definition for this tool.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
            output_schema: self.output_schema(),
        }
    }
}

/// The static dispatch table mapping tool name → executor.
///
/// Registration is append-only by name; registering a name twice
/// overwrites the previous entry (intentional idempotent
/// re-registration, not an error). After startup the registry is only
/// read, so it needs no synchronization for concurrent dispatches.
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
    /// Optional pause applied after every successful dispatch. This is
    /// the explicit, configurable replacement for ad hoc delays keyed by
    /// tool name — disabled unless configured.
    post_dispatch_delay: Option<Duration>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            post_dispatch_delay: None,
        }
    }

    /// Set a delay applied after every successful dispatch.
    pub fn with_post_dispatch_delay(mut self, delay: Duration) -> Self {
        self.post_dispatch_delay = Some(delay);
        self
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            debug!(tool = %name, "re-registered tool, previous definition replaced");
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|t| t.as_ref())
    }

    /// All published tool definitions.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// List all registered tool names.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Route one call through the full pipeline and return the wire value.
    ///
    /// Lookup and normalization failures abort before any side-effecting
    /// call. Executor failures propagate as `ExecutionFailed` tagged with
    /// the tool name — never swallowed. Validation failures raised inside
    /// the executor's typed construction pass through unchanged.
    pub async fn dispatch(
        &self,
        name: &str,
        args: Value,
        ctx: &CallContext,
    ) -> Result<Value, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        let normalized = normalize_arguments(&tool.input_schema(), args, tool.input_fixups());
        debug!(tool = %name, "dispatching tool call");

        let response = tool.execute(ctx, normalized).await.map_err(|e| match e {
            ToolError::InvalidArguments(_) => e,
            ToolError::ExecutionFailed { .. } => e,
            other => {
                warn!(tool = %name, error = %other, "tool execution failed");
                ToolError::ExecutionFailed {
                    tool_name: name.to_string(),
                    reason: other.to_string(),
                }
            }
        })?;

        if let Some(delay) = self.post_dispatch_delay {
            debug!(tool = %name, delay_ms = delay.as_millis(), "post-dispatch delay");
            tokio::time::sleep(delay).await;
        }

        Ok(response.to_wire())
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
