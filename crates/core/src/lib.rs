//! # Crewlink Core
//!
//! Domain types, traits, and error definitions for the Crewlink chat-tool
//! adapter. This crate has **zero network dependencies** — it defines the
//! message model, the filter predicate, and the tool dispatch layer that
//! the other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every tool is a pure function of `(CallContext, input)`. Identity and
//! backend location are threaded explicitly through the context — never
//! read from ambient process state inside tool logic. The registry is
//! built once at startup and is read-only afterwards.

pub mod context;
pub mod error;
pub mod filter;
pub mod message;
pub mod normalize;
pub mod response;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use context::CallContext;
pub use error::{BackendError, Error, Result, ToolError};
pub use message::{ChatMessage, MessageFilter, SortOrder};
pub use response::{ToolContent, ToolResponse};
pub use tool::{InputFixup, Tool, ToolDefinition, ToolRegistry};
