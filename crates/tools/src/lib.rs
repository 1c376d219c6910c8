//! Built-in tool implementations for Crewlink.
//!
//! Each tool wraps one backend operation: sending a message over the
//! socket, fetching messages over REST, or waiting on the message
//! stream. Tools are registered once at startup via
//! [`default_registry`]; every executor is a pure function of
//! `(CallContext, input)`.

pub mod get_recent_messages;
pub mod get_unread_messages;
pub mod send_message;
pub mod version;
pub mod wait_for_message;

pub use get_recent_messages::GetRecentMessagesTool;
pub use get_unread_messages::GetUnreadMessagesTool;
pub use send_message::SendMessageTool;
pub use version::GetVersionTool;
pub use wait_for_message::WaitForMessageTool;

use crewlink_backend::RestClient;
use crewlink_core::ToolRegistry;

/// Create the default registry with every built-in tool.
///
/// The REST client is shared between the fetch tools; socket-backed
/// tools open transient connections per call.
pub fn default_registry() -> ToolRegistry {
    let rest = RestClient::new();
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(SendMessageTool));
    registry.register(Box::new(GetUnreadMessagesTool::new(rest.clone())));
    registry.register(Box::new(GetRecentMessagesTool::new(rest)));
    registry.register(Box::new(WaitForMessageTool));
    registry.register(Box::new(GetVersionTool));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_all_tools() {
        let registry = default_registry();
        assert_eq!(registry.len(), 5);
        for name in [
            "send_message",
            "get_unread_messages",
            "get_recent_messages",
            "wait_for_message",
            "get_version",
        ] {
            assert!(registry.get(name).is_some(), "missing tool: {name}");
        }
    }

    #[test]
    fn definitions_are_published_for_every_tool() {
        let registry = default_registry();
        let defs = registry.definitions();
        assert_eq!(defs.len(), 5);
        for def in defs {
            assert!(!def.description.is_empty());
            assert!(def.input_schema.is_object());
            assert!(def.output_schema.is_object());
        }
    }
}
