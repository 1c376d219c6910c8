//! ChatMessage and MessageFilter domain types.
//!
//! These are the value objects that flow through the adapter: the backend
//! produces `ChatMessage`s, callers supply `MessageFilter`s, and the
//! predicate in [`crate::filter`] evaluates one against the other. Both
//! are ephemeral — scoped to a single call, never persisted.

use serde::{Deserialize, Serialize};

/// A single chat message as produced by the backend.
///
/// `channel == None` denotes a direct message. `id` and `timestamp` are
/// absent on messages received over the streaming socket — the backend
/// does not echo them on that path (a known backend limitation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Sender username
    pub user: String,

    /// The text content
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Channel name; `None` means direct message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl ChatMessage {
    /// Whether this message was sent as a direct message.
    pub fn is_direct(&self) -> bool {
        self.channel.is_none()
    }
}

/// Sort order for filtered fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// A multi-field message filter.
///
/// Every field is independently optional; absence means "no constraint on
/// that dimension". An all-absent filter matches every message.
/// `from_user` is a legacy alias of `user` with identical semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dm_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention_only: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_regex: Option<String>,

    /// Legacy alias of `user`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_user: Option<String>,

    /// Lower bound (message id or timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,

    /// Upper bound (message id or timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl MessageFilter {
    /// Whether no constraint is set on any dimension.
    pub fn is_empty(&self) -> bool {
        self.user.is_none()
            && self.channels.is_none()
            && self.dm_only.is_none()
            && self.mention_only.is_none()
            && self.content_regex.is_none()
            && self.from_user.is_none()
            && self.before.is_none()
            && self.after.is_none()
            && self.sort.is_none()
            && self.limit.is_none()
    }

    /// The effective user constraint: `user` wins over its legacy alias.
    pub fn effective_user(&self) -> Option<&str> {
        self.user.as_deref().or(self.from_user.as_deref())
    }

    /// Canonicalize a caller-supplied filter value.
    ///
    /// Callers may send the filter as a JSON object or as a JSON string
    /// containing an object. Anything that does not decode into a filter
    /// falls back to the empty filter — downstream code only ever sees
    /// one canonical type and never branches on the wire representation.
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(_) => {
                serde_json::from_value(value.clone()).unwrap_or_default()
            }
            serde_json::Value::String(raw) => {
                serde_json::from_str(raw).unwrap_or_default()
            }
            _ => Self::default(),
        }
    }
}
