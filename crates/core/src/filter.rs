//! The message filter predicate.
//!
//! A pure, order-independent conjunction over every set filter field.
//! Absent fields impose no constraint, so the empty filter matches every
//! message. Evaluation short-circuits on the first failing field; the
//! order is fixed but any order would be equivalent.

use regex::Regex;
use tracing::warn;

use crate::message::{ChatMessage, MessageFilter};

/// Channel name assumed for messages that carry none, when evaluating a
/// `channels` constraint. (A `None` channel still means DM for `dm_only`.)
pub const DEFAULT_CHANNEL: &str = "general";

/// Evaluate `filter` against `message`.
///
/// `identity` is the calling user from the [`crate::CallContext`]; it is
/// the name resolved by `mention_only`.
pub fn matches(message: &ChatMessage, filter: &MessageFilter, identity: &str) -> bool {
    // Exact, case-sensitive sender equality. `from_user` aliases `user`.
    if let Some(user) = filter.effective_user() {
        if message.user != user {
            return false;
        }
    }

    if filter.dm_only == Some(true) && !message.is_direct() {
        return false;
    }

    if let Some(channels) = &filter.channels {
        let channel = message.channel.as_deref().unwrap_or(DEFAULT_CHANNEL);
        if !channels.iter().any(|c| c == channel) {
            return false;
        }
    }

    if filter.mention_only == Some(true) && !contains_mention(&message.message, identity) {
        return false;
    }

    if let Some(pattern) = &filter.content_regex {
        match Regex::new(pattern) {
            Ok(re) => {
                if !re.is_match(&message.message) {
                    return false;
                }
            }
            Err(e) => {
                // Invalid patterns match nothing rather than everything.
                warn!(pattern = %pattern, error = %e, "invalid content_regex in filter");
                return false;
            }
        }
    }

    true
}

/// Whole-token mention check: `@<identity>` must be delimited by a
/// non-word character or a string boundary on both sides, matched
/// case-insensitively. `@bob` must not fire on `@bobby`.
pub fn contains_mention(text: &str, identity: &str) -> bool {
    if identity.is_empty() {
        return false;
    }
    let pattern = format!(r"(?i)(^|\W)@{}(\W|$)", regex::escape(identity));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}
