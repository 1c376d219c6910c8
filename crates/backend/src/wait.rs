//! The wait-with-timeout dispatch loop.
//!
//! A small state machine: `Connecting → Listening → {Matched, TimedOut,
//! ConnectionFailed}`. The loop receives messages from the stream and
//! applies the filter predicate to each until one matches or the budget
//! runs out.
//!
//! The timeout is a **cumulative deadline**: computed once on entry,
//! each receive attempt waits at most the remaining budget. A stream of
//! non-matching chatter therefore cannot extend the wait past the
//! configured timeout.
//!
//! This component never lets an error escape: connect and transport
//! failures come back as [`WaitOutcome::ConnectionFailed`], and the
//! stream is closed on every exit path.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crewlink_core::{CallContext, ChatMessage, MessageFilter, filter};

use crate::socket::{self, MessageStream, StreamEvent};

/// Terminal state of one wait call. Timeout is distinct from both
/// success and error.
#[derive(Debug, Clone, PartialEq)]
pub enum WaitOutcome {
    Matched(ChatMessage),
    TimedOut,
    ConnectionFailed(String),
}

/// Open a stream and wait for the first message matching `filter`.
///
/// `identity` for mention resolution is the context user.
pub async fn wait_for_message(
    ctx: &CallContext,
    message_filter: &MessageFilter,
    timeout: Duration,
) -> WaitOutcome {
    // Connecting
    let mut stream = match socket::open_stream(ctx).await {
        Ok(stream) => stream,
        Err(e) => return WaitOutcome::ConnectionFailed(e.to_string()),
    };

    // Listening
    let outcome = listen(&mut stream, message_filter, &ctx.user, timeout).await;
    stream.close().await;
    outcome
}

/// The Listening state: drive `stream` through the predicate until a
/// match, the deadline, or a transport failure.
pub async fn listen<S: MessageStream>(
    stream: &mut S,
    message_filter: &MessageFilter,
    identity: &str,
    timeout: Duration,
) -> WaitOutcome {
    let deadline = socket::deadline_after(timeout);

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            info!("wait deadline elapsed with no matching message");
            return WaitOutcome::TimedOut;
        }

        match stream.recv_timeout(remaining).await {
            Ok(StreamEvent::TimedOut) => {
                info!("wait deadline elapsed with no matching message");
                return WaitOutcome::TimedOut;
            }
            Ok(StreamEvent::Message(message)) => {
                if filter::matches(&message, message_filter, identity) {
                    debug!(user = %message.user, "matching message received");
                    return WaitOutcome::Matched(message);
                }
                debug!(user = %message.user, "message did not match filter, still listening");
            }
            Err(e) => {
                return WaitOutcome::ConnectionFailed(e.to_string());
            }
        }
    }
}
