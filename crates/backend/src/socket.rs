//! WebSocket transport: one-shot send and the long-lived message stream.
//!
//! Outbound frames are JSON `{"user": ..., "message": ...}`. Inbound
//! frames are JSON `ChatMessage`s — without `id`/`timestamp`, which the
//! backend does not echo on this path. One connection attempt per call;
//! reconnect policy belongs to callers, not here.

use std::time::Duration;

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::net::TcpStream;
use tokio::time::{Instant, timeout_at};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, trace};

use crewlink_core::{BackendError, CallContext, ChatMessage};

fn ws_url(ctx: &CallContext) -> String {
    format!("ws://{}/ws/{}", ctx.backend_host, ctx.team_id)
}

#[derive(Serialize)]
struct OutboundFrame<'a> {
    user: &'a str,
    message: &'a str,
}

/// Send one message and close the connection.
///
/// No acknowledgment is awaited: success means "transmitted", not
/// "delivered or stored".
pub async fn send_message(
    ctx: &CallContext,
    user: &str,
    message: &str,
) -> Result<(), BackendError> {
    let url = ws_url(ctx);
    debug!(url = %url, user = %user, "sending message over socket");

    let (mut ws, _) = connect_async(&url)
        .await
        .map_err(|e| BackendError::Connection(e.to_string()))?;

    let payload = serde_json::to_string(&OutboundFrame { user, message })
        .map_err(|e| BackendError::Protocol(e.to_string()))?;
    ws.send(Message::Text(payload.into()))
        .await
        .map_err(|e| BackendError::Connection(e.to_string()))?;
    let _ = ws.close(None).await;
    Ok(())
}

/// Deadline for a receive budget. An absurd duration saturates to a
/// far-future deadline instead of overflowing `Instant`.
pub(crate) fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout)
        .unwrap_or_else(|| now + Duration::from_secs(60 * 60 * 24 * 365))
}

/// One event from a receive attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Message(ChatMessage),
    /// The timeout elapsed with no message — a normal outcome, not an
    /// error.
    TimedOut,
}

/// The single operation a stream handle supports. Trait-shaped so the
/// wait loop can be driven by a scripted stream in tests.
#[async_trait]
pub trait MessageStream: Send {
    async fn recv_timeout(&mut self, timeout: Duration) -> Result<StreamEvent, BackendError>;

    /// Close the underlying connection. Dropping the handle also closes
    /// the socket; an explicit close sends a proper close frame.
    async fn close(&mut self);
}

/// A live WebSocket message stream.
#[derive(Debug)]
pub struct WsStream {
    inner: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

/// Open the long-lived stream for the context's team.
pub async fn open_stream(ctx: &CallContext) -> Result<WsStream, BackendError> {
    let url = ws_url(ctx);
    debug!(url = %url, "opening message stream");
    let (inner, _) = connect_async(&url)
        .await
        .map_err(|e| BackendError::Connection(e.to_string()))?;
    Ok(WsStream { inner })
}

#[async_trait]
impl MessageStream for WsStream {
    async fn recv_timeout(&mut self, timeout: Duration) -> Result<StreamEvent, BackendError> {
        // Non-text frames (pings, binary) are skipped without restarting
        // the timeout budget.
        let deadline = deadline_after(timeout);
        loop {
            let frame = match timeout_at(deadline, self.inner.next()).await {
                Err(_) => return Ok(StreamEvent::TimedOut),
                Ok(None) => {
                    return Err(BackendError::Connection("stream ended".into()));
                }
                Ok(Some(Err(e))) => return Err(BackendError::Connection(e.to_string())),
                Ok(Some(Ok(frame))) => frame,
            };

            match frame {
                Message::Text(text) => {
                    let message: ChatMessage = serde_json::from_str(text.as_str())
                        .map_err(|e| BackendError::Protocol(e.to_string()))?;
                    return Ok(StreamEvent::Message(message));
                }
                Message::Close(_) => {
                    return Err(BackendError::Connection("closed by backend".into()));
                }
                other => {
                    trace!(frame = ?other, "skipping non-text frame");
                }
            }
        }
    }

    async fn close(&mut self) {
        let _ = self.inner.close(None).await;
    }
}
