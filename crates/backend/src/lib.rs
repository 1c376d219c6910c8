//! Backend clients for the Crewlink chat backend.
//!
//! Three transport contracts, each with at most one backend attempt per
//! logical operation and no retry policy:
//!
//! - [`rest::RestClient`] — fetch messages over REST (plain GET, or a
//!   structured POST query when a filter is set).
//! - [`socket`] — one-shot WebSocket send and the long-lived message
//!   stream.
//! - [`wait`] — the wait-with-timeout dispatch loop that drives the
//!   stream through the filter predicate.

pub mod rest;
pub mod socket;
pub mod wait;

pub use rest::{FetchCriteria, RestClient};
pub use socket::{MessageStream, StreamEvent, WsStream, open_stream, send_message};
pub use wait::{WaitOutcome, wait_for_message};
