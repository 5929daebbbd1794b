//! HTTP protocol implementation.
//!
//! This module implements the per-connection half of the server: byte
//! accumulation, message framing, request parsing, and response
//! serialization.
//!
//! # Architecture
//!
//! - **`buffer`**: Growable per-connection receive buffer
//! - **`framing`**: Decides whether a complete request has arrived
//! - **`parser`**: Parses a framed request from the receive buffer
//! - **`request`**: HTTP request representation (method, target, body)
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`connection`**: The connection handler implementing the
//!   request-response state machine
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │  Receiving  │ ← Accumulate request bytes until framed
//!        └──────┬──────┘
//!               │ Complete request framed
//!               ▼
//!        ┌──────────────────┐
//!        │   RequestReady   │ ← Parse, route, write the response
//!        └──────┬───────────┘
//!               │ Response written (or fatal error)
//!               ▼
//!        ┌──────────────────┐
//!        │     Closing      │ ← Shut down and reclaim the socket
//!        └──────────────────┘
//! ```
//!
//! `RequestReady` is transient: it is entered and left inside a single
//! multiplexer dispatch. `Receiving` can also move straight to `Closing`
//! on peer close, a transport error, or buffer exhaustion. There is no
//! keep-alive; every connection serves exactly one exchange.

pub mod buffer;
pub mod connection;
pub mod framing;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
