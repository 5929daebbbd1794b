//! Palisade - Single-threaded HTTP/1.1 server
//!
//! One readiness-polling loop, non-blocking sockets, one request-response
//! exchange per connection.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
