//! Decode the negotiable lists (cipher suites, supported versions, ALPN) from
//! a TLS ClientHello record and check that an encoder suppressed duplicate
//! entries while keeping their first-occurrence order.

pub mod hello;
pub mod symbols;
pub mod verify;

pub use hello::clienthello::{parse_client_hello, ParseError};
pub use hello::types::ExtractedHandshake;
pub use symbols::{CipherSuite, ProtocolVersion};
