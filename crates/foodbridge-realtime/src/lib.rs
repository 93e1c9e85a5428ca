//! # foodbridge-realtime
//!
//! Real-time event distribution layer. [`connection::ConnectionRegistry`]
//! maps live connection handles to authenticated user identities;
//! [`bus::EventBus`] fans lifecycle events out to all or targeted
//! connections with fire-and-forget, at-most-once semantics.

pub mod bus;
pub mod connection;
pub mod message;

pub use bus::EventBus;
pub use connection::{ConnectionHandle, ConnectionRegistry};
pub use message::{InboundMessage, ServerEvent};
