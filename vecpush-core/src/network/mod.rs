//! Outbound TCP: connect, write one payload, close.

mod connection;

pub use connection::{ConnectionInfo, SendReport, connect, send, send_over};
