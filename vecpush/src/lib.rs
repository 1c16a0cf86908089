//! # vecpush — one-shot sample sender
//!
//! Generates a buffer of uniform `f32` samples behind a tag byte, sends it
//! once over TCP, and exits.
//!
//! ## Modes
//!
//! - **Send** (default): build the payload, connect, write, close.
//! - **Dry run**: build and log the payload without connecting.
//! - **Gen config**: print the default TOML configuration.

pub mod client;
pub mod config;
