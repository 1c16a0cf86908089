//! # vecpush-core
//!
//! Core library for sending one tagged buffer of `f32` samples over TCP.
//!
//! This crate contains:
//! - **Payload**: `Payload`, the tag byte plus little-endian `f32` samples
//! - **Sample**: `SampleSource` and `UniformSource` (uniform in `[-1.0, 1.0]`)
//! - **Codec**: `PayloadCodec` for framed TCP I/O via `tokio_util`
//! - **Network**: `send` for the single connect / write / close exchange
//! - **Error**: `VecpushError`, a `thiserror`-based error hierarchy

pub mod codec;
pub mod error;
pub mod network;
pub mod payload;
pub mod sample;

// ── Re-exports for ergonomic usage ───────────────────────────────

pub use codec::{Framing, PayloadCodec};
pub use error::VecpushError;
pub use network::{ConnectionInfo, SendReport, connect, send, send_over};
pub use payload::{
    DEFAULT_SAMPLE_COUNT, DEFAULT_TAG, MAX_FRAME_LEN, MAX_SAMPLES, Payload, build_payload,
    encoded_len,
};
pub use sample::{FixedSource, SampleSource, UniformSource};
