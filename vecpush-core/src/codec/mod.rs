//! `PayloadCodec` for framed TCP I/O via `tokio_util`.
//!
//! The payload has no length prefix, so the decoder needs to be told how
//! a frame ends: either a known sample count, or the end of the stream.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::VecpushError;
use crate::payload::{self, MAX_FRAME_LEN, Payload};

/// How the decoder finds the end of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// The receiver knows `n`; a frame is exactly `1 + 4n` bytes.
    Count(usize),
    /// The whole stream, up to EOF, is one frame.
    UntilEof,
}

#[derive(Debug, Clone)]
pub struct PayloadCodec {
    framing: Framing,
    expect_tag: Option<u8>,
}

impl PayloadCodec {
    /// Decode frames of exactly `count` samples.
    pub fn with_count(count: usize) -> Self {
        Self {
            framing: Framing::Count(count),
            expect_tag: None,
        }
    }

    /// Decode one frame spanning the whole stream.
    pub fn until_eof() -> Self {
        Self {
            framing: Framing::UntilEof,
            expect_tag: None,
        }
    }

    /// Reject decoded frames whose tag differs from `tag`.
    pub fn expect_tag(mut self, tag: u8) -> Self {
        self.expect_tag = Some(tag);
        self
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    fn check_tag(&self, payload: &Payload) -> Result<(), VecpushError> {
        match self.expect_tag {
            Some(expected) if expected != payload.tag() => Err(VecpushError::UnexpectedTag {
                expected,
                actual: payload.tag(),
            }),
            _ => Ok(()),
        }
    }
}

impl Default for PayloadCodec {
    fn default() -> Self {
        Self::until_eof()
    }
}

impl Decoder for PayloadCodec {
    type Item = Payload;
    type Error = VecpushError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let count = match self.framing {
            Framing::Count(count) => count,
            // Nothing can be yielded until the peer closes, but the buffer
            // must not outgrow the largest legal frame meanwhile.
            Framing::UntilEof => {
                if src.len() > MAX_FRAME_LEN {
                    return Err(VecpushError::FrameTooLarge {
                        size: src.len(),
                        max: MAX_FRAME_LEN,
                    });
                }
                return Ok(None);
            }
        };

        let frame_len = payload::encoded_len(count)?;
        if src.len() < frame_len {
            src.reserve(frame_len - src.len());
            return Ok(None);
        }

        let frame = src.split_to(frame_len);
        let payload = Payload::from_bytes(&frame)?;
        self.check_tag(&payload)?;
        Ok(Some(payload))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.framing {
            Framing::Count(count) => match self.decode(src)? {
                Some(payload) => Ok(Some(payload)),
                None if src.is_empty() => Ok(None),
                None => Err(VecpushError::Truncated {
                    expected: payload::encoded_len(count)?,
                    actual: src.len(),
                }),
            },
            Framing::UntilEof => {
                if src.is_empty() {
                    return Ok(None);
                }
                let frame = src.split_to(src.len());
                let payload = Payload::from_bytes(&frame)?;
                self.check_tag(&payload)?;
                Ok(Some(payload))
            }
        }
    }
}

impl Encoder<Payload> for PayloadCodec {
    type Error = VecpushError;

    fn encode(&mut self, item: Payload, dst: &mut BytesMut) -> Result<(), Self::Error> {
        item.encode_into(dst);
        Ok(())
    }
}

impl Encoder<&Payload> for PayloadCodec {
    type Error = VecpushError;

    fn encode(&mut self, item: &Payload, dst: &mut BytesMut) -> Result<(), Self::Error> {
        item.encode_into(dst);
        Ok(())
    }
}
