//! The payload: one tag byte followed by `n` little-endian `f32` samples.
//!
//! ## Wire format
//!
//! ```text
//! tag:      u8        (1)
//! samples:  [f32; n]  (4 * n, little-endian)
//! ```
//!
//! There is no length prefix. A receiver either knows `n` in advance or
//! reads until the sender closes the stream.

use std::fmt;

use bytes::{Buf, BufMut, BytesMut};

use crate::error::VecpushError;
use crate::sample::SampleSource;

// ── Constants ────────────────────────────────────────────────────

/// Tag byte written when nothing else is configured.
pub const DEFAULT_TAG: u8 = 1;

/// Number of samples sent when nothing else is configured.
pub const DEFAULT_SAMPLE_COUNT: usize = 2000;

/// Size of the tag prefix in bytes.
pub const TAG_SIZE: usize = 1;

/// Size of one encoded sample in bytes.
pub const SAMPLE_SIZE: usize = std::mem::size_of::<f32>();

/// Upper bound on `n` (64 MiB on the wire).
pub const MAX_SAMPLES: usize = 16 * 1024 * 1024;

/// Encoded length of the largest payload, `1 + 4 * MAX_SAMPLES`.
pub const MAX_FRAME_LEN: usize = TAG_SIZE + SAMPLE_SIZE * MAX_SAMPLES;

/// Encoded length of a payload carrying `count` samples: `1 + 4 * count`.
pub fn encoded_len(count: usize) -> Result<usize, VecpushError> {
    check_count(count)?;
    Ok(TAG_SIZE + SAMPLE_SIZE * count)
}

pub(crate) fn check_count(count: usize) -> Result<(), VecpushError> {
    if count > MAX_SAMPLES {
        return Err(VecpushError::SampleCountTooLarge {
            count,
            max: MAX_SAMPLES,
        });
    }
    Ok(())
}

/// Draw `count` samples from `source` and wrap them with [`DEFAULT_TAG`].
pub fn build_payload<S: SampleSource + ?Sized>(
    count: usize,
    source: &mut S,
) -> Result<Payload, VecpushError> {
    Payload::generate(DEFAULT_TAG, count, source)
}

// ── Payload ──────────────────────────────────────────────────────

/// A tag byte plus the samples that follow it, in generation order.
#[derive(Clone, PartialEq)]
pub struct Payload {
    tag: u8,
    samples: Vec<f32>,
}

impl Payload {
    /// Wrap already-known samples.
    pub fn new(tag: u8, samples: Vec<f32>) -> Result<Self, VecpushError> {
        check_count(samples.len())?;
        Ok(Self { tag, samples })
    }

    /// Draw `count` samples from `source`, in order.
    ///
    /// Exactly `count` samples are taken whatever the source is. A finite
    /// source such as [`crate::FixedSource`] decides what it yields once
    /// exhausted; check [`crate::FixedSource::padded`] afterwards.
    pub fn generate<S: SampleSource + ?Sized>(
        tag: u8,
        count: usize,
        source: &mut S,
    ) -> Result<Self, VecpushError> {
        check_count(count)?;
        let samples = (0..count).map(|_| source.next_sample()).collect();
        Ok(Self { tag, samples })
    }

    pub fn tag(&self) -> u8 {
        self.tag
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Number of samples after the tag.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Bytes this payload occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        TAG_SIZE + SAMPLE_SIZE * self.samples.len()
    }

    /// Append the wire encoding to `dst`.
    pub fn encode_into(&self, dst: &mut BytesMut) {
        dst.reserve(self.encoded_len());
        dst.put_u8(self.tag);
        for &sample in &self.samples {
            dst.put_f32_le(sample);
        }
    }

    /// Serialize to a freshly allocated buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode_into(&mut buf);
        buf.to_vec()
    }

    /// Parse a complete buffer. The length must be exactly `1 + 4 * n`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VecpushError> {
        if bytes.len() < TAG_SIZE || (bytes.len() - TAG_SIZE) % SAMPLE_SIZE != 0 {
            return Err(VecpushError::InvalidLength { len: bytes.len() });
        }
        let count = (bytes.len() - TAG_SIZE) / SAMPLE_SIZE;
        check_count(count)?;

        let mut buf = bytes;
        let tag = buf.get_u8();
        let samples = (0..count).map(|_| buf.get_f32_le()).collect();
        Ok(Self { tag, samples })
    }

    /// Short BLAKE3 fingerprint of the encoded bytes, for log correlation.
    pub fn digest(&self) -> String {
        let hash = blake3::hash(&self.to_bytes());
        hash.to_hex().as_str()[..16].to_string()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("tag", &self.tag)
            .field("samples", &self.samples.len())
            .field("encoded_len", &self.encoded_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{FixedSource, UniformSource};

    #[test]
    fn empty_payload_is_single_tag_byte() {
        let payload = Payload::new(DEFAULT_TAG, Vec::new()).unwrap();
        assert_eq!(payload.to_bytes(), vec![0x01]);
        assert!(payload.is_empty());
    }

    #[test]
    fn two_samples_encode_little_endian() {
        let payload = Payload::new(DEFAULT_TAG, vec![0.5, -0.5]).unwrap();
        let bytes = payload.to_bytes();
        assert_eq!(
            bytes,
            vec![0x01, 0x00, 0x00, 0x00, 0x3f, 0x00, 0x00, 0x00, 0xbf]
        );
        assert_eq!(bytes.len(), payload.encoded_len());
    }

    #[test]
    fn build_payload_uses_default_tag_and_order() {
        let mut source = FixedSource::new(vec![0.25, -1.0, 1.0]);
        let payload = build_payload(3, &mut source).unwrap();
        assert_eq!(payload.tag(), DEFAULT_TAG);
        assert_eq!(payload.samples(), &[0.25, -1.0, 1.0]);
    }

    #[test]
    fn short_fixed_source_pads_and_reports_it() {
        let mut source = FixedSource::new(vec![0.5]);
        let payload = build_payload(3, &mut source).unwrap();
        assert_eq!(payload.samples(), &[0.5, 0.0, 0.0]);
        assert_eq!(source.remaining(), 0);
        assert_eq!(source.padded(), 2);
    }

    #[test]
    fn default_payload_has_expected_shape() {
        let mut source = UniformSource::seeded(7);
        let payload = build_payload(DEFAULT_SAMPLE_COUNT, &mut source).unwrap();
        let bytes = payload.to_bytes();

        assert_eq!(bytes.len(), 1 + 4 * DEFAULT_SAMPLE_COUNT);
        assert_eq!(bytes[0], DEFAULT_TAG);
        for chunk in bytes[1..].chunks_exact(4) {
            let v = f32::from_le_bytes(chunk.try_into().unwrap());
            assert!((-1.0..=1.0).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn from_bytes_rejects_ragged_length() {
        assert!(matches!(
            Payload::from_bytes(&[]),
            Err(VecpushError::InvalidLength { len: 0 })
        ));
        assert!(matches!(
            Payload::from_bytes(&[1, 0, 0]),
            Err(VecpushError::InvalidLength { len: 3 })
        ));
    }

    #[test]
    fn from_bytes_reads_tag_and_samples() {
        let mut bytes = vec![9u8];
        bytes.extend_from_slice(&0.75f32.to_le_bytes());
        let payload = Payload::from_bytes(&bytes).unwrap();
        assert_eq!(payload.tag(), 9);
        assert_eq!(payload.samples(), &[0.75]);
    }

    #[test]
    fn count_above_limit_is_rejected() {
        assert!(matches!(
            encoded_len(MAX_SAMPLES + 1),
            Err(VecpushError::SampleCountTooLarge { .. })
        ));
        assert_eq!(encoded_len(0).unwrap(), 1);
        assert_eq!(encoded_len(2000).unwrap(), 8001);
    }

    #[test]
    fn digest_is_stable_and_short() {
        let payload = Payload::new(DEFAULT_TAG, vec![0.5, -0.5]).unwrap();
        let other = Payload::new(DEFAULT_TAG, vec![-0.5, 0.5]).unwrap();
        assert_eq!(payload.digest(), payload.clone().digest());
        assert_eq!(payload.digest().len(), 16);
        assert_ne!(payload.digest(), other.digest());
    }
}
