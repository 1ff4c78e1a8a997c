//! Binary vector codec and cosine similarity.
//!
//! Embeddings are persisted as opaque blobs: a little-endian `i32` element
//! count followed by that many little-endian IEEE-754 `f32` values
//! (`4 + 4*N` bytes total). The layout is bit-exact across implementations so
//! a database file written by one can be read by another.

use crate::error::CodecError;

/// Serialize a dense float32 vector into its length-prefixed blob form.
pub fn encode_vector(values: &[f32]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(4 + 4 * values.len());
    buf.extend_from_slice(&(values.len() as i32).to_le_bytes());
    for value in values {
        buf.extend_from_slice(&value.to_le_bytes());
    }
    buf
}

/// Decode a blob produced by [`encode_vector`].
///
/// Fails when the blob is shorter than its prefix, when the prefix is
/// non-positive, or when the prefix disagrees with the payload size.
pub fn decode_vector(data: &[u8]) -> Result<Vec<f32>, CodecError> {
    if data.len() < 4 {
        return Err(CodecError::MalformedVector(format!(
            "blob of {} bytes is too short for a length prefix",
            data.len()
        )));
    }

    let mut prefix = [0u8; 4];
    prefix.copy_from_slice(&data[..4]);
    let length = i32::from_le_bytes(prefix);
    if length <= 0 {
        return Err(CodecError::MalformedVector(format!(
            "non-positive vector length {length}"
        )));
    }

    let payload = &data[4..];
    let expected = length as usize * 4;
    if payload.len() != expected {
        return Err(CodecError::MalformedVector(format!(
            "length prefix {length} implies {expected} payload bytes, found {}",
            payload.len()
        )));
    }

    let mut values = Vec::with_capacity(length as usize);
    for chunk in payload.chunks_exact(4) {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(chunk);
        values.push(f32::from_le_bytes(bytes));
    }
    Ok(values)
}

/// Cosine similarity between two equal-length vectors.
///
/// Accumulates in f32, matching the stored precision, and widens only the
/// final quotient to f64.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, CodecError> {
    if a.len() != b.len() {
        return Err(CodecError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(CodecError::ZeroVector);
    }

    Ok(f64::from(dot / (norm_a.sqrt() * norm_b.sqrt())))
}
