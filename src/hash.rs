//! Content-addressed identifier derivation.
//!
//! Ids are the first 16 lowercase hex characters of a SHA-256 digest over the
//! summary bytes followed by the decimal nanosecond timestamp. The timestamp
//! input makes derivation time-dependent on purpose: saving the same text
//! twice yields two distinct ids.

use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicI64, Ordering};

/// Length of a derived context id in hex characters.
pub const ID_LEN: usize = 16;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Derive the identifier for a summary written at `timestamp_nanos`.
pub fn context_id(summary: &str, timestamp_nanos: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(summary.as_bytes());
    hasher.update(timestamp_nanos.to_string().as_bytes());
    let digest = hasher.finalize();

    let mut id = String::with_capacity(ID_LEN);
    for byte in &digest[..ID_LEN / 2] {
        id.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        id.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
    }
    id
}

/// Wall-clock nanosecond source that never hands out the same value twice.
///
/// When the OS clock has not advanced past the previous reading (rapid
/// successive saves, coarse clocks), the reading is bumped one nanosecond past
/// it, so ids derived from consecutive readings are always distinct.
pub struct IdClock {
    last: AtomicI64,
}

impl IdClock {
    pub fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Current wall-clock time in nanoseconds since the Unix epoch, strictly
    /// greater than every earlier reading from this clock.
    pub fn next_nanos(&self) -> i64 {
        let now = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or(i64::MAX - 1);
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = if now > prev { now } else { prev + 1 };
            match self.last.compare_exchange_weak(
                prev,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return candidate,
                Err(observed) => prev = observed,
            }
        }
    }
}

impl Default for IdClock {
    fn default() -> Self {
        Self::new()
    }
}
