//! Unified error taxonomy for the context memory core.
//!
//! Every failure surfaced by the store, the vector codec, the capabilities,
//! or the dispatcher is a [`MemoryError`]. The dispatcher flattens these into
//! the wire envelope's `error` string; the kind itself is only logged.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MemoryError>;

/// Which store operation failed. Carried inside [`MemoryError::Store`] so
/// logs can distinguish a failed put from a failed replace even though both
/// share the same write path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Open,
    Put,
    Search,
    Delete,
    Clear,
    Replace,
}

impl StoreOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Put => "put",
            Self::Search => "search",
            Self::Delete => "delete",
            Self::Clear => "clear",
            Self::Replace => "replace",
        }
    }
}

impl std::fmt::Display for StoreOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vector encode/decode and similarity failures.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed vector blob: {0}")]
    MalformedVector(String),

    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("vector has zero magnitude")]
    ZeroVector,
}

/// The single error type for all core operations.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// Malformed or semantically invalid request.
    #[error("invalid request: {0}")]
    Validation(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("summarization failed: {0}")]
    Summarizer(String),

    #[error("embedding failed: {0}")]
    Embedder(String),

    /// Durable-storage failure during a specific operation.
    #[error("store {op} failed: {message}")]
    Store { op: StoreOp, message: String },

    /// Operation attempted after [`close`](crate::store::ContextStore::close).
    #[error("store is closed")]
    StoreClosed,

    /// Cooperative cancellation from the caller.
    #[error("operation canceled")]
    Canceled,

    /// Unexpected invariant violation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl MemoryError {
    /// Wrap an underlying storage failure with the operation that hit it.
    pub fn store(op: StoreOp, err: impl std::fmt::Display) -> Self {
        Self::Store {
            op,
            message: err.to_string(),
        }
    }

    /// Stable kind tag for structured log fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Codec(CodecError::MalformedVector(_)) => "codec_malformed_vector",
            Self::Codec(CodecError::DimensionMismatch { .. }) => "codec_dimension_mismatch",
            Self::Codec(CodecError::ZeroVector) => "codec_zero_vector",
            Self::Summarizer(_) => "summarizer",
            Self::Embedder(_) => "embedder",
            Self::Store { op, .. } => match op {
                StoreOp::Open => "store_open",
                StoreOp::Put => "store_put",
                StoreOp::Search => "store_search",
                StoreOp::Delete => "store_delete",
                StoreOp::Clear => "store_clear",
                StoreOp::Replace => "store_replace",
            },
            Self::StoreClosed => "store_closed",
            Self::Canceled => "canceled",
            Self::Internal(_) => "internal",
        }
    }
}
