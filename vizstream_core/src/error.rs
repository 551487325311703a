// vizstream_core/src/error.rs

use thiserror::Error;

use crate::types::{Category, PrimitiveKind};

/// Failures raised while assembling metadata or frame messages.
///
/// These are treated as fatal by callers: a generator that trips one has a
/// bug in its stream wiring, so errors propagate unchanged with no retry.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("stream '{0}' declared more than once in metadata")]
    DuplicateStream(String),

    #[error("stream '{0}' is not declared in metadata")]
    UndeclaredStream(String),

    #[error("stream '{stream}' has category {actual:?}, expected {expected:?}")]
    CategoryMismatch {
        stream: String,
        expected: Category,
        actual: Category,
    },

    #[error("stream '{stream}' carries {declared:?} primitives, got {offered:?}")]
    PrimitiveKindMismatch {
        stream: String,
        declared: PrimitiveKind,
        offered: PrimitiveKind,
    },

    #[error("failed to serialize message: {0}")]
    Serialize(#[from] serde_json::Error),
}
