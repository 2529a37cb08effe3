use thiserror::Error;

/// Why a value could not be decoded.
///
/// Only [`Truncated`](DecodeError::Truncated) is recoverable: it means the
/// bytes seen so far are a valid prefix and more input is needed. The other
/// variants mean the input or the schema cannot be decoded at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The buffer ended before the value was complete.
    #[error("unexpected end of input at offset {offset}")]
    Truncated { offset: usize },

    /// The bytes do not form a valid encoding for the schema node.
    #[error("malformed input at offset {offset}: {reason}")]
    Malformed { offset: usize, reason: String },

    /// The schema contains something this decoder cannot follow.
    #[error("unsupported schema construct: {0}")]
    Unsupported(String),
}

impl DecodeError {
    pub(crate) fn malformed(offset: usize, reason: impl Into<String>) -> DecodeError {
        DecodeError::Malformed {
            offset,
            reason: reason.into(),
        }
    }

    /// True when the failure was caused only by running out of input.
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeError::Truncated { .. })
    }
}
