//! Error types for the frame-processing runtime

use crossbeam_channel::{SendError, TrySendError};

/// Error type for rejected configuration writes
///
/// A rejected write never mutates processor state, with one documented
/// exception: malformed filter coefficient vectors are replaced by the
/// identity (`a = [1.0]`, `b = [0.0]`) before the error is returned,
/// matching the behavior expected by downstream operators.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Mask length {0} exceeds the supported channel count {1}")]
    MaskTooLong(usize, usize),

    #[error("Mask entry {index} maps to channel {value}, beyond the supported channel count {max}")]
    MaskEntryOutOfRange {
        index: usize,
        value: usize,
        max: usize,
    },

    #[error("Decimation factor must be greater than zero")]
    ZeroFactor,

    #[error("Empty denominator coefficient vector, defaulting to a = [1.0]")]
    EmptyDenominator,

    #[error("Denominator coefficient a[0] must not be zero, defaulting to a = [1.0]")]
    ZeroLeadingDenominator,

    #[error("Empty numerator coefficient vector, defaulting to b = [0.0]")]
    EmptyNumerator,
}

/// Error type for malformed inbound frames
///
/// Every variant is logged and the offending frame dropped; none of these
/// stop the ingestion path.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("Frame carries a transport error or the stale flag (flags {flags:#x})")]
    Flagged { flags: u32 },

    #[error("Frame payload of {0} bytes is smaller than the {1}-byte header")]
    TooShort(usize, usize),

    #[error("Frame advertises {got} channels, below the configured maximum {expected}")]
    TooFewChannels { got: usize, expected: usize },

    #[error("Frame payload of {payload} bytes cannot hold {channels} samples after the header")]
    PayloadTooSmall { payload: usize, channels: usize },

    #[error("Mask entry {index} maps to channel {value}, outside this frame's {channels} channels")]
    MaskBeyondFrame {
        index: usize,
        value: usize,
        channels: usize,
    },
}

/// Error type for the outbound transport collaborator
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Could not obtain an outbound buffer of {0} bytes")]
    BufferUnavailable(usize),

    #[error("Downstream consumer disconnected")]
    Disconnected,

    #[error("Downstream consumer cannot keep up")]
    Full,
}

impl<T> From<SendError<T>> for TransportError {
    fn from(_: SendError<T>) -> Self {
        TransportError::Disconnected
    }
}

impl<T> From<TrySendError<T>> for TransportError {
    fn from(e: TrySendError<T>) -> Self {
        match e {
            TrySendError::Full(_) => TransportError::Full,
            TrySendError::Disconnected(_) => TransportError::Disconnected,
        }
    }
}

/// Result type for transport operations
pub type TransportResult<T = ()> = Result<T, TransportError>;
