//! Transport seams between the processor and its collaborators
//!
//! The processor touches the outside world through two narrow interfaces:
//! [`FrameSink`] on the inbound side and [`FrameTransport`] on the outbound
//! side. Both are injected, keeping transport policy (buffer ownership,
//! delivery, flow control) out of the pipeline itself.

use crossbeam_channel::{Receiver as CrossbeamReceiver, bounded};

use super::errors::{TransportError, TransportResult};
use super::frame::RawFrame;

// ────────────────────────────────────────────────────────────────────────────
// Seam traits
// ────────────────────────────────────────────────────────────────────────────

/// Inbound seam: anything that consumes readout frames
///
/// A sink never fails outward. Malformed frames are logged and dropped
/// inside the implementation; the caller just keeps feeding frames.
pub trait FrameSink {
    /// Consume one inbound frame
    fn accept_frame(&self, frame: &RawFrame);
}

/// Outbound seam: the collaborator that carries finished frames downstream
///
/// The transmitter worker requests a buffer, fills it with header and
/// samples, and hands it back. Failure policy for either call belongs to
/// the implementation; the worker logs the error and drops that output.
pub trait FrameTransport: Send {
    /// Obtain a zero-initialized outbound buffer of exactly `len` bytes
    fn request_buffer(&self, len: usize) -> TransportResult<Vec<u8>>;

    /// Hand a completed frame downstream
    fn send_frame(&self, frame: Vec<u8>) -> TransportResult;
}

// ────────────────────────────────────────────────────────────────────────────
// Channel-backed implementation
// ────────────────────────────────────────────────────────────────────────────

/// [`FrameTransport`] backed by a bounded crossbeam channel
///
/// The consuming end is a plain `crossbeam_channel::Receiver`, so outbound
/// frames can be drained from any thread. While the channel is full,
/// `request_buffer` refuses, and the worker sheds that output frame rather
/// than stalling on a consumer that has stopped draining.
pub struct ChannelTransport {
    frames: crossbeam_channel::Sender<Vec<u8>>,
}

impl ChannelTransport {
    /// Create a transport with room for `capacity` in-flight frames,
    /// returning it together with the consuming end
    pub fn with_capacity(capacity: usize) -> (Self, CrossbeamReceiver<Vec<u8>>) {
        let (tx, rx) = bounded(capacity);
        (Self { frames: tx }, rx)
    }
}

impl FrameTransport for ChannelTransport {
    fn request_buffer(&self, len: usize) -> TransportResult<Vec<u8>> {
        if self.frames.is_full() {
            // Shed the frame here instead of blocking in send_frame
            return Err(TransportError::BufferUnavailable(len));
        }
        Ok(vec![0u8; len])
    }

    fn send_frame(&self, frame: Vec<u8>) -> TransportResult {
        self.frames.send(frame)?;
        Ok(())
    }
}
