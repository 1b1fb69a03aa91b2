//! Real-time processing pipeline for multi-channel sensor frames
//!
//! This library takes a stream of fixed-layout binary frames, selects and
//! reorders channels through a configurable mask, undoes phase roll-over,
//! runs a per-channel IIR filter across consecutive frames, decimates, and
//! hands the surviving frames to a transport on a dedicated worker thread.
//!
//! # Architecture
//!
//! - **FrameProcessor**: The pipeline facade; feed it frames through
//!   [`FrameSink`], reconfigure it from any thread
//! - **Mapper / Unwrapper / FilterBank / Decimator**: The stages, each
//!   behind its own lock so reconfiguration never tears a frame
//! - **Transmitter**: Single-slot handoff to a worker thread; when the
//!   transport is slower than the source, only the newest pending frame
//!   survives
//!
//! # Example
//!
//! ```no_run
//! use framepipe::{
//!     ChannelTransport, FrameHeader, FrameProcessor, FrameSink, HEADER_LEN, RAW_SAMPLE_LEN,
//!     RawFrame,
//! };
//!
//! let (transport, rx) = ChannelTransport::with_capacity(16);
//! let processor = FrameProcessor::with_max_channels(transport, 8);
//! processor.set_mask(&[0, 1, 2])?;
//! processor.set_factor(10)?;
//!
//! // An eight-channel frame: 128-byte header plus one sample per channel
//! let mut payload = vec![0u8; HEADER_LEN + 8 * RAW_SAMPLE_LEN];
//! let mut header = FrameHeader::zeroed();
//! header.set_num_channels(8);
//! payload[..HEADER_LEN].copy_from_slice(header.as_bytes());
//! processor.accept_frame(&RawFrame::new(payload));
//!
//! // Every tenth accepted frame comes out of the transport
//! let _processed = rx.recv();
//! # Ok::<(), framepipe::ConfigError>(())
//! ```

pub mod pipeline;
pub mod runtime;

// Re-export the pipeline facade and its stages
pub use pipeline::{
    ChannelMapper, DEFAULT_FACTOR, DEFAULT_MAX_CHANNELS, DEFAULT_ORDER, Decimator, FilterBank,
    FrameProcessor, UnwrappedSample, Unwrapper,
};

// Re-export frame data types and ports from runtime
pub use runtime::{
    ChannelTransport, ConfigError, FLAG_STALE, FrameError, FrameHeader, FrameSink, FrameTransport,
    HEADER_LEN, OUTPUT_SAMPLE_LEN, OutputSample, RAW_SAMPLE_LEN, RawFrame, RawSample,
    TransportError, TransportResult,
};
