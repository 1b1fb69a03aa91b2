//! The frame processing pipeline
//!
//! This module provides the fixed stage chain that turns inbound sensor
//! frames into outbound processed frames:
//! - **Mapper**: Selects and reorders input channels through a mask
//! - **Unwrapper**: Undoes phase roll-over on the mapped samples
//! - **Filter**: Per-channel IIR low-pass over consecutive frames
//! - **Decimator**: Keeps one frame in every `factor`
//! - **Transmitter**: Worker thread that formats and sends output frames
//!
//! [`FrameProcessor`] owns all of them and is the only type most callers
//! need.
//!
//! # Examples
//!
//! ```ignore
//! use framepipe::{ChannelTransport, FrameProcessor, FrameSink};
//!
//! let (transport, rx) = ChannelTransport::with_capacity(16);
//! let processor = FrameProcessor::new(transport);
//! processor.set_factor(10)?;
//! // ... feed frames with processor.accept_frame(&frame)
//! # Ok::<(), framepipe::ConfigError>(())
//! ```

mod decimator;
mod filter;
mod mapper;
mod processor;
mod transmitter;

pub use decimator::{DEFAULT_FACTOR, Decimator};
pub use filter::{DEFAULT_ORDER, FilterBank};
pub use mapper::{
    ChannelMapper, UNWRAP_LOWER, UNWRAP_STEP, UNWRAP_UPPER, UnwrappedSample, Unwrapper,
};
pub use processor::{DEFAULT_MAX_CHANNELS, FrameProcessor};
