//! Runtime support for the frame-processing pipeline

pub mod errors;
pub mod frame;
pub mod ports;
pub mod slot;

pub use errors::{ConfigError, FrameError, TransportError, TransportResult};
pub use frame::{
    FLAG_STALE, FrameHeader, HEADER_LEN, OUTPUT_SAMPLE_LEN, OutputSample, RAW_SAMPLE_LEN, RawFrame,
    RawSample,
};
pub use ports::{ChannelTransport, FrameSink, FrameTransport};
pub use slot::{SlotReceiver, SlotRecvError, SlotSender, slot};
