//! Frame model and header codec for the readout wire format
//!
//! Every frame is a fixed [`HEADER_LEN`]-byte header followed by one
//! little-endian sample slot per channel. Only a handful of header fields
//! matter to this crate; the rest ride along opaquely and are copied
//! verbatim into outbound frames.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};

use super::errors::FrameError;

/// Sample type carried in inbound frame slots (fixed-point phase)
pub type RawSample = i32;

/// Sample type written to outbound frame slots
pub type OutputSample = i32;

/// Width in bytes of one inbound sample slot
pub const RAW_SAMPLE_LEN: usize = size_of::<RawSample>();

/// Width in bytes of one outbound sample slot
pub const OUTPUT_SAMPLE_LEN: usize = size_of::<OutputSample>();

/// Fixed header length at the front of every frame, in bytes
pub const HEADER_LEN: usize = 128;

/// Transport flag bit marking a frame as stale; flagged frames are dropped
pub const FLAG_STALE: u32 = 0x100;

// Little-endian field offsets inside the header
const VERSION_OFFSET: usize = 0;
const NUM_CHANNELS_OFFSET: usize = 4;
const TIMESTAMP_OFFSET: usize = 48;
const FRAME_COUNTER_OFFSET: usize = 84;

/// One inbound transport frame: payload bytes plus delivery metadata
///
/// `error` and `flags` come from the transport layer, not from the payload;
/// a frame with `error` set or the [`FLAG_STALE`] bit in `flags` is dropped
/// before any payload byte is looked at.
#[derive(Clone, Debug)]
pub struct RawFrame {
    /// Header + sample slots as delivered by the front end
    pub payload: Vec<u8>,
    /// Transport-level error indication (CRC failure, truncation, ...)
    pub error: bool,
    /// Transport flag bits
    pub flags: u32,
}

impl RawFrame {
    /// Create a clean frame (no transport error, no flags)
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            error: false,
            flags: 0,
        }
    }
}

/// Owned copy of one frame header
///
/// Built by copying the first [`HEADER_LEN`] bytes of a payload. Accessors
/// decode the fields this crate reads or rewrites; everything else is
/// opaque. The copy published to the transmitter has its channel-count
/// field overwritten with the processor's output channel count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    bytes: [u8; HEADER_LEN],
}

impl FrameHeader {
    /// Copy the header out of the front of `payload`
    pub fn from_slice(payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() < HEADER_LEN {
            return Err(FrameError::TooShort(payload.len(), HEADER_LEN));
        }
        let mut bytes = [0u8; HEADER_LEN];
        bytes.copy_from_slice(&payload[..HEADER_LEN]);
        Ok(Self { bytes })
    }

    /// All-zero header, for synthesizing frames in tests and tools
    pub fn zeroed() -> Self {
        Self {
            bytes: [0; HEADER_LEN],
        }
    }

    /// Header format version stamped by the front end
    #[inline]
    pub fn version(&self) -> u8 {
        self.bytes[VERSION_OFFSET]
    }

    pub fn set_version(&mut self, version: u8) {
        self.bytes[VERSION_OFFSET] = version;
    }

    /// Number of channel slots following the header
    #[inline]
    pub fn num_channels(&self) -> u32 {
        LittleEndian::read_u32(&self.bytes[NUM_CHANNELS_OFFSET..NUM_CHANNELS_OFFSET + 4])
    }

    pub fn set_num_channels(&mut self, num_channels: u32) {
        LittleEndian::write_u32(
            &mut self.bytes[NUM_CHANNELS_OFFSET..NUM_CHANNELS_OFFSET + 4],
            num_channels,
        );
    }

    /// Front-end timestamp in nanoseconds
    #[inline]
    pub fn timestamp(&self) -> u64 {
        LittleEndian::read_u64(&self.bytes[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + 8])
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        LittleEndian::write_u64(
            &mut self.bytes[TIMESTAMP_OFFSET..TIMESTAMP_OFFSET + 8],
            timestamp,
        );
    }

    /// Rolling frame counter stamped by the front end
    #[inline]
    pub fn frame_counter(&self) -> u32 {
        LittleEndian::read_u32(&self.bytes[FRAME_COUNTER_OFFSET..FRAME_COUNTER_OFFSET + 4])
    }

    pub fn set_frame_counter(&mut self, count: u32) {
        LittleEndian::write_u32(
            &mut self.bytes[FRAME_COUNTER_OFFSET..FRAME_COUNTER_OFFSET + 4],
            count,
        );
    }

    /// Raw header bytes, for copying into an outbound frame
    #[inline]
    pub fn as_bytes(&self) -> &[u8; HEADER_LEN] {
        &self.bytes
    }
}

impl fmt::Display for FrameHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "FrameHeader[v={}, ch={}, cnt={}, t={}]",
            self.version(),
            self.num_channels(),
            self.frame_counter(),
            self.timestamp()
        )
    }
}

/// Decode the raw sample in slot `channel` of `sample_area` (the bytes
/// immediately after the header).
///
/// `channel` must address a slot inside `sample_area`; callers validate
/// against the frame's advertised channel count before decoding.
#[inline]
pub fn read_raw_sample(sample_area: &[u8], channel: usize) -> RawSample {
    let offset = channel * RAW_SAMPLE_LEN;
    LittleEndian::read_i32(&sample_area[offset..offset + RAW_SAMPLE_LEN])
}

/// Encode one output sample into slot `channel` after the header of `buf`
#[inline]
pub fn write_output_sample(buf: &mut [u8], channel: usize, value: OutputSample) {
    let offset = HEADER_LEN + channel * OUTPUT_SAMPLE_LEN;
    LittleEndian::write_i32(&mut buf[offset..offset + OUTPUT_SAMPLE_LEN], value);
}

/// Decode the output sample in slot `channel` of an outbound frame payload
#[inline]
pub fn read_output_sample(payload: &[u8], channel: usize) -> OutputSample {
    let offset = HEADER_LEN + channel * OUTPUT_SAMPLE_LEN;
    LittleEndian::read_i32(&payload[offset..offset + OUTPUT_SAMPLE_LEN])
}
