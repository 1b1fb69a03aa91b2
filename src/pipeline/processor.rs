//! The frame processor facade
//!
//! [`FrameProcessor`] wires the pipeline stages together and owns the
//! transmitter worker. Inbound frames enter through [`FrameSink`]; frames
//! that survive validation, mapping, filtering and decimation come out of
//! the transport the processor was built with.
//!
//! Each stage sits behind its own mutex. The frame path takes them in a
//! fixed order — mapper, unwrapper, filter, decimator — and holds the
//! mapper lock until the output frame is handed off, so a configuration
//! write can land between frames but never inside one.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, error};

use super::decimator::Decimator;
use super::filter::FilterBank;
use super::mapper::{ChannelMapper, Unwrapper};
use super::transmitter::{Transmitter, TxJob};
use crate::runtime::errors::{ConfigError, FrameError};
use crate::runtime::frame::{
    FLAG_STALE, FrameHeader, HEADER_LEN, OutputSample, RAW_SAMPLE_LEN, RawFrame,
};
use crate::runtime::ports::{FrameSink, FrameTransport};

/// Channel bound used by [`FrameProcessor::new`]
pub const DEFAULT_MAX_CHANNELS: usize = 4096;

/// Streaming processor for multi-channel sensor frames
///
/// The stages run in a fixed order on the caller's thread; only the final
/// transmit happens on the processor's own worker thread, decoupled
/// through a single-slot handoff that keeps the newest pending frame when
/// the transport is slower than the source.
pub struct FrameProcessor {
    /// Largest channel index a mask entry may name; inbound frames must
    /// carry at least this many channels
    max_channels: usize,
    /// Outbound payload size override in sample slots, shared with the
    /// transmitter worker
    payload_size: Arc<AtomicUsize>,
    mapper: Mutex<ChannelMapper>,
    unwrapper: Mutex<Unwrapper>,
    filter: Mutex<FilterBank>,
    decimator: Mutex<Decimator>,
    tx: Transmitter,
}

impl FrameProcessor {
    /// Create a processor with the [`DEFAULT_MAX_CHANNELS`] bound
    ///
    /// `transport` receives every emitted frame; it moves to the
    /// transmitter worker and is used from that thread only.
    pub fn new(transport: impl FrameTransport + 'static) -> Self {
        Self::with_max_channels(transport, DEFAULT_MAX_CHANNELS)
    }

    /// Create a processor that maps at most `max_channels` channels
    ///
    /// The initial mask has `max_channels` entries, all reading channel 0.
    pub fn with_max_channels(transport: impl FrameTransport + 'static, max_channels: usize) -> Self {
        let payload_size = Arc::new(AtomicUsize::new(0));
        let tx = Transmitter::spawn(Box::new(transport), payload_size.clone());
        Self {
            max_channels,
            payload_size,
            mapper: Mutex::new(ChannelMapper::new(max_channels)),
            unwrapper: Mutex::new(Unwrapper::new(max_channels)),
            filter: Mutex::new(FilterBank::new(max_channels)),
            decimator: Mutex::new(Decimator::new()),
            tx,
        }
    }

    pub fn max_channels(&self) -> usize {
        self.max_channels
    }

    // ────────────────────────────────────────────────────────────────────────
    // Channel mapping
    // ────────────────────────────────────────────────────────────────────────

    /// Replace the channel mask
    ///
    /// A mask longer than the channel bound, or with an entry beyond it,
    /// is rejected whole. When the accepted mask changes the output
    /// channel count, the unwrap and filter state are resized and zeroed
    /// before the next frame can run.
    pub fn set_mask(&self, mask: &[usize]) -> Result<(), ConfigError> {
        let mapper = &mut *self.mapper.lock().unwrap();
        let changed = match mapper.set_mask(mask) {
            Ok(changed) => changed,
            Err(e) => {
                error!("Rejected mask write: {}", e);
                return Err(e);
            }
        };
        if changed {
            // Still under the mapper lock: no frame sees the new mask with
            // stale downstream state
            let num_channels = mapper.num_channels();
            debug!(
                "Mask length changed to {}, resetting unwrap and filter state",
                num_channels
            );
            self.unwrapper.lock().unwrap().resize(num_channels);
            self.filter.lock().unwrap().resize(num_channels);
        }
        Ok(())
    }

    pub fn mask(&self) -> Vec<usize> {
        self.mapper.lock().unwrap().mask().to_vec()
    }

    /// Output channel count (the current mask length)
    pub fn num_channels(&self) -> usize {
        self.mapper.lock().unwrap().num_channels()
    }

    // ────────────────────────────────────────────────────────────────────────
    // Phase unwrap
    // ────────────────────────────────────────────────────────────────────────

    /// Enable or disable phase unwrapping; enabling zeroes the wrap state
    pub fn set_unwrap_enabled(&self, enabled: bool) {
        self.unwrapper.lock().unwrap().set_enabled(enabled);
    }

    pub fn unwrap_enabled(&self) -> bool {
        self.unwrapper.lock().unwrap().enabled()
    }

    /// Zero the unwrap history and wrap counters
    pub fn reset_unwrapper(&self) {
        self.unwrapper.lock().unwrap().reset();
    }

    // ────────────────────────────────────────────────────────────────────────
    // Filtering
    // ────────────────────────────────────────────────────────────────────────

    /// Enable or disable the filter stage; either change resets it
    pub fn set_filter_enabled(&self, enabled: bool) {
        self.filter.lock().unwrap().set_enabled(enabled);
    }

    pub fn filter_enabled(&self) -> bool {
        self.filter.lock().unwrap().enabled()
    }

    /// Change the filter order; resets the filter when the order differs
    pub fn set_order(&self, order: usize) {
        self.filter.lock().unwrap().set_order(order);
    }

    pub fn order(&self) -> usize {
        self.filter.lock().unwrap().order()
    }

    /// Replace the denominator coefficients
    ///
    /// An unusable vector (empty, or zero leading coefficient) is replaced
    /// by the identity `[1.0]` and the error returned; the filter resets
    /// either way.
    pub fn set_a(&self, coeffs: &[f64]) -> Result<(), ConfigError> {
        let result = self.filter.lock().unwrap().set_a(coeffs);
        if let Err(e) = &result {
            error!("Rejected denominator write: {}", e);
        }
        result
    }

    pub fn a(&self) -> Vec<f64> {
        self.filter.lock().unwrap().a().to_vec()
    }

    /// Replace the numerator coefficients
    ///
    /// An empty vector is replaced by the muting `[0.0]` and the error
    /// returned; the filter resets either way.
    pub fn set_b(&self, coeffs: &[f64]) -> Result<(), ConfigError> {
        let result = self.filter.lock().unwrap().set_b(coeffs);
        if let Err(e) = &result {
            error!("Rejected numerator write: {}", e);
        }
        result
    }

    pub fn b(&self) -> Vec<f64> {
        self.filter.lock().unwrap().b().to_vec()
    }

    /// Output scale factor; applied at emission without a filter reset
    pub fn set_gain(&self, gain: f64) {
        self.filter.lock().unwrap().set_gain(gain);
    }

    pub fn gain(&self) -> f64 {
        self.filter.lock().unwrap().gain()
    }

    /// Zero the filter histories and restart the block cursor
    pub fn reset_filter(&self) {
        self.filter.lock().unwrap().reset();
    }

    // ────────────────────────────────────────────────────────────────────────
    // Decimation
    // ────────────────────────────────────────────────────────────────────────

    /// Enable or disable decimation; the frame count is not reset, so
    /// re-enabling resumes the previous cadence
    pub fn set_decimation_enabled(&self, enabled: bool) {
        self.decimator.lock().unwrap().set_enabled(enabled);
    }

    pub fn decimation_enabled(&self) -> bool {
        self.decimator.lock().unwrap().enabled()
    }

    /// Change the decimation factor; zero is rejected, any other value
    /// restarts the emission window
    pub fn set_factor(&self, factor: usize) -> Result<(), ConfigError> {
        let result = self.decimator.lock().unwrap().set_factor(factor);
        if let Err(e) = &result {
            error!("Rejected decimation factor write: {}", e);
        }
        result
    }

    pub fn factor(&self) -> usize {
        self.decimator.lock().unwrap().factor()
    }

    // ────────────────────────────────────────────────────────────────────────
    // Outbound sizing
    // ────────────────────────────────────────────────────────────────────────

    /// Reserve at least `size` sample slots in every outbound frame
    ///
    /// Zero (the default) sizes outbound frames to the mapped channel
    /// count. Slots beyond the mapped channels are sent as zeros.
    pub fn set_payload_size(&self, size: usize) {
        self.payload_size.store(size, Ordering::Relaxed);
    }

    pub fn payload_size(&self) -> usize {
        self.payload_size.load(Ordering::Relaxed)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Frame path
    // ────────────────────────────────────────────────────────────────────────

    fn process_frame(&self, frame: &RawFrame) -> Result<(), FrameError> {
        if frame.error || frame.flags & FLAG_STALE != 0 {
            return Err(FrameError::Flagged { flags: frame.flags });
        }
        let payload = &frame.payload;
        let header = FrameHeader::from_slice(payload)?;
        let number_channels = header.num_channels() as usize;
        if number_channels < self.max_channels {
            return Err(FrameError::TooFewChannels {
                got: number_channels,
                expected: self.max_channels,
            });
        }
        if HEADER_LEN + number_channels * RAW_SAMPLE_LEN > payload.len() {
            return Err(FrameError::PayloadTooSmall {
                payload: payload.len(),
                channels: number_channels,
            });
        }

        let mapper = self.mapper.lock().unwrap();
        let mut unwrapper = self.unwrapper.lock().unwrap();
        unwrapper.ingest(mapper.mask(), number_channels, &payload[HEADER_LEN..])?;

        // The filter history advances on every accepted frame, including
        // the ones decimation then suppresses
        let mut filter = self.filter.lock().unwrap();
        if filter.enabled() {
            filter.process(unwrapper.unwrapped());
        }

        if !self.decimator.lock().unwrap().tick() {
            return Ok(());
        }

        let samples = if filter.enabled() {
            filter.scaled_output()
        } else {
            unwrapper.unwrapped().iter().map(|&v| v as OutputSample).collect()
        };
        let mut header = header;
        header.set_num_channels(mapper.num_channels() as u32);
        self.tx.publish(TxJob { header, samples });
        Ok(())
    }
}

impl FrameSink for FrameProcessor {
    fn accept_frame(&self, frame: &RawFrame) {
        if let Err(e) = self.process_frame(frame) {
            error!("Dropping inbound frame: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::decimator::DEFAULT_FACTOR;
    use crate::pipeline::filter::DEFAULT_ORDER;
    use crate::runtime::frame::{OUTPUT_SAMPLE_LEN, RawSample, read_output_sample};
    use crate::runtime::ports::ChannelTransport;
    use crossbeam_channel::Receiver;
    use std::time::Duration;

    const RECV_WAIT: Duration = Duration::from_secs(5);
    const SETTLE: Duration = Duration::from_millis(100);

    /// Inbound frame advertising `number_channels` channels, with the
    /// given leading raw values and zeros in the remaining slots
    fn frame(number_channels: usize, values: &[RawSample]) -> RawFrame {
        let mut payload = vec![0u8; HEADER_LEN + number_channels * RAW_SAMPLE_LEN];
        let mut header = FrameHeader::zeroed();
        header.set_num_channels(number_channels as u32);
        payload[..HEADER_LEN].copy_from_slice(header.as_bytes());
        for (i, v) in values.iter().enumerate() {
            let offset = HEADER_LEN + i * RAW_SAMPLE_LEN;
            payload[offset..offset + RAW_SAMPLE_LEN].copy_from_slice(&v.to_le_bytes());
        }
        RawFrame::new(payload)
    }

    fn processor_pair(max_channels: usize) -> (FrameProcessor, Receiver<Vec<u8>>) {
        let (transport, rx) = ChannelTransport::with_capacity(64);
        (FrameProcessor::with_max_channels(transport, max_channels), rx)
    }

    // ── frame path tests ──

    #[test]
    fn test_passthrough_emits_mapped_channels() {
        let (processor, rx) = processor_pair(4);
        processor.set_mask(&[0, 1, 2]).unwrap();
        processor.set_factor(1).unwrap();
        processor.set_filter_enabled(false);

        processor.accept_frame(&frame(4, &[10, 20, -30, 99]));

        let sent = rx.recv_timeout(RECV_WAIT).unwrap();
        assert_eq!(sent.len(), HEADER_LEN + 3 * OUTPUT_SAMPLE_LEN);
        assert_eq!(FrameHeader::from_slice(&sent).unwrap().num_channels(), 3);
        assert_eq!(read_output_sample(&sent, 0), 10);
        assert_eq!(read_output_sample(&sent, 1), 20);
        assert_eq!(read_output_sample(&sent, 2), -30);
    }

    #[test]
    fn test_decimation_keeps_every_nth_frame() {
        let (processor, rx) = processor_pair(2);
        processor.set_mask(&[0]).unwrap();
        processor.set_factor(4).unwrap();
        processor.set_filter_enabled(false);

        for i in 1..=4 {
            processor.accept_frame(&frame(2, &[i * 100, 0]));
        }
        let first = rx.recv_timeout(RECV_WAIT).unwrap();
        assert_eq!(FrameHeader::from_slice(&first).unwrap().num_channels(), 1);
        assert_eq!(read_output_sample(&first, 0), 400);

        for i in 5..=8 {
            processor.accept_frame(&frame(2, &[i * 100, 0]));
        }
        let second = rx.recv_timeout(RECV_WAIT).unwrap();
        assert_eq!(read_output_sample(&second, 0), 800);

        assert!(rx.recv_timeout(SETTLE).is_err());
    }

    #[test]
    fn test_phase_wrap_propagates_to_output() {
        let (processor, rx) = processor_pair(4);
        processor.set_mask(&[0, 1, 2]).unwrap();
        processor.set_factor(1).unwrap();
        processor.set_filter_enabled(false);
        assert!(processor.unwrap_enabled());

        processor.accept_frame(&frame(4, &[10, 5_000_000, -5_000_000, 0]));
        let first = rx.recv_timeout(RECV_WAIT).unwrap();
        assert_eq!(read_output_sample(&first, 1), 5_000_000);
        assert_eq!(read_output_sample(&first, 2), -5_000_000);

        processor.accept_frame(&frame(4, &[10, -5_000_000, -5_000_000, 0]));
        let second = rx.recv_timeout(RECV_WAIT).unwrap();
        assert_eq!(read_output_sample(&second, 0), 10);
        // Channel 1 jumped top-to-bottom: one upward wrap of 0x10000
        assert_eq!(read_output_sample(&second, 1), -5_000_000 + 0x10000);
        // Channel 2 stayed low on both frames: no wrap
        assert_eq!(read_output_sample(&second, 2), -5_000_000);
    }

    #[test]
    fn test_identity_filter_matches_input() {
        let (processor, rx) = processor_pair(2);
        processor.set_mask(&[0, 1]).unwrap();
        processor.set_factor(1).unwrap();
        processor.set_order(0);
        processor.set_a(&[1.0]).unwrap();
        processor.set_b(&[1.0]).unwrap();

        processor.accept_frame(&frame(2, &[123, -456]));

        let sent = rx.recv_timeout(RECV_WAIT).unwrap();
        assert_eq!(read_output_sample(&sent, 0), 123);
        assert_eq!(read_output_sample(&sent, 1), -456);
    }

    #[test]
    fn test_filter_smooths_across_frames() {
        let (processor, rx) = processor_pair(2);
        processor.set_mask(&[0]).unwrap();
        processor.set_factor(1).unwrap();
        processor.set_order(1);
        processor.set_a(&[1.0, 0.0]).unwrap();
        processor.set_b(&[0.5, 0.5]).unwrap();
        processor.set_gain(2.0);

        processor.accept_frame(&frame(2, &[1000, 0]));
        let first = rx.recv_timeout(RECV_WAIT).unwrap();
        // (0.5 * 1000 + 0.5 * 0) * 2
        assert_eq!(read_output_sample(&first, 0), 1000);

        processor.accept_frame(&frame(2, &[1000, 0]));
        let second = rx.recv_timeout(RECV_WAIT).unwrap();
        // (0.5 * 1000 + 0.5 * 1000) * 2
        assert_eq!(read_output_sample(&second, 0), 2000);
    }

    #[test]
    fn test_payload_size_reserves_extra_slots() {
        let (processor, rx) = processor_pair(4);
        processor.set_mask(&[0, 1]).unwrap();
        processor.set_factor(1).unwrap();
        processor.set_filter_enabled(false);
        processor.set_payload_size(6);

        processor.accept_frame(&frame(4, &[7, 8, 0, 0]));
        let sent = rx.recv_timeout(RECV_WAIT).unwrap();
        assert_eq!(sent.len(), HEADER_LEN + 6 * OUTPUT_SAMPLE_LEN);
        assert_eq!(FrameHeader::from_slice(&sent).unwrap().num_channels(), 2);
        assert_eq!(read_output_sample(&sent, 0), 7);
        assert_eq!(read_output_sample(&sent, 1), 8);
        for slot in 2..6 {
            assert_eq!(read_output_sample(&sent, slot), 0);
        }

        // An override smaller than the channel count is ignored
        processor.set_payload_size(1);
        processor.accept_frame(&frame(4, &[5, 6, 0, 0]));
        let sent = rx.recv_timeout(RECV_WAIT).unwrap();
        assert_eq!(sent.len(), HEADER_LEN + 2 * OUTPUT_SAMPLE_LEN);
    }

    #[test]
    fn test_header_fields_pass_through() {
        let (processor, rx) = processor_pair(2);
        processor.set_mask(&[0]).unwrap();
        processor.set_factor(1).unwrap();
        processor.set_filter_enabled(false);

        let mut header = FrameHeader::zeroed();
        header.set_version(3);
        header.set_num_channels(2);
        header.set_timestamp(0xDEAD_BEEF_0123);
        header.set_frame_counter(77);
        let mut payload = vec![0u8; HEADER_LEN + 2 * RAW_SAMPLE_LEN];
        payload[..HEADER_LEN].copy_from_slice(header.as_bytes());
        payload[HEADER_LEN..HEADER_LEN + RAW_SAMPLE_LEN].copy_from_slice(&55i32.to_le_bytes());
        processor.accept_frame(&RawFrame::new(payload));

        let sent = rx.recv_timeout(RECV_WAIT).unwrap();
        let out = FrameHeader::from_slice(&sent).unwrap();
        assert_eq!(out.version(), 3);
        // Channel count rewritten to the mapped count, the rest untouched
        assert_eq!(out.num_channels(), 1);
        assert_eq!(out.timestamp(), 0xDEAD_BEEF_0123);
        assert_eq!(out.frame_counter(), 77);
        assert_eq!(read_output_sample(&sent, 0), 55);
    }

    // ── validation tests ──

    #[test]
    fn test_malformed_frames_are_dropped() {
        let (processor, rx) = processor_pair(4);
        processor.set_mask(&[0]).unwrap();
        processor.set_factor(1).unwrap();
        processor.set_filter_enabled(false);

        let mut flagged = frame(4, &[1, 0, 0, 0]);
        flagged.error = true;
        processor.accept_frame(&flagged);

        let mut stale = frame(4, &[2, 0, 0, 0]);
        stale.flags = FLAG_STALE;
        processor.accept_frame(&stale);

        // Shorter than a header
        processor.accept_frame(&RawFrame::new(vec![0u8; HEADER_LEN - 1]));

        // Fewer channels than the processor was built for
        processor.accept_frame(&frame(3, &[3, 0, 0]));

        // Header advertises more samples than the payload carries
        let mut truncated = frame(4, &[4, 0, 0, 0]);
        truncated.payload.truncate(HEADER_LEN + 2 * RAW_SAMPLE_LEN);
        processor.accept_frame(&truncated);

        // A well-formed frame still flows after the rejects
        processor.accept_frame(&frame(4, &[42, 0, 0, 0]));
        let sent = rx.recv_timeout(RECV_WAIT).unwrap();
        assert_eq!(read_output_sample(&sent, 0), 42);
        assert!(rx.recv_timeout(SETTLE).is_err());
    }

    #[test]
    fn test_mask_entry_beyond_frame_drops_frame() {
        let (processor, rx) = processor_pair(4);
        processor.set_factor(1).unwrap();
        processor.set_filter_enabled(false);
        // An entry equal to the channel bound is legal at write time
        processor.set_mask(&[0, 4]).unwrap();

        // ...but a frame carrying exactly four channels cannot satisfy it
        processor.accept_frame(&frame(4, &[1, 2, 3, 4]));
        assert!(rx.recv_timeout(SETTLE).is_err());

        // A five-channel frame can
        processor.accept_frame(&frame(5, &[1, 2, 3, 4, 5]));
        let sent = rx.recv_timeout(RECV_WAIT).unwrap();
        assert_eq!(read_output_sample(&sent, 0), 1);
        assert_eq!(read_output_sample(&sent, 1), 5);
    }

    // ── reconfiguration tests ──

    #[test]
    fn test_mask_swap_resets_downstream_state() {
        let (processor, rx) = processor_pair(4);
        processor.set_factor(1).unwrap();
        processor.set_filter_enabled(false);
        processor.set_mask(&[0, 1]).unwrap();
        assert_eq!(processor.num_channels(), 2);

        // Build up a wrap counter on channel 1
        processor.accept_frame(&frame(4, &[0, 30_000, 0, 0]));
        rx.recv_timeout(RECV_WAIT).unwrap();
        processor.accept_frame(&frame(4, &[0, -30_000, 0, 0]));
        let wrapped = rx.recv_timeout(RECV_WAIT).unwrap();
        assert_eq!(read_output_sample(&wrapped, 1), -30_000 + 0x10000);

        // A different mask length resets the unwrap state
        processor.set_mask(&[1]).unwrap();
        assert_eq!(processor.num_channels(), 1);

        processor.accept_frame(&frame(4, &[0, -30_000, 0, 0]));
        let sent = rx.recv_timeout(RECV_WAIT).unwrap();
        assert_eq!(sent.len(), HEADER_LEN + OUTPUT_SAMPLE_LEN);
        assert_eq!(FrameHeader::from_slice(&sent).unwrap().num_channels(), 1);
        // The same low sample no longer wraps
        assert_eq!(read_output_sample(&sent, 0), -30_000);
    }

    #[test]
    fn test_same_length_mask_swap_keeps_wrap_state() {
        let (processor, rx) = processor_pair(4);
        processor.set_factor(1).unwrap();
        processor.set_filter_enabled(false);
        processor.set_mask(&[0, 1]).unwrap();

        processor.accept_frame(&frame(4, &[0, 30_000, 0, 0]));
        rx.recv_timeout(RECV_WAIT).unwrap();

        // Same length, different sources: history carries over
        processor.set_mask(&[2, 1]).unwrap();
        processor.accept_frame(&frame(4, &[9, -30_000, 9, 0]));
        let sent = rx.recv_timeout(RECV_WAIT).unwrap();
        assert_eq!(read_output_sample(&sent, 0), 9);
        assert_eq!(read_output_sample(&sent, 1), -30_000 + 0x10000);
    }

    #[test]
    fn test_configuration_round_trip() {
        let (processor, _rx) = processor_pair(8);
        assert_eq!(processor.max_channels(), 8);
        assert_eq!(processor.num_channels(), 8);
        assert_eq!(processor.order(), DEFAULT_ORDER);
        assert_eq!(processor.factor(), DEFAULT_FACTOR);
        assert_eq!(processor.payload_size(), 0);
        assert!(processor.unwrap_enabled());
        assert!(processor.filter_enabled());
        assert!(processor.decimation_enabled());

        processor.set_mask(&[3, 1]).unwrap();
        assert_eq!(processor.mask(), vec![3, 1]);
        assert_eq!(processor.num_channels(), 2);

        assert!(matches!(
            processor.set_mask(&[0; 9]).unwrap_err(),
            ConfigError::MaskTooLong(9, 8)
        ));
        assert!(matches!(
            processor.set_mask(&[9]).unwrap_err(),
            ConfigError::MaskEntryOutOfRange { .. }
        ));
        // Rejected writes leave the mask alone
        assert_eq!(processor.mask(), vec![3, 1]);

        processor.set_order(2);
        assert_eq!(processor.order(), 2);
        processor.set_a(&[1.0, -0.5]).unwrap();
        assert_eq!(processor.a(), vec![1.0, -0.5, 0.0]);
        processor.set_b(&[0.25, 0.25]).unwrap();
        assert_eq!(processor.b(), vec![0.25, 0.25, 0.0]);
        processor.set_gain(2.5);
        assert_eq!(processor.gain(), 2.5);
        processor.set_payload_size(16);
        assert_eq!(processor.payload_size(), 16);

        processor.set_unwrap_enabled(false);
        assert!(!processor.unwrap_enabled());
        processor.set_filter_enabled(false);
        assert!(!processor.filter_enabled());
        processor.set_decimation_enabled(false);
        assert!(!processor.decimation_enabled());

        assert!(matches!(processor.set_factor(0), Err(ConfigError::ZeroFactor)));
        processor.set_factor(5).unwrap();
        assert_eq!(processor.factor(), 5);
    }
}
