//! Channel selection and phase unwrap
//!
//! The front end sends one raw fixed-point phase sample per physical
//! channel. [`ChannelMapper`] picks the subset of channels this processor
//! cares about (the mask) and defines their output order; [`Unwrapper`]
//! turns each selected channel's wrapping raw value into a continuous one
//! by tracking range crossings in a per-channel wrap counter.
//!
//! Both live behind their own locks in the processor: the mask length is
//! the output channel count, which sizes every downstream buffer, so mask
//! swaps and the resets they trigger must complete between frames.

use crate::runtime::errors::{ConfigError, FrameError};
use crate::runtime::frame::{RawSample, read_raw_sample};

/// Unwrapped phase sample, widened so accumulated wrap steps cannot
/// overflow the raw sample range
pub type UnwrappedSample = i64;

/// Raw value above which a sample counts as "near the top" of the range
pub const UNWRAP_UPPER: RawSample = 0x6000;

/// Raw value below which a sample counts as "near the bottom" of the range
pub const UNWRAP_LOWER: RawSample = -0x6000;

/// One full revolution in raw counts, added or removed per crossing
pub const UNWRAP_STEP: UnwrappedSample = 0x10000;

// ────────────────────────────────────────────────────────────────────────────
// ChannelMapper
// ────────────────────────────────────────────────────────────────────────────

/// Ordered selection of source channels
///
/// `mask[i]` is the input channel feeding output channel `i`; the mask
/// length is the output channel count. A freshly constructed mapper maps
/// every output channel to input channel 0, mirroring the front end's
/// power-on state.
pub struct ChannelMapper {
    mask: Vec<usize>,
    max_channels: usize,
}

impl ChannelMapper {
    /// Mapper with `max_channels` output channels, all reading channel 0
    pub fn new(max_channels: usize) -> Self {
        Self {
            mask: vec![0; max_channels],
            max_channels,
        }
    }

    /// Replace the mask
    ///
    /// Rejects masks longer than the supported channel count and entries
    /// beyond it, leaving the current mask untouched (no partial update).
    /// Returns whether the output channel count changed, in which case the
    /// caller must reset unwrap and filter state before the next frame.
    pub fn set_mask(&mut self, mask: &[usize]) -> Result<bool, ConfigError> {
        if mask.len() > self.max_channels {
            return Err(ConfigError::MaskTooLong(mask.len(), self.max_channels));
        }
        for (index, &value) in mask.iter().enumerate() {
            if value > self.max_channels {
                return Err(ConfigError::MaskEntryOutOfRange {
                    index,
                    value,
                    max: self.max_channels,
                });
            }
        }

        let changed = mask.len() != self.mask.len();
        self.mask = mask.to_vec();
        Ok(changed)
    }

    /// Current mask
    pub fn mask(&self) -> &[usize] {
        &self.mask
    }

    /// Current output channel count (the mask length)
    pub fn num_channels(&self) -> usize {
        self.mask.len()
    }

    /// Largest input channel index this mapper will accept in a mask
    pub fn max_channels(&self) -> usize {
        self.max_channels
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Unwrapper
// ────────────────────────────────────────────────────────────────────────────

/// Per-channel phase unwrap state
///
/// Keeps a single frame of history per channel (`previous`), a signed wrap
/// counter, and the latest unwrapped values. All four vectors always have
/// the same length and are resized together by [`Unwrapper::resize`].
pub struct Unwrapper {
    enabled: bool,
    current: Vec<RawSample>,
    previous: Vec<RawSample>,
    wrap_counter: Vec<UnwrappedSample>,
    unwrapped: Vec<UnwrappedSample>,
}

impl Unwrapper {
    /// Unwrapper for `num_channels` output channels, enabled, all history
    /// zeroed
    pub fn new(num_channels: usize) -> Self {
        Self {
            enabled: true,
            current: vec![0; num_channels],
            previous: vec![0; num_channels],
            wrap_counter: vec![0; num_channels],
            unwrapped: vec![0; num_channels],
        }
    }

    /// Zero every state vector, keeping the channel count
    pub fn reset(&mut self) {
        let num_channels = self.unwrapped.len();
        self.resize(num_channels);
    }

    /// Resize every state vector to `num_channels` and zero it
    pub fn resize(&mut self, num_channels: usize) {
        self.current = vec![0; num_channels];
        self.previous = vec![0; num_channels];
        self.wrap_counter = vec![0; num_channels];
        self.unwrapped = vec![0; num_channels];
    }

    /// Enable or disable unwrapping
    ///
    /// Enabling (even redundantly) zeroes all unwrap state, so a stage
    /// that was bypassed never resumes with stale wrap counters. Disabling
    /// leaves state alone; while disabled, unwrapped values equal the raw
    /// values and the counters are unobservable.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if enabled {
            self.reset();
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Latest unwrapped values, one per output channel
    pub fn unwrapped(&self) -> &[UnwrappedSample] {
        &self.unwrapped
    }

    /// Map and unwrap one frame's samples in a single pass
    ///
    /// `sample_area` holds the bytes immediately after the frame header;
    /// `number_channels` is the channel count the header advertises. Every
    /// mask entry is checked against it before any state changes, so a bad
    /// entry drops the whole frame without half-updating history.
    pub fn ingest(
        &mut self,
        mask: &[usize],
        number_channels: usize,
        sample_area: &[u8],
    ) -> Result<(), FrameError> {
        debug_assert_eq!(mask.len(), self.unwrapped.len());

        for (index, &value) in mask.iter().enumerate() {
            if value >= number_channels {
                return Err(FrameError::MaskBeyondFrame {
                    index,
                    value,
                    channels: number_channels,
                });
            }
        }

        // One frame of history: last frame's current becomes previous
        std::mem::swap(&mut self.previous, &mut self.current);

        for (i, &source) in mask.iter().enumerate() {
            let raw = read_raw_sample(sample_area, source);
            self.current[i] = raw;

            if self.enabled {
                if raw > UNWRAP_UPPER && self.previous[i] < UNWRAP_LOWER {
                    // Jumped bottom-to-top: the phase rolled downward
                    self.wrap_counter[i] -= UNWRAP_STEP;
                } else if raw < UNWRAP_LOWER && self.previous[i] > UNWRAP_UPPER {
                    // Jumped top-to-bottom: the phase rolled upward
                    self.wrap_counter[i] += UNWRAP_STEP;
                }
                self.unwrapped[i] = raw as UnwrappedSample + self.wrap_counter[i];
            } else {
                self.unwrapped[i] = raw as UnwrappedSample;
            }
        }

        Ok(())
    }
}
