//! Shared-coefficient IIR filter bank
//!
//! Every output channel runs the same direct-form recursion with the same
//! `a`/`b` coefficient vectors; only the per-channel history differs. The
//! histories `x` and `y` are circular over the last `order + 1` frames,
//! stored channel-major per block so one frame advances a single block
//! index instead of shifting samples.
//!
//! Any change to order, coefficients, or the enable flag resets the
//! histories; a reset also re-sizes them to the current channel count and
//! zero-pads the coefficient vectors to at least `order + 1` entries
//! (supplied vectors are never truncated).

use super::mapper::UnwrappedSample;
use crate::runtime::errors::ConfigError;
use crate::runtime::frame::OutputSample;

/// Filter order applied until the control surface says otherwise
pub const DEFAULT_ORDER: usize = 4;

/// Per-channel recursive filter with one shared coefficient set
pub struct FilterBank {
    enabled: bool,
    order: usize,
    gain: f64,
    a: Vec<f64>,
    b: Vec<f64>,
    /// Input history, `(order + 1)` blocks of `num_channels` samples
    x: Vec<f64>,
    /// Output history, laid out like `x`
    y: Vec<f64>,
    /// Block holding the newest frame
    current_block: usize,
    num_channels: usize,
}

impl FilterBank {
    /// Filter bank for `num_channels` output channels with the default
    /// order-4 all-ones coefficients, enabled, histories zeroed
    pub fn new(num_channels: usize) -> Self {
        Self {
            enabled: true,
            order: DEFAULT_ORDER,
            gain: 1.0,
            a: vec![1.0; DEFAULT_ORDER + 1],
            b: vec![1.0; DEFAULT_ORDER + 1],
            x: vec![0.0; (DEFAULT_ORDER + 1) * num_channels],
            y: vec![0.0; (DEFAULT_ORDER + 1) * num_channels],
            // The first frame advances this to block 0
            current_block: DEFAULT_ORDER,
            num_channels,
        }
    }

    /// Zero the histories, size them for the current channel count, and
    /// pad the coefficient vectors to at least `order + 1` entries
    pub fn reset(&mut self) {
        self.x = vec![0.0; (self.order + 1) * self.num_channels];
        self.y = vec![0.0; (self.order + 1) * self.num_channels];
        if self.a.len() < self.order + 1 {
            self.a.resize(self.order + 1, 0.0);
        }
        if self.b.len() < self.order + 1 {
            self.b.resize(self.order + 1, 0.0);
        }
        self.current_block = 0;
    }

    /// Change the channel count and reset
    pub fn resize(&mut self, num_channels: usize) {
        self.num_channels = num_channels;
        self.reset();
    }

    /// Enable or disable filtering; either change resets the histories
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.reset();
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Change the filter order; a no-op when the order is unchanged
    pub fn set_order(&mut self, order: usize) {
        if order != self.order {
            self.order = order;
            self.reset();
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Replace the denominator coefficients
    ///
    /// An empty vector or a zero leading coefficient cannot be filtered
    /// with; the vector is replaced by the identity `[1.0]` and the error
    /// returned. Valid or not, the write resets the filter.
    pub fn set_a(&mut self, coeffs: &[f64]) -> Result<(), ConfigError> {
        let result = if coeffs.is_empty() {
            self.a = vec![1.0];
            Err(ConfigError::EmptyDenominator)
        } else if coeffs[0] == 0.0 {
            self.a = vec![1.0];
            Err(ConfigError::ZeroLeadingDenominator)
        } else {
            self.a = coeffs.to_vec();
            Ok(())
        };
        self.reset();
        result
    }

    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Replace the numerator coefficients
    ///
    /// An empty vector is replaced by `[0.0]` (output mutes) and the error
    /// returned. Valid or not, the write resets the filter.
    pub fn set_b(&mut self, coeffs: &[f64]) -> Result<(), ConfigError> {
        let result = if coeffs.is_empty() {
            self.b = vec![0.0];
            Err(ConfigError::EmptyNumerator)
        } else {
            self.b = coeffs.to_vec();
            Ok(())
        };
        self.reset();
        result
    }

    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Output scale applied at emission; takes effect immediately, no reset
    pub fn set_gain(&mut self, gain: f64) {
        self.gain = gain;
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Advance the circular history one frame and filter every channel
    ///
    /// For the newest block `t` and each channel:
    /// `y[t] = (b[0]*x[t] + Σ_{k=1..order} (b[k]*x[t-k] − a[k]*y[t-k])) / a[0]`
    /// where `t-k` resolves to block `(order + t − k + 1) % (order + 1)`.
    pub fn process(&mut self, input: &[UnwrappedSample]) {
        debug_assert_eq!(input.len(), self.num_channels);

        let blocks = self.order + 1;
        self.current_block = (self.current_block + 1) % blocks;
        let current = self.current_block * self.num_channels;

        for ch in 0..self.num_channels {
            self.x[current + ch] = input[ch] as f64;
            let mut acc = self.b[0] * self.x[current + ch];
            for k in 1..blocks {
                let past = ((self.order + self.current_block - k + 1) % blocks) * self.num_channels;
                acc += self.b[k] * self.x[past + ch] - self.a[k] * self.y[past + ch];
            }
            self.y[current + ch] = acc / self.a[0];
        }
    }

    /// Latest filtered frame with the gain applied, cast to the wire type
    pub fn scaled_output(&self) -> Vec<OutputSample> {
        let start = self.current_block * self.num_channels;
        self.y[start..start + self.num_channels]
            .iter()
            .map(|&v| (v * self.gain) as OutputSample)
            .collect()
    }
}
