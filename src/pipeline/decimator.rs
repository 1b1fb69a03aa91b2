//! Output-rate decimation
//!
//! The pipeline runs at the front end's full frame rate; most consumers
//! want a fraction of it. The decimator counts processed frames and lets
//! one out of every `factor` through. Filtering happens before this gate,
//! so filter history stays continuous across suppressed frames.

use crate::runtime::errors::ConfigError;

/// Frames consumed per emitted frame until the control surface says
/// otherwise
pub const DEFAULT_FACTOR: usize = 20;

/// Every-Nth-frame gate
pub struct Decimator {
    enabled: bool,
    factor: usize,
    count: usize,
}

impl Decimator {
    /// Enabled decimator at the default factor
    pub fn new() -> Self {
        Self {
            enabled: true,
            factor: DEFAULT_FACTOR,
            count: 0,
        }
    }

    /// Change the decimation factor
    ///
    /// Zero is rejected and leaves factor and counter untouched. A valid
    /// write restarts the count, so the next emission is exactly `factor`
    /// frames away.
    pub fn set_factor(&mut self, factor: usize) -> Result<(), ConfigError> {
        if factor == 0 {
            return Err(ConfigError::ZeroFactor);
        }
        self.factor = factor;
        self.count = 0;
        Ok(())
    }

    pub fn factor(&self) -> usize {
        self.factor
    }

    /// Enable or disable the gate
    ///
    /// The counter keeps its value across disable/enable, so re-enabling
    /// resumes the cadence rather than restarting it.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Account for one processed frame; returns whether it should be
    /// emitted
    pub fn tick(&mut self) -> bool {
        if !self.enabled {
            return true;
        }
        self.count += 1;
        if self.count < self.factor {
            false
        } else {
            self.count = 0;
            true
        }
    }
}

impl Default for Decimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_emission_per_factor_frames() {
        let mut decimator = Decimator::new();
        decimator.set_factor(4).unwrap();

        let emitted: Vec<bool> = (0..12).map(|_| decimator.tick()).collect();
        let expected: Vec<bool> = (1..=12).map(|i| i % 4 == 0).collect();
        assert_eq!(emitted, expected);
    }

    #[test]
    fn test_factor_one_emits_every_frame() {
        let mut decimator = Decimator::new();
        decimator.set_factor(1).unwrap();
        assert!((0..5).all(|_| decimator.tick()));
    }

    #[test]
    fn test_zero_factor_rejected_keeps_previous() {
        let mut decimator = Decimator::new();
        decimator.set_factor(3).unwrap();
        decimator.tick();

        let err = decimator.set_factor(0).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroFactor));
        assert_eq!(decimator.factor(), 3);

        // Counter untouched by the rejected write: two more frames complete
        // the window of three
        assert!(!decimator.tick());
        assert!(decimator.tick());
    }

    #[test]
    fn test_set_factor_restarts_count() {
        let mut decimator = Decimator::new();
        decimator.set_factor(3).unwrap();
        decimator.tick();
        decimator.tick();

        decimator.set_factor(3).unwrap();
        // A full window again, the two earlier frames forgotten
        assert!(!decimator.tick());
        assert!(!decimator.tick());
        assert!(decimator.tick());
    }

    #[test]
    fn test_disabled_gate_passes_everything() {
        let mut decimator = Decimator::new();
        decimator.set_factor(5).unwrap();
        decimator.tick();
        decimator.set_enabled(false);
        assert!((0..7).all(|_| decimator.tick()));

        // Cadence resumes where it left off once re-enabled
        decimator.set_enabled(true);
        assert!(!decimator.tick());
        assert!(!decimator.tick());
        assert!(!decimator.tick());
        assert!(decimator.tick());
    }
}
