//! Amplitude threshold detection over one block of samples.

/// Per-block signal metrics and the activity decision.
///
/// Only [`active`](Self::active) gates capture state transitions. The
/// remaining fields are diagnostic signals useful for logging and tuning
/// the threshold, and never influence the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockMetrics {
    /// Arithmetic mean of the raw samples.
    ///
    /// Close to zero for any symmetric waveform; a large value indicates
    /// DC offset rather than loudness.
    pub mean: f32,

    /// Arithmetic mean of the absolute sample values.
    pub mean_abs: f32,

    /// Largest absolute sample in the block.
    pub peak: f32,

    /// `mean_abs > threshold` - the block counts as sound, not silence.
    pub active: bool,

    /// Diagnostic: at least one sample exceeds the threshold in magnitude.
    pub any_over: bool,

    /// Diagnostic: the raw mean exceeds the threshold in magnitude.
    pub mean_over: bool,
}

impl BlockMetrics {
    /// Analyzes one block of signal-channel samples against a threshold.
    ///
    /// Pure function of its inputs. An empty block is silent
    /// (`active == false`), not an error.
    #[must_use]
    pub fn analyze(samples: &[f32], threshold: f32) -> Self {
        if samples.is_empty() {
            return Self::silent();
        }

        let mut sum = 0.0_f64;
        let mut abs_sum = 0.0_f64;
        let mut peak = 0.0_f32;

        for &sample in samples {
            sum += f64::from(sample);
            let abs = sample.abs();
            abs_sum += f64::from(abs);
            if abs > peak {
                peak = abs;
            }
        }

        let count = samples.len() as f64;
        let mean = (sum / count) as f32;
        let mean_abs = (abs_sum / count) as f32;

        Self {
            mean,
            mean_abs,
            peak,
            active: mean_abs > threshold,
            any_over: peak > threshold,
            mean_over: mean.abs() > threshold,
        }
    }

    fn silent() -> Self {
        Self {
            mean: 0.0,
            mean_abs: 0.0,
            peak: 0.0,
            active: false,
            any_over: false,
            mean_over: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = 0.001;

    #[test]
    fn test_loud_block_is_active() {
        let samples = [0.5_f32, -0.5, 0.5, -0.5];
        let metrics = BlockMetrics::analyze(&samples, THRESHOLD);
        assert!(metrics.active);
        assert!((metrics.mean_abs - 0.5).abs() < 1e-6);
        assert!(metrics.mean.abs() < 1e-6);
        assert!((metrics.peak - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_silent_block_is_inactive() {
        let samples = [0.0_f32; 128];
        let metrics = BlockMetrics::analyze(&samples, THRESHOLD);
        assert!(!metrics.active);
        assert_eq!(metrics.mean_abs, 0.0);
    }

    #[test]
    fn test_empty_block_is_silent() {
        let metrics = BlockMetrics::analyze(&[], THRESHOLD);
        assert!(!metrics.active);
        assert_eq!(metrics.peak, 0.0);
    }

    #[test]
    fn test_exactly_at_threshold_is_inactive() {
        // Strict comparison: mean_abs must exceed the threshold.
        let samples = [THRESHOLD; 8];
        let metrics = BlockMetrics::analyze(&samples, THRESHOLD);
        assert!(!metrics.active);
    }

    #[test]
    fn test_single_spike_does_not_activate() {
        // One loud sample among many zeros trips the per-sample diagnostic
        // but leaves the mean-abs decision silent.
        let mut samples = [0.0_f32; 1000];
        samples[500] = 0.5;
        let metrics = BlockMetrics::analyze(&samples, THRESHOLD);
        assert!(metrics.any_over);
        assert!(!metrics.active);
    }

    #[test]
    fn test_dc_offset_reported_in_mean() {
        let samples = [0.25_f32; 4];
        let metrics = BlockMetrics::analyze(&samples, THRESHOLD);
        assert!((metrics.mean - 0.25).abs() < 1e-6);
        assert!(metrics.mean_over);
    }

    #[test]
    fn test_negative_samples_count_toward_energy() {
        let samples = [-0.3_f32; 4];
        let metrics = BlockMetrics::analyze(&samples, THRESHOLD);
        assert!(metrics.active);
        assert!((metrics.mean_abs - 0.3).abs() < 1e-6);
        assert!((metrics.mean + 0.3).abs() < 1e-6);
    }
}
