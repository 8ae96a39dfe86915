//! Reduction of a run's memory samples into summary statistics.

/// Peak and mean of one run's sample sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub peak: f64,
    pub avg: f64,
}

/// Reduce a sample sequence to its peak and arithmetic mean.
///
/// An empty sequence is a defined edge case, not an error: both fields
/// come back as zero. Inputs are non-negative memory readings, so no
/// NaN/infinity handling is needed.
pub fn summarize(samples: &[f64]) -> SampleSummary {
    if samples.is_empty() {
        return SampleSummary { peak: 0.0, avg: 0.0 };
    }

    let peak = samples.iter().copied().fold(f64::MIN, f64::max);
    let avg = samples.iter().sum::<f64>() / samples.len() as f64;

    SampleSummary { peak, avg }
}
