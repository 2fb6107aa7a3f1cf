//! Equal-width binning of Monte Carlo samples for display.

use serde::{Deserialize, Serialize};

/// One histogram bin covering `[lower, upper)` (the last bin is closed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Upper edge (exclusive except for the last bin).
    pub upper: f64,
    /// Number of samples in the bin.
    pub count: usize,
}

/// Histogram of a sample with equal-width bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bins in ascending order.
    pub bins: Vec<HistogramBin>,
    /// Number of non-finite values skipped.
    pub skipped: usize,
}

impl Histogram {
    /// Bin `values` into at most `max_bins` equal-width bins spanning
    /// `[min, max]`. Non-finite values are skipped and counted.
    ///
    /// A sample with a single distinct value yields one zero-width bin.
    ///
    /// # Panics
    ///
    /// Panics if `max_bins` is zero.
    pub fn from_samples(values: &[f64], max_bins: usize) -> Self {
        assert!(max_bins > 0, "max_bins must be > 0");

        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let skipped = values.len() - finite.len();

        if finite.is_empty() {
            return Self {
                bins: Vec::new(),
                skipped,
            };
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max == min {
            return Self {
                bins: vec![HistogramBin {
                    lower: min,
                    upper: max,
                    count: finite.len(),
                }],
                skipped,
            };
        }

        let n_bins = max_bins.min(finite.len());
        let width = (max - min) / n_bins as f64;

        let mut counts = vec![0usize; n_bins];
        for v in &finite {
            let idx = (((v - min) / width) as usize).min(n_bins - 1);
            counts[idx] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: min + i as f64 * width,
                upper: if i + 1 == n_bins {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                count,
            })
            .collect();

        Self { bins, skipped }
    }

    /// Total number of binned samples.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Largest bin count, or 0 for an empty histogram.
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
