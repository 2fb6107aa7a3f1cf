//! Statistical helpers shared by the analysis stages.
//!
//! - **Quantiles** (`quantile`): Type 7 empirical quantiles and credible intervals
//! - **Histogram** (`histogram`): Equal-width binning of lift samples

mod histogram;
mod quantile;

pub use histogram::{Histogram, HistogramBin};
pub use quantile::{
    compute_quantile, compute_quantile_sorted, credible_interval, interval_excludes_zero,
};
