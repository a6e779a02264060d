//! Descriptive statistics over cleaned tables: the four reported moments,
//! column summaries and correlations, and the binning / density estimates
//! behind the distribution chart.

pub mod density;
pub mod describe;
pub mod moments;

pub use moments::{column_moments, moments, Moments};
