//! Static PNG charts rendered with the [`plotters`] bitmap backend.
//!
//! Each chart module takes the cleaned table plus its chart settings and
//! writes one image. Sizes come from the analysis config; fonts use the
//! generic `sans-serif` family.

use std::ops::Range;

use plotters::style::RGBColor;

use crate::error::ChartError;

pub mod categorical;
pub mod distribution;
pub mod relational;

pub use categorical::categorical_plot;
pub use distribution::statistical_plot;
pub use relational::relational_plot;

pub const RELATIONAL_FILE: &str = "relational_plot.png";
pub const CATEGORICAL_FILE: &str = "categorical_plot.png";
pub const STATISTICAL_FILE: &str = "statistical_plot.png";

pub(crate) const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);

type Result<T> = core::result::Result<T, ChartError>;

/// Axis range covering `values` with 5% headroom on both sides.
/// A single repeated value gets a unit-wide range around it.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>) -> Result<Range<f64>> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return Err(ChartError::InvalidData("no finite values to plot".to_string()));
    }
    if lo == hi {
        return Ok(lo - 1.0..hi + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    Ok(lo - pad..hi + pad)
}

/// Value range for bars or counts that grow from zero.
pub(crate) fn zero_based_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo == hi {
        return 0.0..1.0;
    }
    lo * 1.1..hi * 1.1
}
