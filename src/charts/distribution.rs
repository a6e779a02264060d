use std::path::Path;

use plotters::prelude::*;

use super::{padded_range, zero_based_range, Result, STEEL_BLUE};
use crate::config::DistributionChart;
use crate::data::model::Table;
use crate::error::{ChartError, DataError};
use crate::stats::density::{group_means, histogram, GaussianKde, Histogram};

/// Points along the KDE overlay.
const KDE_POINTS: usize = 200;

/// Histogram counts plus a density curve rescaled to the same count axis.
pub fn histogram_with_kde(
    values: &[f64],
    bins: usize,
    kde: bool,
) -> Result<(Histogram, Vec<(f64, f64)>)> {
    let hist = histogram(values, bins)?;
    let curve = if kde {
        match GaussianKde::new(values) {
            Ok(estimate) => {
                let scale = values.len() as f64 * hist.bin_width();
                estimate
                    .curve(KDE_POINTS)
                    .into_iter()
                    .map(|(x, d)| (x, d * scale))
                    .collect()
            }
            Err(e) => {
                log::warn!("Skipping density curve: {e}");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };
    Ok((hist, curve))
}

/// Mean of `column` per numeric `by` key, ascending by key.
pub fn trend_points(table: &Table, column: &str, by: &str) -> Result<Vec<(f64, f64)>> {
    let means = group_means(table, by, column)?;
    let points = means
        .into_iter()
        .map(|(key, mean)| {
            key.as_f64()
                .map(|k| (k, mean))
                .ok_or_else(|| DataError::NonNumeric(by.to_string()))
        })
        .collect::<core::result::Result<Vec<_>, _>>()?;
    if points.is_empty() {
        return Err(ChartError::InvalidData(format!("no values of '{column}'")));
    }
    Ok(points)
}

/// The distribution chart: a histogram (with optional density overlay) or a
/// trend line, depending on `settings`. Saved as a PNG at `output_path`.
pub fn statistical_plot(
    table: &Table,
    settings: &DistributionChart,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    match settings {
        DistributionChart::Histogram { column, bins, kde } => {
            let values = table.numeric_values(column)?;
            if values.is_empty() {
                return Err(DataError::NoValues(column.clone()).into());
            }
            let (hist, curve) = histogram_with_kde(&values, *bins, *kde)?;
            draw_histogram(column, &hist, &curve, output_path, size)?;
        }
        DistributionChart::Trend { column, by } => {
            let points = trend_points(table, column, by)?;
            draw_trend(column, by, &points, output_path, size)?;
        }
    }
    log::info!(
        "Saved statistical plot of '{}' to {}",
        settings.column(),
        output_path.display()
    );
    Ok(())
}

fn draw_histogram(
    column: &str,
    hist: &Histogram,
    curve: &[(f64, f64)],
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    let x_range = padded_range(hist.edges.iter().copied())?;
    let y_range = zero_based_range(
        hist.counts
            .iter()
            .map(|&c| c as f64)
            .chain(curve.iter().map(|p| p.1)),
    );

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Distribution of {column}"), ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(column)
        .y_desc("Frequency")
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(hist.bins().map(|(lo, hi, count)| {
            Rectangle::new([(lo, 0.0), (hi, count as f64)], STEEL_BLUE.mix(0.6).filled())
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    chart
        .draw_series(hist.bins().map(|(lo, hi, count)| {
            Rectangle::new([(lo, 0.0), (hi, count as f64)], WHITE.stroke_width(1))
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    if !curve.is_empty() {
        chart
            .draw_series(LineSeries::new(
                curve.iter().copied(),
                STEEL_BLUE.stroke_width(2),
            ))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
    }

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

fn draw_trend(
    column: &str,
    by: &str,
    points: &[(f64, f64)],
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    let x_range = padded_range(points.iter().map(|p| p.0))?;
    let y_range = padded_range(points.iter().map(|p| p.1))?;

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Mean {column} by {by}"), ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    let key_label = |x: &f64| format!("{x:.0}");
    chart
        .configure_mesh()
        .x_desc(by)
        .y_desc(column)
        .x_label_formatter(&key_label)
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            points.iter().copied(),
            STEEL_BLUE.stroke_width(2),
        ))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, STEEL_BLUE.filled())),
        )
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Value;

    #[test]
    fn kde_overlay_is_scaled_to_counts() {
        let values: Vec<f64> = (0..500).map(|i| ((i * 37) % 101) as f64).collect();
        let (hist, curve) = histogram_with_kde(&values, 30, true).unwrap();
        assert_eq!(curve.len(), KDE_POINTS);

        // area under the rescaled curve ≈ area of the bars
        let bar_area: f64 = hist.counts.iter().map(|&c| c as f64 * hist.bin_width()).sum();
        let curve_area: f64 = curve
            .windows(2)
            .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
            .sum();
        assert!(curve_area < bar_area);
        assert!(curve_area > 0.8 * bar_area, "{curve_area} vs {bar_area}");
    }

    #[test]
    fn constant_values_skip_the_overlay() {
        let (hist, curve) = histogram_with_kde(&[2.0; 10], 30, true).unwrap();
        assert_eq!(hist.counts.iter().sum::<usize>(), 10);
        assert!(curve.is_empty());
    }

    #[test]
    fn trend_needs_numeric_keys() {
        let table = Table::from_records(
            vec!["Year".into(), "Country".into(), "Use".into()],
            vec![
                vec![Value::Integer(2021), Value::String("A".into()), Value::Float(4.0)],
                vec![Value::Integer(2020), Value::String("B".into()), Value::Float(1.0)],
                vec![Value::Integer(2021), Value::String("B".into()), Value::Float(2.0)],
            ],
        );
        let points = trend_points(&table, "Use", "Year").unwrap();
        assert_eq!(points, vec![(2020.0, 1.0), (2021.0, 3.0)]);
        assert!(matches!(
            trend_points(&table, "Use", "Country"),
            Err(ChartError::Data(DataError::NonNumeric(_)))
        ));
    }
}
