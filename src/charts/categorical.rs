use std::path::Path;

use plotters::prelude::*;

use super::{zero_based_range, Result};
use crate::color::generate_palette;
use crate::config::CategoricalChart;
use crate::data::model::Table;
use crate::error::ChartError;
use crate::stats::density::group_means;

/// Bar chart of the mean of `settings.value` for every `settings.category`,
/// categories in sorted order, saved as a PNG at `output_path`.
pub fn categorical_plot(
    table: &Table,
    settings: &CategoricalChart,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    let means = group_means(table, &settings.category, &settings.value)?;
    if means.is_empty() {
        return Err(ChartError::InvalidData(format!(
            "no '{}' values to group by '{}'",
            settings.value, settings.category
        )));
    }

    let labels: Vec<String> = means.iter().map(|(k, _)| k.to_string()).collect();
    let palette = generate_palette(means.len());
    let n = means.len();

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Average {} by {}", settings.value, settings.category),
            ("sans-serif", 24),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(
            -0.5..(n as f64 - 0.5),
            zero_based_range(means.iter().map(|(_, m)| *m)),
        )
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    let category_label = |x: &f64| {
        let slot = x.round();
        if (x - slot).abs() > 1e-6 || slot < 0.0 {
            return String::new();
        }
        labels.get(slot as usize).cloned().unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&category_label)
        .x_desc(settings.category.as_str())
        .y_desc(format!("Avg {}", settings.value))
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(means.iter().enumerate().map(|(i, (_, mean))| {
            let centre = i as f64;
            Rectangle::new(
                [(centre - 0.4, 0.0), (centre + 0.4, *mean)],
                palette[i].filled(),
            )
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    log::info!("Saved categorical plot to {}", output_path.display());
    Ok(())
}
