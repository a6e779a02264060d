use std::collections::BTreeMap;
use std::path::Path;

use plotters::prelude::*;

use super::{padded_range, Result, STEEL_BLUE};
use crate::color::ColorMap;
use crate::config::RelationalChart;
use crate::data::model::{Table, Value};
use crate::error::ChartError;

/// Points of a scatter chart grouped by their hue value.
/// Without a hue column every point lands in the `Null` group.
pub fn scatter_groups(
    table: &Table,
    settings: &RelationalChart,
) -> Result<BTreeMap<Value, Vec<(f64, f64)>>> {
    let xs = table.field(&settings.x)?;
    let ys = table.field(&settings.y)?;
    let hues = match &settings.hue {
        Some(h) => Some(table.field(h)?),
        None => None,
    };

    let mut groups: BTreeMap<Value, Vec<(f64, f64)>> = BTreeMap::new();
    for (i, (x, y)) in xs.into_iter().zip(ys).enumerate() {
        let (Some(x), Some(y)) = (x.as_f64(), y.as_f64()) else {
            continue;
        };
        let hue = hues
            .as_ref()
            .map(|h| h[i].clone())
            .unwrap_or(Value::Null);
        groups.entry(hue).or_default().push((x, y));
    }

    if groups.is_empty() {
        return Err(ChartError::InvalidData(format!(
            "no numeric pairs in '{}' and '{}'",
            settings.x, settings.y
        )));
    }
    Ok(groups)
}

/// Scatter plot of `settings.y` against `settings.x`, one colour per hue value,
/// saved as a PNG at `output_path`.
pub fn relational_plot(
    table: &Table,
    settings: &RelationalChart,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    let groups = scatter_groups(table, settings)?;
    let x_range = padded_range(groups.values().flatten().map(|p| p.0))?;
    let y_range = padded_range(groups.values().flatten().map(|p| p.1))?;

    let colors = match &settings.hue {
        Some(h) => Some(ColorMap::new(&table.unique_values(h)?)),
        None => None,
    };

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{} vs {}", settings.x, settings.y), ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc(settings.x.as_str())
        .y_desc(settings.y.as_str())
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    for (hue, points) in &groups {
        let color = colors
            .as_ref()
            .map(|c| c.color_for(hue))
            .unwrap_or(STEEL_BLUE);
        let series = chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 4, color.mix(0.8).filled())),
            )
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
        if colors.is_some() {
            series
                .label(hue.to_string())
                .legend(move |(x, y)| Circle::new((x, y), 4, color.filled()));
        }
    }

    if colors.is_some() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", 14))
            .draw()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
    }

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    log::info!("Saved relational plot to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_records(
            vec!["rain".into(), "depletion".into(), "level".into()],
            vec![
                vec![Value::Float(100.0), Value::Float(1.5), Value::String("Low".into())],
                vec![Value::Float(50.0), Value::Float(3.0), Value::String("High".into())],
                vec![Value::Float(80.0), Value::Null, Value::String("Low".into())],
                vec![Value::Float(120.0), Value::Float(1.0), Value::String("Low".into())],
            ],
        )
    }

    #[test]
    fn groups_points_by_hue() {
        let settings = RelationalChart {
            x: "rain".into(),
            y: "depletion".into(),
            hue: Some("level".into()),
        };
        let groups = scatter_groups(&table(), &settings).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[&Value::String("Low".into())],
            vec![(100.0, 1.5), (120.0, 1.0)]
        );
    }

    #[test]
    fn no_hue_puts_everything_in_one_group() {
        let settings = RelationalChart {
            x: "rain".into(),
            y: "depletion".into(),
            hue: None,
        };
        let groups = scatter_groups(&table(), &settings).unwrap();
        assert_eq!(groups[&Value::Null].len(), 3);
    }

    #[test]
    fn text_axis_has_nothing_to_plot() {
        let settings = RelationalChart {
            x: "level".into(),
            y: "rain".into(),
            hue: None,
        };
        assert!(matches!(
            scatter_groups(&table(), &settings),
            Err(ChartError::InvalidData(_))
        ));
    }
}
