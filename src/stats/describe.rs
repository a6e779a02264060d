use statrs::statistics::Statistics;

use crate::data::model::Table;

/// Summary statistics of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Pairwise Pearson correlations between numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `columns.len()` squared entries.
    pub values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.columns.len() + col]
    }
}

/// Summaries for every numeric data column, in column order.
/// Columns without any value are skipped.
pub fn describe(table: &Table) -> Vec<ColumnSummary> {
    table
        .numeric_columns()
        .into_iter()
        .filter_map(|name| {
            let mut values = table.numeric_values(name).ok()?;
            if values.is_empty() {
                return None;
            }
            values.sort_by(f64::total_cmp);
            Some(ColumnSummary {
                column: name.to_string(),
                count: values.len(),
                mean: values.iter().mean(),
                std: values.iter().std_dev(),
                min: values[0],
                q25: quantile_sorted(&values, 0.25),
                median: quantile_sorted(&values, 0.5),
                q75: quantile_sorted(&values, 0.75),
                max: values[values.len() - 1],
            })
        })
        .collect()
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Pearson correlation matrix over numeric data columns. Each pair uses the
/// rows where both values are present.
pub fn correlation(table: &Table) -> CorrelationMatrix {
    let names = table.numeric_columns();
    let positions: Vec<usize> = names
        .iter()
        .filter_map(|n| table.column_position(n).ok())
        .collect();

    let mut values = Vec::with_capacity(positions.len() * positions.len());
    for &a in &positions {
        for &b in &positions {
            let (xs, ys): (Vec<f64>, Vec<f64>) = table
                .rows
                .iter()
                .filter_map(|r| Some((r.values[a].as_f64()?, r.values[b].as_f64()?)))
                .unzip();
            values.push(pearson(&xs, &ys));
        }
    }

    CorrelationMatrix {
        columns: names.into_iter().map(str::to_string).collect(),
        values,
    }
}

/// Pearson's r. NaN when fewer than two pairs or either side is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() < 2 || xs.len() != ys.len() {
        return f64::NAN;
    }
    let mx = xs.iter().mean();
    let my = ys.iter().mean();
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}
