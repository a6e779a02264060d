use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::charts::{
    categorical_plot, relational_plot, statistical_plot, CATEGORICAL_FILE, RELATIONAL_FILE,
    STATISTICAL_FILE,
};
use crate::config::AnalysisConfig;
use crate::data::clean::{preprocess, CleanSummary};
use crate::data::loader::load_file;
use crate::data::model::Table;
use crate::report::{write_exploration, write_moments};
use crate::stats::{column_moments, Moments};

// ---------------------------------------------------------------------------
// Analysis run
// ---------------------------------------------------------------------------

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub clean: CleanSummary,
    /// Chart files, in the order relational, statistical, categorical.
    pub charts: Vec<PathBuf>,
    pub column: String,
    pub moments: Moments,
}

/// Load, clean, explore, chart and summarise the dataset named in `config`.
/// Text output goes to `out`; charts land in `config.output_dir`.
pub fn run<W: Write>(config: &AnalysisConfig, out: &mut W) -> Result<AnalysisOutcome> {
    let table = load_file(&config.input)?;
    let (table, clean) = prepare(table, config, out)?;

    let charts = render_charts(&table, config)?;

    let moments = column_moments(&table, &config.moments_column)
        .with_context(|| format!("computing moments of '{}'", config.moments_column))?;
    write_moments(out, &config.moments_column, &moments)?;

    Ok(AnalysisOutcome {
        clean,
        charts,
        column: config.moments_column.clone(),
        moments,
    })
}

/// Clean a loaded table and print the exploration tables.
pub fn prepare<W: Write>(
    table: Table,
    config: &AnalysisConfig,
    out: &mut W,
) -> Result<(Table, CleanSummary)> {
    let (table, clean) = preprocess(table, &config.index).context("cleaning dataset")?;
    log::info!(
        "Cleaned dataset: {} of {} rows kept ({} duplicates, {} with missing values)",
        clean.rows_out,
        clean.rows_in,
        clean.duplicates_removed,
        clean.null_rows_removed
    );
    write_exploration(out, &table, config.head_rows)?;
    Ok((table, clean))
}

/// Draw the three charts into the output directory, creating it if needed.
pub fn render_charts(table: &Table, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("creating output directory {}", config.output_dir.display())
    })?;

    let relational = config.output_dir.join(RELATIONAL_FILE);
    relational_plot(table, &config.relational, &relational, config.chart_size)
        .context("drawing relational plot")?;

    let statistical = config.output_dir.join(STATISTICAL_FILE);
    statistical_plot(table, &config.distribution, &statistical, config.chart_size)
        .context("drawing statistical plot")?;

    let categorical = config.output_dir.join(CATEGORICAL_FILE);
    categorical_plot(table, &config.categorical, &categorical, config.chart_size)
        .context("drawing categorical plot")?;

    Ok(vec![relational, statistical, categorical])
}
