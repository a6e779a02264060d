use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, Command, ValueHint};
use log::LevelFilter;

use stats_trends::config::AnalysisConfig;
use stats_trends::pipeline;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("STATS_TRENDS_LOG", "info"))
        .init();

    let matches = Command::new("stats-trends")
        .version(clap::crate_version!())
        .about("Clean a tabular dataset, draw three charts and report statistical moments")
        .arg(
            Arg::new("config")
                .help("Path to a JSON analysis configuration. Defaults describe the water consumption dataset.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .help("Dataset to analyse (.csv, .json or .parquet). Overrides the configuration.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("output_dir")
                .short('o')
                .long("output-dir")
                .help("Directory the chart images are written to. Overrides the configuration.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("column")
                .short('c')
                .long("column")
                .help("Column whose moments are reported. Overrides the configuration.")
                .value_parser(clap::builder::NonEmptyStringValueParser::new()),
        )
        .get_matches();

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(input) = matches.get_one::<PathBuf>("input") {
        config.input = input.clone();
    }
    if let Some(dir) = matches.get_one::<PathBuf>("output_dir") {
        config.output_dir = dir.clone();
    }
    if let Some(column) = matches.get_one::<String>("column") {
        config.moments_column = column.clone();
    }

    let stdout = std::io::stdout();
    let outcome = pipeline::run(&config, &mut stdout.lock())?;
    log::info!(
        "Wrote {} charts to {}",
        outcome.charts.len(),
        config.output_dir.display()
    );
    Ok(())
}
