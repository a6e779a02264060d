use thiserror::Error;

/// Errors raised when a table does not have the shape an analysis expects.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("column '{0}' not found")]
    MissingColumn(String),

    #[error("column '{0}' is not numeric")]
    NonNumeric(String),

    #[error("column '{0}' has no values")]
    NoValues(String),
}

/// Errors raised while computing descriptive statistics.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("cannot compute statistics of an empty sample")]
    Empty,

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Errors that can occur during chart generation.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save chart to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}
