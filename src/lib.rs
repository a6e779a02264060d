//! Exploratory analysis of a tabular dataset: clean it, draw a relational,
//! a categorical and a distribution chart, and report the mean, standard
//! deviation, skewness and excess kurtosis of one column.

pub mod charts;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod stats;
