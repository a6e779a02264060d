//! Human-readable output: the exploration printout after cleaning, and the
//! moments with their plain-language interpretation.

use std::fmt;
use std::io::{self, Write};

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::data::model::Table;
use crate::stats::describe::{correlation, describe, ColumnSummary};
use crate::stats::Moments;

// ---------------------------------------------------------------------------
// Shape classification
// ---------------------------------------------------------------------------

/// Asymmetry class of a distribution, from its skewness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkewShape {
    RightSkewed,
    LeftSkewed,
    Symmetric,
}

impl SkewShape {
    /// Beyond ±0.5 counts as skewed. NaN is treated as symmetric.
    pub fn classify(skewness: f64) -> Self {
        if skewness > 0.5 {
            SkewShape::RightSkewed
        } else if skewness < -0.5 {
            SkewShape::LeftSkewed
        } else {
            SkewShape::Symmetric
        }
    }
}

impl fmt::Display for SkewShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkewShape::RightSkewed => "right-skewed",
            SkewShape::LeftSkewed => "left-skewed",
            SkewShape::Symmetric => "approximately symmetric",
        })
    }
}

/// Tail weight class of a distribution, from its excess kurtosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailShape {
    Leptokurtic,
    Platykurtic,
    Mesokurtic,
}

impl TailShape {
    /// Beyond ±1 counts as heavy or light tailed. NaN is treated as normal-like.
    pub fn classify(excess_kurtosis: f64) -> Self {
        if excess_kurtosis > 1.0 {
            TailShape::Leptokurtic
        } else if excess_kurtosis < -1.0 {
            TailShape::Platykurtic
        } else {
            TailShape::Mesokurtic
        }
    }
}

impl fmt::Display for TailShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TailShape::Leptokurtic => "leptokurtic (heavy-tailed)",
            TailShape::Platykurtic => "platykurtic (light-tailed)",
            TailShape::Mesokurtic => "mesokurtic (normal-like)",
        })
    }
}

// ---------------------------------------------------------------------------
// Moments
// ---------------------------------------------------------------------------

/// Print the moments of `column` followed by the shape interpretation.
pub fn write_moments<W: Write>(out: &mut W, column: &str, m: &Moments) -> io::Result<()> {
    writeln!(out, "\nFor the attribute {column}:")?;
    writeln!(
        out,
        "Mean = {:.2}, Standard Deviation = {:.2}, Skewness = {:.2}, and Excess Kurtosis = {:.2}.",
        m.mean, m.std_dev, m.skewness, m.excess_kurtosis
    )?;
    writeln!(
        out,
        "The data is {} and {}.",
        SkewShape::classify(m.skewness),
        TailShape::classify(m.excess_kurtosis)
    )
}

// ---------------------------------------------------------------------------
// Exploration tables
// ---------------------------------------------------------------------------

/// Print the first rows, the per-column summary and the correlation matrix.
pub fn write_exploration<W: Write>(out: &mut W, table: &Table, head_rows: usize) -> io::Result<()> {
    writeln!(out, "\nDataset Head:\n{}", head_table(table, head_rows))?;
    writeln!(out, "\nDataset Description:\n{}", describe_table(table))?;
    writeln!(out, "\nCorrelation Matrix:\n{}", correlation_table(table))
}

fn head_table(table: &Table, n: usize) -> String {
    let mut builder = Builder::default();

    let index_header = if table.index_names.is_empty() {
        vec![String::new()]
    } else {
        table.index_names.clone()
    };
    builder.push_record(index_header.into_iter().chain(table.columns.iter().cloned()));

    for (pos, row) in table.head(n).iter().enumerate() {
        let index: Vec<String> = if row.index.is_empty() {
            vec![pos.to_string()]
        } else {
            row.index.iter().map(|v| v.to_string()).collect()
        };
        builder.push_record(index.into_iter().chain(row.values.iter().map(|v| v.to_string())));
    }

    builder.build().with(Style::psql()).to_string()
}

fn describe_table(table: &Table) -> String {
    let summaries = describe(table);
    if summaries.is_empty() {
        return "(no numeric columns)".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(
        std::iter::once(String::new()).chain(summaries.iter().map(|s| s.column.clone())),
    );

    let stats: [(&str, fn(&ColumnSummary) -> f64); 8] = [
        ("count", |s| s.count as f64),
        ("mean", |s| s.mean),
        ("std", |s| s.std),
        ("min", |s| s.min),
        ("25%", |s| s.q25),
        ("50%", |s| s.median),
        ("75%", |s| s.q75),
        ("max", |s| s.max),
    ];
    for (label, pick) in stats {
        builder.push_record(
            std::iter::once(label.to_string())
                .chain(summaries.iter().map(|s| format_number(pick(s)))),
        );
    }

    builder.build().with(Style::psql()).to_string()
}

fn correlation_table(table: &Table) -> String {
    let corr = correlation(table);
    if corr.columns.is_empty() {
        return "(no numeric columns)".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(std::iter::once(String::new()).chain(corr.columns.iter().cloned()));
    for (i, name) in corr.columns.iter().enumerate() {
        builder.push_record(
            std::iter::once(name.clone())
                .chain((0..corr.columns.len()).map(|j| format_number(corr.get(i, j)))),
        );
    }

    builder.build().with(Style::psql()).to_string()
}

fn format_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.6}")
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::data::model::Value;

    #[rstest]
    #[case(0.51, SkewShape::RightSkewed)]
    #[case(0.5, SkewShape::Symmetric)]
    #[case(-0.5, SkewShape::Symmetric)]
    #[case(-2.0, SkewShape::LeftSkewed)]
    #[case(f64::NAN, SkewShape::Symmetric)]
    fn classifies_skewness(#[case] skewness: f64, #[case] expected: SkewShape) {
        assert_eq!(SkewShape::classify(skewness), expected);
    }

    #[rstest]
    #[case(1.2, TailShape::Leptokurtic)]
    #[case(1.0, TailShape::Mesokurtic)]
    #[case(-1.0, TailShape::Mesokurtic)]
    #[case(-1.3, TailShape::Platykurtic)]
    #[case(f64::NAN, TailShape::Mesokurtic)]
    fn classifies_kurtosis(#[case] kurtosis: f64, #[case] expected: TailShape) {
        assert_eq!(TailShape::classify(kurtosis), expected);
    }

    #[test]
    fn moments_text_matches_expected_wording() {
        let m = Moments {
            mean: 252.456,
            std_dev: 60.0,
            skewness: 0.734,
            excess_kurtosis: -1.25,
        };
        let mut out = Vec::new();
        write_moments(&mut out, "Per Capita Water Use (L/Day)", &m).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "\nFor the attribute Per Capita Water Use (L/Day):\n\
             Mean = 252.46, Standard Deviation = 60.00, Skewness = 0.73, and Excess Kurtosis = -1.25.\n\
             The data is right-skewed and platykurtic (light-tailed).\n"
        );
    }

    #[test]
    fn exploration_prints_all_three_sections() {
        let table = Table::from_records(
            vec!["Year".into(), "Level".into(), "Use".into(), "Rain".into()],
            vec![
                vec![Value::Integer(2020), Value::String("Low".into()), Value::Float(1.0), Value::Float(3.0)],
                vec![Value::Integer(2021), Value::String("High".into()), Value::Float(2.0), Value::Float(5.0)],
            ],
        )
        .set_index(&["Year".to_string()])
        .unwrap();

        let mut out = Vec::new();
        write_exploration(&mut out, &table, 5).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Dataset Head:"));
        assert!(text.contains("Dataset Description:"));
        assert!(text.contains("Correlation Matrix:"));
        assert!(text.contains("2021"));
        assert!(text.contains("High"));
        assert!(text.contains("1.000000"));
    }
}
