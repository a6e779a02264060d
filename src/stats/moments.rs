use statrs::statistics::Statistics;

use crate::data::model::Table;
use crate::error::StatsError;

/// The four descriptive moments reported for a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: f64,
    /// Third standardized moment, biased estimator.
    pub skewness: f64,
    /// Fourth standardized moment minus 3, biased estimator.
    pub excess_kurtosis: f64,
}

/// Compute mean, sample standard deviation, skewness and excess kurtosis.
///
/// Skewness and kurtosis use the population central moments
/// `m_k = Σ(x - mean)^k / n`, i.e. `m3 / m2^1.5` and `m4 / m2^2 - 3`.
/// When the variance is zero at floating point precision both are NaN.
pub fn moments(values: &[f64]) -> Result<Moments, StatsError> {
    if values.is_empty() {
        return Err(StatsError::Empty);
    }

    let mean = values.iter().mean();
    let std_dev = values.iter().std_dev();

    let n = values.len() as f64;
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for &x in values {
        let d = x - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    m2 /= n;
    m3 /= n;
    m4 /= n;

    let degenerate = m2 <= (f64::EPSILON * mean).powi(2);
    let (skewness, excess_kurtosis) = if degenerate {
        (f64::NAN, f64::NAN)
    } else {
        (m3 / m2.powf(1.5), m4 / (m2 * m2) - 3.0)
    };

    Ok(Moments {
        mean,
        std_dev,
        skewness,
        excess_kurtosis,
    })
}

/// Moments of a numeric column, ignoring missing values.
pub fn column_moments(table: &Table, column: &str) -> Result<Moments, StatsError> {
    let values = table.numeric_values(column)?;
    log::debug!("Computing moments of '{column}' over {} values", values.len());
    moments(&values)
}

#[cfg(test)]
mod tests {
    use rand::distributions::Distribution;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use statrs::distribution::{Exp, Normal};

    use super::*;
    use crate::data::model::Value;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn matches_hand_computed_values() {
        // mean 3, m2 = 2, m3 = 0, m4 = 6.8
        let m = moments(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(close(m.mean, 3.0, 1e-12));
        assert!(close(m.std_dev, 2.5f64.sqrt(), 1e-12));
        assert!(close(m.skewness, 0.0, 1e-12));
        assert!(close(m.excess_kurtosis, 6.8 / 4.0 - 3.0, 1e-12));
    }

    #[test]
    fn right_tail_gives_positive_skew() {
        let m = moments(&[1.0, 1.0, 1.0, 2.0, 10.0]).unwrap();
        assert!(m.skewness > 1.0);
    }

    #[test]
    fn is_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        let exp = Exp::new(0.5).unwrap();
        let data: Vec<f64> = (0..1000).map(|_| exp.sample(&mut rng)).collect();
        let first = moments(&data).unwrap();
        let second = moments(&data).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn normal_sample_has_near_zero_shape_moments() {
        let mut rng = StdRng::seed_from_u64(42);
        let normal = Normal::new(250.0, 60.0).unwrap();
        let data: Vec<f64> = (0..20_000).map(|_| normal.sample(&mut rng)).collect();
        let m = moments(&data).unwrap();
        assert!(close(m.mean, 250.0, 2.0));
        assert!(close(m.std_dev, 60.0, 2.0));
        assert!(m.skewness.abs() < 0.1, "skewness {}", m.skewness);
        assert!(m.excess_kurtosis.abs() < 0.2, "kurtosis {}", m.excess_kurtosis);
    }

    #[test]
    fn constant_sample_has_undefined_shape() {
        let m = moments(&[4.0, 4.0, 4.0]).unwrap();
        assert_eq!(m.std_dev, 0.0);
        assert!(m.skewness.is_nan());
        assert!(m.excess_kurtosis.is_nan());
    }

    #[test]
    fn empty_sample_is_an_error() {
        assert!(matches!(moments(&[]), Err(StatsError::Empty)));
    }

    #[test]
    fn column_moments_skip_nulls() {
        let table = Table::from_records(
            vec!["x".into()],
            vec![
                vec![Value::Integer(1)],
                vec![Value::Null],
                vec![Value::Float(3.0)],
            ],
        );
        let m = column_moments(&table, "x").unwrap();
        assert!(close(m.mean, 2.0, 1e-12));
        assert!(matches!(
            column_moments(&table, "y"),
            Err(StatsError::Data(_))
        ));
    }
}
