use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::DataError;

// ---------------------------------------------------------------------------
// Value – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring the common Pandas dtypes.
/// Used as a group/dedup key downstream, so `Value` must be `Ord` and `Hash`.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so floats get a total order and NaN == NaN --

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Null => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:.4}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => write!(f, "NaN"),
        }
    }
}

impl Value {
    /// Interpret the value as an `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Row – one record of the table
// ---------------------------------------------------------------------------

/// A single record: its index key plus the values of every data column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    /// Index key, one value per index level. Empty for a positional index.
    pub index: Vec<Value>,
    /// Data values, aligned with [`Table::columns`].
    pub values: Vec<Value>,
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// A labelled table of rows and named columns, optionally indexed by one or
/// more former columns (e.g. `Year`, or `Country` + `Year`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Ordered data column names (index levels excluded).
    pub columns: Vec<String>,
    /// Ordered index level names. Empty means a positional index.
    pub index_names: Vec<String>,
    /// All rows.
    pub rows: Vec<Row>,
}

impl Table {
    /// Build a positionally-indexed table from raw records.
    /// Short records are padded with `Null`, long ones truncated. A column
    /// holding both integers and floats is widened to floats throughout.
    pub fn from_records(columns: Vec<String>, records: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let mut rows: Vec<Row> = records
            .into_iter()
            .map(|mut values| {
                values.resize(width, Value::Null);
                Row {
                    index: Vec::new(),
                    values,
                }
            })
            .collect();
        for pos in 0..width {
            widen_mixed_numeric(&mut rows, pos);
        }
        Table {
            columns,
            index_names: Vec::new(),
            rows,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_position(&self, name: &str) -> Result<usize, DataError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    /// Values of a named field, looking through data columns first and then
    /// index levels.
    pub fn field(&self, name: &str) -> Result<Vec<&Value>, DataError> {
        if let Some(pos) = self.columns.iter().position(|c| c == name) {
            return Ok(self.rows.iter().map(|r| &r.values[pos]).collect());
        }
        if let Some(level) = self.index_names.iter().position(|c| c == name) {
            return Ok(self.rows.iter().map(|r| &r.index[level]).collect());
        }
        Err(DataError::MissingColumn(name.to_string()))
    }

    /// A column is numeric when it holds at least one number and every
    /// non-null value is an integer or a float.
    pub fn is_numeric(&self, name: &str) -> bool {
        let Ok(values) = self.field(name) else {
            return false;
        };
        let mut seen_number = false;
        for v in values {
            match v {
                Value::Integer(_) | Value::Float(_) => seen_number = true,
                Value::Null => {}
                _ => return false,
            }
        }
        seen_number
    }

    /// Names of the numeric data columns, in column order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| self.is_numeric(c))
            .map(String::as_str)
            .collect()
    }

    /// Non-null values of a numeric field as `f64`.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>, DataError> {
        self.field(name)?
            .into_iter()
            .filter(|v| !v.is_null())
            .map(|v| {
                v.as_f64()
                    .ok_or_else(|| DataError::NonNumeric(name.to_string()))
            })
            .collect()
    }

    /// Sorted set of distinct values in a field.
    pub fn unique_values(&self, name: &str) -> Result<BTreeSet<Value>, DataError> {
        Ok(self.field(name)?.into_iter().cloned().collect())
    }

    /// Number of null values per data column, in column order.
    pub fn null_counts(&self) -> Vec<usize> {
        (0..self.columns.len())
            .map(|pos| self.rows.iter().filter(|r| r.values[pos].is_null()).count())
            .collect()
    }

    /// Move the named data columns into the index, in the given order.
    /// Replaces any previous index. All names must be data columns.
    pub fn set_index(self, names: &[String]) -> Result<Table, DataError> {
        let positions = names
            .iter()
            .map(|n| self.column_position(n))
            .collect::<Result<Vec<_>, _>>()?;

        let columns = self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| !positions.contains(i))
            .map(|(_, c)| c.clone())
            .collect();

        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                let index = positions.iter().map(|&p| row.values[p].clone()).collect();
                let values = row
                    .values
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| !positions.contains(i))
                    .map(|(_, v)| v)
                    .collect();
                Row { index, values }
            })
            .collect();

        Ok(Table {
            columns,
            index_names: names.to_vec(),
            rows,
        })
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }
}

fn widen_mixed_numeric(rows: &mut [Row], pos: usize) {
    let has = |pred: fn(&Value) -> bool| rows.iter().any(|r| pred(&r.values[pos]));
    if !(has(|v| matches!(v, Value::Integer(_))) && has(|v| matches!(v, Value::Float(_)))) {
        return;
    }
    for row in rows.iter_mut() {
        if let Value::Integer(i) = row.values[pos] {
            row.values[pos] = Value::Float(i as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_records(
            vec!["Country".into(), "Year".into(), "Use".into()],
            vec![
                vec![Value::String("A".into()), Value::Integer(2020), Value::Float(1.5)],
                vec![Value::String("B".into()), Value::Integer(2021), Value::Null],
                vec![Value::String("A".into()), Value::Integer(2022)],
            ],
        )
    }

    #[test]
    fn short_records_are_padded_with_null() {
        let table = sample();
        assert_eq!(table.rows[2].values.len(), 3);
        assert!(table.rows[2].values[2].is_null());
        assert_eq!(table.null_counts(), vec![0, 0, 2]);
    }

    #[test]
    fn mixed_integer_and_float_columns_become_float() {
        let table = Table::from_records(
            vec!["Year".into(), "a".into()],
            vec![
                vec![Value::Integer(2020), Value::Integer(1)],
                vec![Value::Integer(2021), Value::Float(1.0)],
                vec![Value::Integer(2022), Value::Null],
            ],
        );
        assert_eq!(table.rows[0].values, vec![Value::Integer(2020), Value::Float(1.0)]);
        assert_eq!(table.rows[1].values[1], Value::Float(1.0));
        assert!(table.rows[2].values[1].is_null());
    }

    #[test]
    fn set_index_moves_columns_out_of_data() {
        let table = sample().set_index(&["Year".to_string()]).unwrap();
        assert_eq!(table.columns, vec!["Country", "Use"]);
        assert_eq!(table.index_names, vec!["Year"]);
        assert_eq!(table.rows[1].index, vec![Value::Integer(2021)]);
        // index levels are still reachable by name
        assert_eq!(table.field("Year").unwrap().len(), 3);
        assert!(table.column_position("Year").is_err());
    }

    #[test]
    fn set_index_rejects_unknown_columns() {
        let err = sample().set_index(&["Month".to_string()]).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(c) if c == "Month"));
    }

    #[test]
    fn numeric_detection_ignores_nulls() {
        let table = sample();
        assert!(table.is_numeric("Use"));
        assert!(table.is_numeric("Year"));
        assert!(!table.is_numeric("Country"));
        assert_eq!(table.numeric_columns(), vec!["Year", "Use"]);
        assert_eq!(table.numeric_values("Use").unwrap(), vec![1.5]);
        assert!(matches!(
            table.numeric_values("Country"),
            Err(DataError::NonNumeric(_))
        ));
    }

    #[test]
    fn nan_floats_compare_equal() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert!(Value::Null < Value::Integer(0));
        assert!(Value::Integer(5) < Value::String("a".into()));
    }

    #[test]
    fn unique_values_are_sorted() {
        let uniques = sample().unique_values("Country").unwrap();
        let names: Vec<String> = uniques.iter().map(|v| v.to_string()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
