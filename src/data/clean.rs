use std::collections::HashSet;

use super::model::Table;
use crate::error::DataError;

/// Row counts observed while cleaning a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanSummary {
    pub rows_in: usize,
    pub duplicates_removed: usize,
    pub null_rows_removed: usize,
    pub rows_out: usize,
}

/// Prepare a freshly loaded table for analysis.
///
/// Steps, in order:
/// * Index by the requested columns that exist. Missing ones are skipped;
///   if none exist the index stays positional.
/// * Drop rows whose data values duplicate an earlier row. Index keys do not
///   take part in the comparison, so the same record under two years counts
///   as a duplicate.
/// * Drop rows with any missing data value.
///
/// The result never contains a null data value or two identical rows.
pub fn preprocess(table: Table, index: &[String]) -> Result<(Table, CleanSummary), DataError> {
    let rows_in = table.len();

    let present: Vec<String> = index
        .iter()
        .filter(|name| {
            let found = table.columns.contains(name);
            if !found {
                log::warn!("Index column '{name}' not found, skipping it");
            }
            found
        })
        .cloned()
        .collect();

    let table = if present.is_empty() {
        table
    } else {
        table.set_index(&present)?
    };

    let (table, duplicates_removed) = drop_duplicates(table);
    let (table, null_rows_removed) = drop_nulls(table);

    let summary = CleanSummary {
        rows_in,
        duplicates_removed,
        null_rows_removed,
        rows_out: table.len(),
    };
    log::debug!("Cleaning summary: {summary:?}");
    Ok((table, summary))
}

/// Keep the first occurrence of every distinct set of data values.
pub fn drop_duplicates(mut table: Table) -> (Table, usize) {
    let before = table.len();
    let mut seen = HashSet::with_capacity(before);
    table.rows.retain(|row| seen.insert(row.values.clone()));
    let removed = before - table.len();
    (table, removed)
}

/// Remove every row holding at least one missing data value.
pub fn drop_nulls(mut table: Table) -> (Table, usize) {
    let before = table.len();
    table
        .rows
        .retain(|row| row.values.iter().all(|v| !v.is_null()));
    let removed = before - table.len();
    (table, removed)
}
