//! The result table and its normalization operations.

use crate::registry::Record;
use ohno::app_err;

/// Marker written into cells whose field was absent (or present but empty;
/// the registry does not distinguish the two).
pub const MISSING: &str = "NA";

/// Delimiter joining multi-occurrence values within one cell. Multi-character
/// on purpose, so it cannot collide with naturally occurring separators in
/// repository names, URLs, or controlled-vocabulary terms.
pub const VALUE_DELIMITER: &str = "_AND_";

/// A flat table of string cells with a fixed column set.
///
/// Built once from extraction records, then normalized in place: missing
/// markers, derived presence columns, and row explosion. All operations are
/// idempotent, so re-normalizing an already-normalized table is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Assemble a table from extraction records.
    ///
    /// This is the serialization boundary where typed value lists become
    /// delimited strings: multi-value cells are joined with
    /// [`VALUE_DELIMITER`], empty cells become empty strings.
    #[must_use]
    pub fn from_records(columns: Vec<String>, records: &[Record]) -> Self {
        let rows = records
            .iter()
            .map(|record| record.cells().iter().map(|cell| cell.join(VALUE_DELIMITER)).collect())
            .collect();

        Self { columns, rows }
    }

    /// Create a table directly from string rows. Intended for tests.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> crate::Result<Self> {
        for row in &rows {
            if row.len() != columns.len() {
                return Err(app_err!("row has {} cells, expected {}", row.len(), columns.len()));
            }
        }
        Ok(Self { columns, rows })
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, column: &str) -> crate::Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| app_err!("table has no column `{column}`"))
    }

    /// Replace every empty-string cell with the explicit [`MISSING`] marker.
    pub fn normalize_missing(&mut self) {
        for row in &mut self.rows {
            for cell in row {
                if cell.is_empty() {
                    MISSING.clone_into(cell);
                }
            }
        }
    }

    /// Append a boolean column derived from the missing/present status of an
    /// existing column: `true` iff the source cell is neither empty nor the
    /// missing marker.
    ///
    /// Must be applied before exploding the source column, so the result is a
    /// function of the pre-explosion value rather than of row counts.
    pub fn derive_presence(&mut self, source_column: &str, derived_column: &str) -> crate::Result<()> {
        let source = self.column_index(source_column)?;

        self.columns.push(derived_column.to_string());
        for row in &mut self.rows {
            let present = !row[source].is_empty() && row[source] != MISSING;
            row.push(present.to_string());
        }
        Ok(())
    }

    /// Explode a delimited column into one row per value, duplicating every
    /// other cell across the resulting rows.
    ///
    /// Row order preserves the original per-identifier grouping, and within a
    /// group the original split order. Cells without the delimiter (including
    /// missing markers) pass through as a single row, so the operation is
    /// idempotent and never drops or invents identifiers.
    pub fn explode(&mut self, column: &str) -> crate::Result<()> {
        let target = self.column_index(column)?;

        let mut exploded = Vec::with_capacity(self.rows.len());
        for row in self.rows.drain(..) {
            if row[target].contains(VALUE_DELIMITER) {
                for value in row[target].split(VALUE_DELIMITER).map(str::to_string).collect::<Vec<_>>() {
                    let mut copy = row.clone();
                    copy[target] = value;
                    exploded.push(copy);
                }
            } else {
                exploded.push(row);
            }
        }

        self.rows = exploded;
        Ok(())
    }

    /// Frequency counts of a column's values, most frequent first; ties are
    /// broken by first appearance in the table.
    pub fn value_counts(&self, column: &str) -> crate::Result<Vec<(String, usize)>> {
        let target = self.column_index(column)?;

        let mut counts: Vec<(String, usize)> = Vec::new();
        for row in &self.rows {
            let value = &row[target];
            match counts.iter_mut().find(|(v, _)| v == value) {
                Some((_, count)) => *count += 1,
                None => counts.push((value.clone(), 1)),
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(counts)
    }
}
