use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a dataset column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common dataframe dtypes.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                Date(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) | CellValue::Date(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.4}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for distribution plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whether the value counts towards a column being numerical.
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }
}

// ---------------------------------------------------------------------------
// Row – one record of the dataset
// ---------------------------------------------------------------------------

/// A single record (one row of the source table): column name → cell value.
pub type Row = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records (rows).
    pub rows: Vec<Row>,
    /// Ordered list of column names.
    pub column_names: Vec<String>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl Dataset {
    /// Build column indices from the loaded rows.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut column_names_set: BTreeSet<String> = BTreeSet::new();
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();

        for row in &rows {
            for (col, val) in row {
                column_names_set.insert(col.clone());
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        let column_names: Vec<String> = column_names_set.into_iter().collect();
        Dataset {
            rows,
            column_names,
            unique_values,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the dataset has a column with the given name.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }

    /// Columns eligible for distribution plotting: at least one non-null
    /// cell, and every non-null cell numeric.
    pub fn numerical_columns(&self) -> Vec<String> {
        self.column_names
            .iter()
            .filter(|col| {
                let mut seen_numeric = false;
                for row in &self.rows {
                    match row.get(col.as_str()) {
                        Some(CellValue::Null) | None => {}
                        Some(v) if v.is_numeric() => seen_numeric = true,
                        Some(_) => return false,
                    }
                }
                seen_numeric
            })
            .cloned()
            .collect()
    }

    /// All numeric values of a column, nulls skipped.
    pub fn numeric_values(&self, col: &str) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.get(col).and_then(CellValue::as_f64))
            .collect()
    }

    /// Numeric values of a column restricted to the given row indices.
    pub fn numeric_values_at(&self, col: &str, indices: &[usize]) -> Vec<f64> {
        indices
            .iter()
            .filter_map(|&i| self.rows[i].get(col).and_then(CellValue::as_f64))
            .collect()
    }

    /// Paired numeric values of two columns: rows where both cells are
    /// numeric, in row order.
    pub fn numeric_pairs(&self, c1: &str, c2: &str) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| {
                let a = row.get(c1).and_then(CellValue::as_f64)?;
                let b = row.get(c2).and_then(CellValue::as_f64)?;
                Some((a, b))
            })
            .collect()
    }

    /// Paired numeric values of two columns restricted to the given rows.
    pub fn numeric_pairs_at(&self, c1: &str, c2: &str, indices: &[usize]) -> Vec<(f64, f64)> {
        indices
            .iter()
            .filter_map(|&i| {
                let row = &self.rows[i];
                let a = row.get(c1).and_then(CellValue::as_f64)?;
                let b = row.get(c2).and_then(CellValue::as_f64)?;
                Some((a, b))
            })
            .collect()
    }

    /// Per-row composite category label: the named columns' cell values
    /// joined with underscores. This is a local view; the dataset itself
    /// is never re-indexed.
    pub fn composite_labels(&self, columns: &[String]) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| row.get(col).unwrap_or(&CellValue::Null).to_string())
                    .collect::<Vec<_>>()
                    .join("_")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, CellValue)]) -> Row {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn sample() -> Dataset {
        Dataset::from_rows(vec![
            row(&[
                ("height", CellValue::Float(1.7)),
                ("age", CellValue::Integer(34)),
                ("sex", CellValue::String("F".into())),
            ]),
            row(&[
                ("height", CellValue::Float(1.8)),
                ("age", CellValue::Integer(29)),
                ("sex", CellValue::String("M".into())),
            ]),
            row(&[
                ("height", CellValue::Null),
                ("age", CellValue::Integer(51)),
                ("sex", CellValue::String("F".into())),
            ]),
        ])
    }

    #[test]
    fn numerical_columns_exclude_categoricals() {
        let ds = sample();
        assert_eq!(ds.numerical_columns(), vec!["age", "height"]);
    }

    #[test]
    fn numeric_values_skip_nulls() {
        let ds = sample();
        assert_eq!(ds.numeric_values("height"), vec![1.7, 1.8]);
        assert_eq!(ds.numeric_values("age").len(), 3);
    }

    #[test]
    fn unique_values_indexed_per_column() {
        let ds = sample();
        assert_eq!(ds.unique_values["sex"].len(), 2);
        assert_eq!(ds.unique_values["age"].len(), 3);
    }

    #[test]
    fn composite_labels_join_with_underscore() {
        let ds = sample();
        let labels = ds.composite_labels(&["sex".to_string(), "age".to_string()]);
        assert_eq!(labels, vec!["F_34", "M_29", "F_51"]);
    }

    #[test]
    fn numeric_pairs_drop_rows_with_missing_values() {
        let ds = sample();
        let pairs = ds.numeric_pairs("height", "age");
        assert_eq!(pairs, vec![(1.7, 34.0), (1.8, 29.0)]);
    }

    #[test]
    fn cell_values_order_within_and_across_types() {
        let mut set = BTreeSet::new();
        set.insert(CellValue::Float(2.0));
        set.insert(CellValue::Float(1.0));
        set.insert(CellValue::Null);
        let ordered: Vec<_> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![CellValue::Null, CellValue::Float(1.0), CellValue::Float(2.0)]
        );
    }
}
