use std::collections::BTreeMap;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Facet grouping: which rows belong to which category
// ---------------------------------------------------------------------------

/// Facet grids wrap after this many columns.
pub const FACET_WRAP: usize = 3;

/// One facet of a grid: the category label and the indices of the rows
/// belonging to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetGroup {
    pub label: String,
    pub indices: Vec<usize>,
}

/// Partition the dataset's rows into facet groups.
///
/// With a single categorical, one group per unique value of that column in
/// sorted order. With several, rows are grouped by the underscore-joined
/// composite of their values, again in sorted label order. A row missing a
/// categorical cell falls under the null label.
pub fn facet_groups(dataset: &Dataset, categoricals: &[String]) -> Vec<FacetGroup> {
    if categoricals.len() == 1 {
        let col = &categoricals[0];
        let Some(values) = dataset.unique_values.get(col) else {
            return Vec::new();
        };
        values
            .iter()
            .map(|value| {
                let indices = dataset
                    .rows
                    .iter()
                    .enumerate()
                    .filter(|(_, row)| row.get(col).unwrap_or(&CellValue::Null) == value)
                    .map(|(i, _)| i)
                    .collect();
                FacetGroup {
                    label: value.to_string(),
                    indices,
                }
            })
            .collect()
    } else {
        let labels = dataset.composite_labels(categoricals);
        let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, label) in labels.into_iter().enumerate() {
            groups.entry(label).or_default().push(i);
        }
        groups
            .into_iter()
            .map(|(label, indices)| FacetGroup { label, indices })
            .collect()
    }
}

/// Grid shape for `n` facets wrapped at [`FACET_WRAP`] columns:
/// `(rows, cols)`.
pub fn grid_shape(n: usize) -> (usize, usize) {
    let cols = n.clamp(1, FACET_WRAP);
    let rows = n.max(1).div_ceil(cols);
    (rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Row;

    fn row(cells: &[(&str, CellValue)]) -> Row {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn sample() -> Dataset {
        let s = |v: &str| CellValue::String(v.into());
        Dataset::from_rows(vec![
            row(&[("x", CellValue::Float(1.0)), ("sex", s("F")), ("region", s("north"))]),
            row(&[("x", CellValue::Float(2.0)), ("sex", s("M")), ("region", s("north"))]),
            row(&[("x", CellValue::Float(3.0)), ("sex", s("F")), ("region", s("south"))]),
            row(&[("x", CellValue::Float(4.0)), ("sex", s("F")), ("region", s("north"))]),
        ])
    }

    #[test]
    fn single_categorical_groups_by_unique_value() {
        let ds = sample();
        let groups = facet_groups(&ds, &["sex".to_string()]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "F");
        assert_eq!(groups[0].indices, vec![0, 2, 3]);
        assert_eq!(groups[1].label, "M");
        assert_eq!(groups[1].indices, vec![1]);
    }

    #[test]
    fn multiple_categoricals_group_by_joined_label() {
        let ds = sample();
        let groups = facet_groups(&ds, &["sex".to_string(), "region".to_string()]);
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["F_north", "F_south", "M_north"]);
        assert_eq!(groups[0].indices, vec![0, 3]);
    }

    #[test]
    fn grid_wraps_at_three_columns() {
        assert_eq!(grid_shape(1), (1, 1));
        assert_eq!(grid_shape(2), (1, 2));
        assert_eq!(grid_shape(3), (1, 3));
        assert_eq!(grid_shape(4), (2, 3));
        assert_eq!(grid_shape(7), (3, 3));
    }
}
