//! Feature matrix construction
//!
//! Turns a table of rows into a dense row-major matrix following a
//! [`FeatureSchema`], then standardises every column to zero mean and unit
//! variance over the whole table.

use crate::row::FeatureRow;
use crate::schema::{FeatureKind, FeatureSchema};
use crate::vector::FeatureVector;
use std::collections::BTreeSet;
use std::ops::Range;
use tracing::debug;

/// The columns produced by one schema field.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGroup {
    pub field: String,
    pub kind: FeatureKind,
    pub columns: Range<usize>,
}

/// Encoded table, one [`FeatureVector`] per input row, in input order.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    rows: Vec<FeatureVector>,
    column_names: Vec<String>,
    groups: Vec<ColumnGroup>,
}

impl FeatureMatrix {
    /// Encode `rows` following `schema`.
    ///
    /// A numeric field is usable when at least one row carries a number for
    /// it; rows without one take the column mean. A categorical field expands
    /// to one indicator column per distinct value (sorted), and a row without
    /// the field has all of them at zero. Returns `None` for an empty table or
    /// when no field is usable.
    pub fn build<R: FeatureRow>(rows: &[R], schema: &FeatureSchema) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }

        let mut columns: Vec<Vec<f64>> = Vec::new();
        let mut column_names = Vec::new();
        let mut groups = Vec::new();

        for field in &schema.fields {
            let start = columns.len();
            match field.kind {
                FeatureKind::Numeric => {
                    let cells: Vec<Option<f64>> = rows
                        .iter()
                        .map(|row| row.feature(&field.name).and_then(|v| v.as_number()))
                        .collect();
                    let present: Vec<f64> = cells.iter().flatten().copied().collect();
                    if present.is_empty() {
                        continue;
                    }
                    let fill = present.iter().sum::<f64>() / present.len() as f64;
                    columns.push(cells.into_iter().map(|c| c.unwrap_or(fill)).collect());
                    column_names.push(field.name.clone());
                }
                FeatureKind::Categorical => {
                    let cells: Vec<Option<&str>> = rows
                        .iter()
                        .map(|row| row.feature(&field.name).and_then(|v| v.as_category()))
                        .collect();
                    let categories: BTreeSet<&str> = cells.iter().flatten().copied().collect();
                    if categories.is_empty() {
                        continue;
                    }
                    for category in categories {
                        columns.push(
                            cells
                                .iter()
                                .map(|c| if *c == Some(category) { 1.0 } else { 0.0 })
                                .collect(),
                        );
                        column_names.push(format!("{}={}", field.name, category));
                    }
                }
            }
            groups.push(ColumnGroup {
                field: field.name.clone(),
                kind: field.kind,
                columns: start..columns.len(),
            });
        }

        if columns.is_empty() {
            debug!(rows = rows.len(), "no usable feature columns");
            return None;
        }

        let matrix_rows = (0..rows.len())
            .map(|i| FeatureVector::new(columns.iter().map(|col| col[i]).collect()))
            .collect();

        debug!(
            rows = rows.len(),
            columns = column_names.len(),
            fields = groups.len(),
            "feature matrix built"
        );

        Some(Self {
            rows: matrix_rows,
            column_names,
            groups,
        })
    }

    /// Standardise every column in place (population variance).
    ///
    /// Constant columns carry no information and become all zeros.
    pub fn standardize(&mut self) {
        let n = self.rows.len() as f64;
        for col in 0..self.column_names.len() {
            let mean = self.rows.iter().map(|r| r.as_slice()[col]).sum::<f64>() / n;
            let variance = self
                .rows
                .iter()
                .map(|r| (r.as_slice()[col] - mean).powi(2))
                .sum::<f64>()
                / n;
            let std_dev = variance.sqrt();

            for row in &mut self.rows {
                let cell = &mut row.as_mut_slice()[col];
                *cell = if std_dev > f64::EPSILON {
                    (*cell - mean) / std_dev
                } else {
                    0.0
                };
            }
        }
    }

    /// Build and standardise in one step.
    pub fn standardized<R: FeatureRow>(rows: &[R], schema: &FeatureSchema) -> Option<Self> {
        let mut matrix = Self::build(rows, schema)?;
        matrix.standardize();
        Some(matrix)
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn n_columns(&self) -> usize {
        self.column_names.len()
    }

    #[inline]
    pub fn row(&self, index: usize) -> &FeatureVector {
        &self.rows[index]
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn groups(&self) -> &[ColumnGroup] {
        &self.groups
    }

    /// Pairwise cosine similarity between every two rows.
    pub fn similarity_matrix(&self) -> Vec<Vec<f64>> {
        self.rows
            .iter()
            .map(|a| self.rows.iter().map(|b| a.cosine_similarity(b)).collect())
            .collect()
    }
}
