//! Labeled Count Matrix
//!
//! Fixed-shape row-major grid of `f64` cells addressed by (row label, column label).
//! Every result produced by the scorer shares the labeling of its input, so lookups
//! go through label → index maps instead of nested dictionaries.
//!
//! Count matrices enter and leave the crate as Polars DataFrames (one string column
//! with row labels, one numeric column per feature) or as CSV files read through Polars.

use crate::error::{Error, Result};
use anyhow::{anyhow, Context};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::path::Path;

/// Two-dimensional table of counts indexed by labeled rows and columns
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    row_index: FxHashMap<String, usize>,
    col_index: FxHashMap<String, usize>,
    values: Vec<f64>,
}

/// Co-occurrence counts (samples × features, in whatever orientation the caller uses)
pub type CountMatrix = LabeledMatrix;

impl LabeledMatrix {
    /// Build a matrix from labels and row-major cell values
    ///
    /// Fails when either axis is empty, when the number of cells does not match
    /// the labels, or when a label repeats along its axis. Cell values are taken
    /// as-is (negative counts are not rejected).
    pub fn new(row_labels: Vec<String>, col_labels: Vec<String>, values: Vec<f64>) -> Result<Self> {
        let (rows, cols) = (row_labels.len(), col_labels.len());
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyMatrix { rows, cols });
        }
        if values.len() != rows * cols {
            return Err(Error::ShapeMismatch {
                expected: rows * cols,
                actual: values.len(),
            });
        }

        let row_index = index_labels(&row_labels, "row")?;
        let col_index = index_labels(&col_labels, "column")?;

        Ok(Self {
            row_labels,
            col_labels,
            row_index,
            col_index,
            values,
        })
    }

    /// Build a matrix from nested rows, mostly useful for small literal tables
    pub fn from_rows(row_labels: &[&str], col_labels: &[&str], rows: &[&[f64]]) -> Result<Self> {
        let mut values = Vec::with_capacity(row_labels.len() * col_labels.len());
        for row in rows {
            if row.len() != col_labels.len() {
                return Err(Error::ShapeMismatch {
                    expected: col_labels.len(),
                    actual: row.len(),
                });
            }
            values.extend_from_slice(row);
        }

        Self::new(
            row_labels.iter().map(|s| s.to_string()).collect(),
            col_labels.iter().map(|s| s.to_string()).collect(),
            values,
        )
    }

    /// Same labeling, new cells. `values` must already have the right length.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.values.len());
        Self {
            row_labels: self.row_labels.clone(),
            col_labels: self.col_labels.clone(),
            row_index: self.row_index.clone(),
            col_index: self.col_index.clone(),
            values,
        }
    }

    pub fn nrows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn ncols(&self) -> usize {
        self.col_labels.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    pub fn row_position(&self, label: &str) -> Option<usize> {
        self.row_index.get(label).copied()
    }

    pub fn col_position(&self, label: &str) -> Option<usize> {
        self.col_index.get(label).copied()
    }

    /// Row-major cell values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Cell at positional (row, column). Panics when out of bounds, like slice indexing.
    pub fn at(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.nrows() && col < self.ncols(), "cell ({}, {}) out of bounds", row, col);
        self.values[row * self.ncols() + col]
    }

    /// Cell addressed by labels
    pub fn get(&self, row_label: &str, col_label: &str) -> Option<f64> {
        let row = self.row_position(row_label)?;
        let col = self.col_position(col_label)?;
        Some(self.values[row * self.ncols() + col])
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let cols = self.ncols();
        &self.values[row * cols..(row + 1) * cols]
    }

    /// Swap rows and columns (labels follow their cells)
    pub fn transpose(&self) -> Self {
        let (rows, cols) = self.shape();
        let mut values = vec![0.0; rows * cols];
        for r in 0..rows {
            for c in 0..cols {
                values[c * rows + r] = self.values[r * cols + c];
            }
        }

        Self {
            row_labels: self.col_labels.clone(),
            col_labels: self.row_labels.clone(),
            row_index: self.col_index.clone(),
            col_index: self.row_index.clone(),
            values,
        }
    }

    /// Sum of each row, in row order
    pub fn row_sums(&self) -> Vec<f64> {
        self.values
            .chunks(self.ncols())
            .map(|row| row.iter().sum())
            .collect()
    }

    /// Sum of each column, in column order
    pub fn col_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.ncols()];
        for row in self.values.chunks(self.ncols()) {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }
        sums
    }

    /// Grand total over all cells
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Apply `f` to every cell, keeping the labeling
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        self.with_values(self.values.iter().map(|&v| f(v)).collect())
    }

    /// Combine two identically shaped matrices cell by cell, keeping `self`'s labeling
    pub fn zip_with<F>(&self, other: &Self, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        debug_assert_eq!(self.shape(), other.shape());
        self.with_values(
            self.values
                .iter()
                .zip(&other.values)
                .map(|(&x, &y)| f(x, y))
                .collect(),
        )
    }

    /// Convert a DataFrame into a labeled matrix
    ///
    /// `index_column` holds the row labels (cast to string); every other column is a
    /// feature whose name becomes the column label and whose values are cast to f64.
    ///
    /// # Errors
    /// Returns error if:
    /// - The index column is missing
    /// - A label or count is null
    /// - A feature column cannot be cast to Float64
    pub fn from_dataframe(df: &DataFrame, index_column: &str) -> anyhow::Result<Self> {
        let label_col = df
            .column(index_column)
            .with_context(|| format!("Missing index column '{}'", index_column))?
            .cast(&DataType::String)
            .with_context(|| format!("Index column '{}' cannot be read as labels", index_column))?;

        let row_labels = label_col
            .str()?
            .into_iter()
            .enumerate()
            .map(|(idx, opt)| {
                opt.map(str::to_string).ok_or_else(|| {
                    anyhow!(
                        "Null label in index column '{}' at row {}",
                        index_column,
                        idx
                    )
                })
            })
            .collect::<anyhow::Result<Vec<String>>>()?;

        let rows = row_labels.len();
        let feature_cols: Vec<&Column> = df
            .get_columns()
            .iter()
            .filter(|c| c.name().as_str() != index_column)
            .collect();
        let cols = feature_cols.len();

        let mut col_labels = Vec::with_capacity(cols);
        let mut values = vec![0.0; rows * cols];
        for (c, column) in feature_cols.into_iter().enumerate() {
            let name = column.name().to_string();
            let counts = column
                .cast(&DataType::Float64)
                .with_context(|| format!("Column '{}' is not numeric", name))?;

            for (r, opt) in counts.f64()?.into_iter().enumerate() {
                values[r * cols + c] = opt
                    .ok_or_else(|| anyhow!("Null count in column '{}' at row {}", name, r))?;
            }
            col_labels.push(name);
        }

        tracing::debug!("Loaded count matrix: {} rows x {} columns", rows, cols);

        Ok(Self::new(row_labels, col_labels, values)?)
    }

    /// Convert back into a DataFrame with labels in `index_column`
    pub fn to_dataframe(&self, index_column: &str) -> anyhow::Result<DataFrame> {
        let mut columns = Vec::with_capacity(self.ncols() + 1);
        columns.push(Column::new(index_column.into(), self.row_labels.clone()));

        for (c, label) in self.col_labels.iter().enumerate() {
            let cells: Vec<f64> = (0..self.nrows()).map(|r| self.at(r, c)).collect();
            columns.push(Column::new(label.as_str().into(), cells));
        }

        DataFrame::new(columns).with_context(|| {
            format!(
                "Failed to build DataFrame with index column '{}'",
                index_column
            )
        })
    }

    /// Load a count matrix from CSV (header row required)
    pub fn read_csv(path: &Path, index_column: &str) -> anyhow::Result<Self> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.into()))
            .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
            .finish()
            .with_context(|| format!("Failed to load count matrix CSV: {:?}", path))?;

        Self::from_dataframe(&df, index_column)
            .with_context(|| format!("Invalid count matrix in {:?}", path))
    }

    /// Write the matrix as CSV with labels in `index_column`
    pub fn write_csv(&self, path: &Path, index_column: &str) -> anyhow::Result<()> {
        let mut df = self.to_dataframe(index_column)?;
        let mut file = File::create(path)
            .with_context(|| format!("Failed to create output file: {:?}", path))?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .with_context(|| format!("Failed to write CSV: {:?}", path))
    }
}

fn index_labels(labels: &[String], axis: &'static str) -> Result<FxHashMap<String, usize>> {
    let mut index = FxHashMap::default();
    for (i, label) in labels.iter().enumerate() {
        if index.insert(label.clone(), i).is_some() {
            return Err(Error::DuplicateLabel {
                axis,
                label: label.clone(),
            });
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> LabeledMatrix {
        LabeledMatrix::from_rows(
            &["w1", "w2"],
            &["f1", "f2", "f3"],
            &[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_label_lookup() {
        let m = sample();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.get("w2", "f1"), Some(4.0));
        assert_eq!(m.get("w3", "f1"), None);
        assert_eq!(m.at(0, 2), 3.0);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_margins() {
        let m = sample();
        assert_eq!(m.row_sums(), vec![6.0, 15.0]);
        assert_eq!(m.col_sums(), vec![5.0, 7.0, 9.0]);
        assert_relative_eq!(m.total(), 21.0);
    }

    #[test]
    fn test_transpose_moves_labels_with_cells() {
        let m = sample();
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.row_labels(), &["f1", "f2", "f3"]);
        assert_eq!(t.get("f3", "w1"), Some(3.0));
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_rejects_empty_and_misshapen() {
        let empty = LabeledMatrix::new(vec![], vec!["f1".into()], vec![]);
        assert_eq!(empty, Err(Error::EmptyMatrix { rows: 0, cols: 1 }));

        let short = LabeledMatrix::new(
            vec!["w1".into()],
            vec!["f1".into(), "f2".into()],
            vec![1.0],
        );
        assert_eq!(short, Err(Error::ShapeMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_map_and_zip_keep_labeling() {
        let m = sample();
        let doubled = m.map(|v| v * 2.0);
        assert_eq!(doubled.row_labels(), m.row_labels());
        assert_eq!(doubled.get("w2", "f3"), Some(12.0));

        let diff = doubled.zip_with(&m, |x, y| x - y);
        assert_eq!(diff, m);
    }

    #[test]
    fn test_rejects_duplicate_labels() {
        let result = LabeledMatrix::from_rows(&["w1", "w1"], &["f1"], &[&[1.0], &[2.0]]);
        assert!(matches!(result, Err(Error::DuplicateLabel { axis: "row", .. })));
    }

    #[test]
    fn test_dataframe_roundtrip() {
        let df = df![
            "word" => &["qam", "mir"],
            "transitive" => &[3i64, 0],
            "intransitive" => &[1i64, 7],
        ]
        .unwrap();

        let m = LabeledMatrix::from_dataframe(&df, "word").unwrap();
        assert_eq!(m.col_labels(), &["transitive", "intransitive"]);
        assert_eq!(m.get("mir", "intransitive"), Some(7.0));

        let back = m.to_dataframe("word").unwrap();
        assert_eq!(back.width(), 3);
        assert_eq!(back.height(), 2);
    }

    #[test]
    fn test_dataframe_missing_index_column() {
        let df = df!["transitive" => &[1i64]].unwrap();
        let err = LabeledMatrix::from_dataframe(&df, "word").unwrap_err();
        assert!(err.to_string().contains("word"));
    }
}
