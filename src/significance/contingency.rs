//! Contingency Table Builder
//!
//! Turns a sample × feature count matrix into the four cells of a 2×2 table for
//! every (sample, feature) pair, plus the expected frequency under independence:
//!
//! ```text
//!                 feature     other features
//! sample             a              b          row_sum(sample)
//! other samples      c              d
//!                 col_sum(feature)               total
//! ```

use super::axis::Orientation;
use crate::error::Result;
use crate::matrix::LabeledMatrix;

/// Five matrices sharing the labeling of the input
#[derive(Debug, Clone, PartialEq)]
pub struct ContingencyTable {
    /// Observed joint counts (the input itself)
    pub a: LabeledMatrix,
    /// `row_sum(sample) - a`
    pub b: LabeledMatrix,
    /// `col_sum(feature) - a`
    pub c: LabeledMatrix,
    /// `total - (a + b + c)`
    pub d: LabeledMatrix,
    /// `row_sum(sample) * col_sum(feature) / total`
    pub expected: LabeledMatrix,
}

/// Scalar cells for one (sample, feature) pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContingencyCells {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub expected: f64,
}

impl ContingencyTable {
    /// Cells for a pair of labels, in the orientation of this table
    pub fn cells(&self, row_label: &str, col_label: &str) -> Option<ContingencyCells> {
        let row = self.a.row_position(row_label)?;
        let col = self.a.col_position(col_label)?;
        Some(self.cells_at(row, col))
    }

    /// Cells at positional (row, column)
    pub fn cells_at(&self, row: usize, col: usize) -> ContingencyCells {
        ContingencyCells {
            a: self.a.at(row, col),
            b: self.b.at(row, col),
            c: self.c.at(row, col),
            d: self.d.at(row, col),
            expected: self.expected.at(row, col),
        }
    }

    fn transpose(&self) -> Self {
        Self {
            a: self.a.transpose(),
            b: self.b.transpose(),
            c: self.c.transpose(),
            d: self.d.transpose(),
            expected: self.expected.transpose(),
        }
    }
}

/// Build contingency tables for every sample-feature pair
///
/// `sample_axis` / `feature_axis` declare which axis of `matrix` holds samples
/// (0 = rows, 1 = columns). The result is labeled exactly like `matrix`.
///
/// # Errors
/// `Error::InvalidAxis` unless the axes are `(0, 1)` or `(1, 0)`.
///
/// A zero grand total is not an error: expected frequencies become NaN/∞.
pub fn contingency_table(
    matrix: &LabeledMatrix,
    sample_axis: usize,
    feature_axis: usize,
) -> Result<ContingencyTable> {
    let orientation = Orientation::resolve(sample_axis, feature_axis)?;
    let canonical = orientation.to_canonical(matrix);
    let table = contingency_table_canonical(&canonical);

    Ok(match orientation {
        Orientation::Canonical => table,
        Orientation::Transposed => table.transpose(),
    })
}

/// Build contingency tables for a matrix already laid out sample × feature
pub fn contingency_table_canonical(matrix: &LabeledMatrix) -> ContingencyTable {
    let (rows, cols) = matrix.shape();
    let row_sums = matrix.row_sums();
    let col_sums = matrix.col_sums();
    let total = matrix.total();

    tracing::debug!(
        "Contingency tables for {} samples x {} features (total = {})",
        rows,
        cols,
        total
    );
    if total == 0.0 {
        tracing::warn!("Count matrix sums to zero; expected frequencies are not finite");
    }

    // Margins broadcast to the full grid so they line up cell by cell with `a`
    let row_margins = matrix.with_values(
        row_sums
            .iter()
            .flat_map(|&sum| std::iter::repeat(sum).take(cols))
            .collect(),
    );
    let col_margins = matrix.with_values(col_sums.repeat(rows));

    let b = row_margins.zip_with(matrix, |margin, a| margin - a);
    let c = col_margins.zip_with(matrix, |margin, a| margin - a);
    let d = matrix
        .zip_with(&b, |a, b| a + b)
        .zip_with(&c, |ab, c| ab + c)
        .map(|abc| total - abc);
    let expected = row_margins
        .zip_with(&col_margins, |row, col| row * col)
        .map(|product| product / total);

    ContingencyTable {
        a: matrix.clone(),
        b,
        c,
        d,
        expected,
    }
}
