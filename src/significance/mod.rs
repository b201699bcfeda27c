//! Statistical association between samples and features
//!
//! Applies Fisher's exact test to every cell of a co-occurrence matrix:
//! - `axis`: axis validation and canonical (sample × feature) orientation
//! - `contingency`: 2×2 contingency cells and expected frequencies
//! - `fisher`: the exact test for a single table
//!
//! Includes both sequential and parallel (Rayon) appliers; they produce identical grids.

pub mod axis;
pub mod contingency;
pub mod fisher;

pub use axis::Orientation;
pub use contingency::{
    contingency_table, contingency_table_canonical, ContingencyCells, ContingencyTable,
};
pub use fisher::{fisher_exact, FisherResult};

use crate::error::Result;
use crate::matrix::LabeledMatrix;
use rayon::prelude::*;

/// Score and odds-ratio grids, labeled like the caller's input
#[derive(Debug, Clone, PartialEq)]
pub struct FisherScores {
    /// Raw p-values, or signed log10 scores when log-transformed
    pub scores: LabeledMatrix,
    pub odds_ratios: LabeledMatrix,
}

/// Signed association strength from a p-value
///
/// Repulsion (`observed < expected`) gives `log10(p)` ≤ 0; attraction gives
/// `-log10(p)` ≥ 0. A p-value of zero maps to ∓∞.
pub fn log_score(p_value: f64, observed: f64, expected: f64) -> f64 {
    if observed < expected {
        p_value.log10()
    } else {
        -p_value.log10()
    }
}

/// Apply Fisher's exact test to every sample-feature pair
///
/// Algorithm:
/// 1. Validate axes and move samples onto rows
/// 2. Build contingency cells (a, b, c, d, expected) for every pair
/// 3. Test each `[[a, b], [c, d]]`, keeping the odds ratio and either the p-value
///    or its signed log transform
/// 4. Transpose both grids back if the caller had samples on columns
///
/// # Errors
/// `Error::InvalidAxis` unless the axes are `(0, 1)` or `(1, 0)`.
pub fn apply_fishers(
    matrix: &LabeledMatrix,
    sample_axis: usize,
    feature_axis: usize,
    logtransform: bool,
) -> Result<FisherScores> {
    let orientation = Orientation::resolve(sample_axis, feature_axis)?;
    let canonical = orientation.to_canonical(matrix);
    let table = contingency_table_canonical(&canonical);
    let (rows, cols) = canonical.shape();

    tracing::debug!(
        "Fisher's test over {} samples x {} features ({:?}, logtransform={})",
        rows,
        cols,
        orientation,
        logtransform
    );

    let mut scores = Vec::with_capacity(rows * cols);
    let mut odds_ratios = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let (score, odds_ratio) = score_cell(table.cells_at(r, c), logtransform)?;
            scores.push(score);
            odds_ratios.push(odds_ratio);
        }
    }

    Ok(assemble(&canonical, orientation, scores, odds_ratios))
}

/// Parallel version of [`apply_fishers`] (one Rayon task per sample row)
pub fn apply_fishers_parallel(
    matrix: &LabeledMatrix,
    sample_axis: usize,
    feature_axis: usize,
    logtransform: bool,
) -> Result<FisherScores> {
    let orientation = Orientation::resolve(sample_axis, feature_axis)?;
    let canonical = orientation.to_canonical(matrix);
    let table = contingency_table_canonical(&canonical);
    let (rows, cols) = canonical.shape();

    tracing::debug!(
        "Parallel Fisher's test over {} samples x {} features ({:?}, logtransform={})",
        rows,
        cols,
        orientation,
        logtransform
    );

    let row_results: Vec<Vec<(f64, f64)>> = (0..rows)
        .into_par_iter()
        .map(|r| -> Result<Vec<(f64, f64)>> {
            (0..cols)
                .map(|c| score_cell(table.cells_at(r, c), logtransform))
                .collect()
        })
        .collect::<Result<_>>()?;

    let (scores, odds_ratios): (Vec<f64>, Vec<f64>) = row_results.into_iter().flatten().unzip();

    Ok(assemble(&canonical, orientation, scores, odds_ratios))
}

fn score_cell(cells: ContingencyCells, logtransform: bool) -> Result<(f64, f64)> {
    let FisherResult { odds_ratio, p_value } = fisher_exact(cells.a, cells.b, cells.c, cells.d)?;

    let score = if logtransform {
        log_score(p_value, cells.a, cells.expected)
    } else {
        p_value
    };

    Ok((score, odds_ratio))
}

fn assemble(
    canonical: &LabeledMatrix,
    orientation: Orientation,
    scores: Vec<f64>,
    odds_ratios: Vec<f64>,
) -> FisherScores {
    FisherScores {
        scores: orientation.restore(canonical.with_values(scores)),
        odds_ratios: orientation.restore(canonical.with_values(odds_ratios)),
    }
}
