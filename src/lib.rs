//! Collexeme Scorer
//!
//! Association measures between words and the constructions they occur in,
//! for corpus studies of NENA verbs.
//!
//! - `matrix`: Labeled count matrices (Polars DataFrame / CSV in and out)
//! - `significance/`: Contingency tables and Fisher's exact test per sample-feature pair
//! - `utils/`: Word form normalization and positional context lookup
//! - `config`: Scoring options from JSON or environment variables

pub mod config;
pub mod error;
pub mod matrix;
pub mod significance;
pub mod utils;

// Re-export commonly used types
pub use config::ScoringConfig;
pub use error::{Error, Result};
pub use matrix::{CountMatrix, LabeledMatrix};
pub use significance::{
    apply_fishers, apply_fishers_parallel, contingency_table, fisher_exact, log_score,
    ContingencyCells, ContingencyTable, FisherResult, FisherScores, Orientation,
};
pub use utils::{normalize_text, normalize_word, Positions, WordFeatures, WordTable};
