//! Corpus helpers used alongside the association scorer
//!
//! - Text: NENA word form normalization (accent and end-of-word stripping)
//! - Positions: element lookup at a relative offset within a context

pub mod positions;
pub mod text;

// Re-export commonly used types
pub use positions::Positions;
pub use text::{normalize_text, normalize_word, WordFeatures, WordTable};
