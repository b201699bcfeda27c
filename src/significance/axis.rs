//! Axis declarations and canonical orientation
//!
//! Callers say which physical axis (0 = rows, 1 = columns) holds samples and which
//! holds features. Internally everything is computed sample-by-feature; the
//! [`Orientation`] remembers whether a transpose is needed on the way in and out.

use crate::error::{Error, Result};
use crate::matrix::LabeledMatrix;
use std::borrow::Cow;

/// How the caller's matrix relates to the canonical sample × feature layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Samples are rows, features are columns (sample_axis = 0, feature_axis = 1)
    Canonical,
    /// Samples are columns, features are rows (sample_axis = 1, feature_axis = 0)
    Transposed,
}

impl Orientation {
    /// Validate an axis declaration
    ///
    /// Only `(0, 1)` and `(1, 0)` are legal; anything else is rejected before
    /// any computation happens.
    pub fn resolve(sample_axis: usize, feature_axis: usize) -> Result<Self> {
        match (sample_axis, feature_axis) {
            (0, 1) => Ok(Orientation::Canonical),
            (1, 0) => Ok(Orientation::Transposed),
            _ => Err(Error::InvalidAxis {
                sample_axis,
                feature_axis,
            }),
        }
    }

    /// View `matrix` with samples as rows (borrows when no transpose is needed)
    pub fn to_canonical<'a>(&self, matrix: &'a LabeledMatrix) -> Cow<'a, LabeledMatrix> {
        match self {
            Orientation::Canonical => Cow::Borrowed(matrix),
            Orientation::Transposed => Cow::Owned(matrix.transpose()),
        }
    }

    /// Put a canonical result back into the caller's orientation
    pub fn restore(&self, matrix: LabeledMatrix) -> LabeledMatrix {
        match self {
            Orientation::Canonical => matrix,
            Orientation::Transposed => matrix.transpose(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_legal_axes() {
        assert_eq!(Orientation::resolve(0, 1), Ok(Orientation::Canonical));
        assert_eq!(Orientation::resolve(1, 0), Ok(Orientation::Transposed));
    }

    #[test]
    fn test_resolve_rejects_everything_else() {
        for (s, f) in [(0, 0), (1, 1), (2, 1), (0, 2), (7, 3)] {
            assert_eq!(
                Orientation::resolve(s, f),
                Err(Error::InvalidAxis { sample_axis: s, feature_axis: f })
            );
        }
    }

    #[test]
    fn test_canonical_borrows() {
        let m = LabeledMatrix::from_rows(&["w1"], &["f1", "f2"], &[&[1.0, 2.0]]).unwrap();
        assert!(matches!(Orientation::Canonical.to_canonical(&m), Cow::Borrowed(_)));

        let flipped = Orientation::Transposed.to_canonical(&m).into_owned();
        assert_eq!(flipped.shape(), (2, 1));
        assert_eq!(Orientation::Transposed.restore(flipped), m);
    }
}
