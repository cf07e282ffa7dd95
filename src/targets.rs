//! Ground-truth targets handed to losses and registry metrics

use ndarray::{ArrayView1, ArrayView2};

use crate::error::{LearnerError, Result};

/// Borrowed ground truth for one task head, aligned row-for-row with the logits.
///
/// Registry entries are looked up by name, so they share one signature and
/// receive whichever kind of target the task produces.
#[derive(Clone, Copy, Debug)]
pub enum Targets<'a> {
    /// One class id per sample (multi-class heads).
    Classes(ArrayView1<'a, usize>),
    /// One row of per-class values per sample: multi-hot indicators for
    /// multi-label heads, or class probabilities for soft cross-entropy.
    Dense(ArrayView2<'a, f32>),
}

impl<'a> Targets<'a> {
    /// Number of samples.
    pub fn len(&self) -> usize {
        match self {
            Self::Classes(c) => c.len(),
            Self::Dense(d) => d.nrows(),
        }
    }

    /// True when there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Classes(_) => CLASS_ID,
            Self::Dense(_) => DENSE,
        }
    }

    /// Class ids, or a `TargetKind` error.
    pub fn classes(self) -> Result<ArrayView1<'a, usize>> {
        match self {
            Self::Classes(c) => Ok(c),
            other => Err(LearnerError::TargetKind { expected: CLASS_ID, found: other.kind() }),
        }
    }

    /// Dense per-class rows, or a `TargetKind` error.
    pub fn dense(self) -> Result<ArrayView2<'a, f32>> {
        match self {
            Self::Dense(d) => Ok(d),
            other => Err(LearnerError::TargetKind { expected: DENSE, found: other.kind() }),
        }
    }
}

const CLASS_ID: &str = "class-id";
const DENSE: &str = "dense";

impl<'a> From<ArrayView1<'a, usize>> for Targets<'a> {
    fn from(classes: ArrayView1<'a, usize>) -> Self {
        Self::Classes(classes)
    }
}

impl<'a> From<ArrayView2<'a, f32>> for Targets<'a> {
    fn from(dense: ArrayView2<'a, f32>) -> Self {
        Self::Dense(dense)
    }
}

impl<'a> From<&'a [usize]> for Targets<'a> {
    fn from(classes: &'a [usize]) -> Self {
        Self::Classes(ArrayView1::from(classes))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use ndarray::array;

    #[test]
    fn test_len_counts_samples() {
        let classes = array![0usize, 2, 1];
        let dense = array![[1.0f32, 0.0], [0.0, 1.0]];
        assert_eq!(Targets::from(classes.view()).len(), 3);
        assert_eq!(Targets::from(dense.view()).len(), 2);
        let none: [usize; 0] = [];
        assert!(Targets::from(&none[..]).is_empty());
    }

    #[test]
    fn test_wrong_kind_is_reported() {
        let dense = array![[1.0f32, 0.0]];
        let err = Targets::Dense(dense.view()).classes().unwrap_err();
        assert!(matches!(
            err,
            LearnerError::TargetKind { expected: "class-id", found: "dense" }
        ));

        let ids = [1usize];
        let err = Targets::from(&ids[..]).dense().unwrap_err();
        assert!(matches!(
            err,
            LearnerError::TargetKind { expected: "dense", found: "class-id" }
        ));
    }
}
