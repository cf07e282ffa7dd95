//! Accuracy on discrete labels
//!
//! Follows sklearn's `accuracy_score`: class-id vectors compare element-wise,
//! indicator matrices use subset accuracy (a row counts only if every column
//! matches). Zero samples yield NaN, the mean of an empty set. An indicator
//! matrix without columns is rejected.

use ndarray::{ArrayView1, ArrayView2};
use tracing::warn;

use crate::error::{LearnerError, Result};

/// Fraction of samples whose predicted class id equals the true one
pub fn accuracy_score_1d(y_true: ArrayView1<'_, usize>, y_pred: ArrayView1<'_, usize>) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(LearnerError::shape(&[y_true.len()], &[y_pred.len()]));
    }
    if y_true.is_empty() {
        warn!("accuracy requested for an empty batch, returning NaN");
        return Ok(f64::NAN);
    }

    let correct = y_true.iter().zip(y_pred.iter()).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Subset accuracy of a binary indicator matrix
///
/// `y_true` must contain only 0.0 and 1.0. Prediction entries outside that
/// set are not rejected; they simply never match.
pub fn accuracy_score(y_true: ArrayView2<'_, f32>, y_pred: ArrayView2<'_, f32>) -> Result<f64> {
    if y_true.dim() != y_pred.dim() {
        return Err(LearnerError::shape(y_true.shape(), y_pred.shape()));
    }
    if y_true.ncols() == 0 {
        return Err(LearnerError::NoClasses { samples: y_true.nrows() });
    }
    if let Some(((row, col), &value)) = y_true.indexed_iter().find(|(_, v)| **v != 0.0 && **v != 1.0) {
        return Err(LearnerError::NonBinaryLabels { row, col, value });
    }
    if y_true.nrows() == 0 {
        warn!("accuracy requested for an empty batch, returning NaN");
        return Ok(f64::NAN);
    }

    let exact = y_true.rows().into_iter().zip(y_pred.rows()).filter(|(t, p)| t == p).count();
    Ok(exact as f64 / y_true.nrows() as f64)
}
