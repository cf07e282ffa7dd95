//! Accuracy for multi-label task heads

use ndarray::ArrayView2;
use tracing::debug;

use super::{accuracy_score, Evaluation};
use crate::activation::{round_half_even, sigmoid};
use crate::error::Result;

/// Sigmoid the logits, round to 0/1, and score the indicator matrix against `y_true`.
///
/// Scoring is subset accuracy: a sample is correct only when every one of its
/// labels is predicted correctly. Rounding is half-to-even, so a logit of
/// exactly 0 (probability 0.5) predicts 0.
///
/// # Example
///
/// ```
/// use learner_utils::metrics::multi_label_accuracy;
/// use ndarray::array;
///
/// let y_true = array![[1.0, 0.0], [0.0, 1.0]];
/// let logits = array![[10.0, -10.0], [-10.0, 10.0]];
///
/// let eval = multi_label_accuracy(y_true.view(), logits.view()).unwrap();
/// assert_eq!(eval.accuracy, 1.0);
/// ```
pub fn multi_label_accuracy(
    y_true: ArrayView2<'_, f32>,
    logits: ArrayView2<'_, f32>,
) -> Result<Evaluation> {
    let probabilities = sigmoid(logits);
    let predicted = round_half_even(probabilities.view());
    let accuracy = accuracy_score(y_true, predicted.view())?;

    debug!(
        samples = logits.nrows(),
        classes = logits.ncols(),
        accuracy,
        "multi-label accuracy"
    );
    Ok(Evaluation { accuracy, probabilities })
}
