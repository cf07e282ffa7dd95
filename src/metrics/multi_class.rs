//! Accuracy for single-label, multi-class task heads

use ndarray::{ArrayView1, ArrayView2};
use tracing::debug;

use super::{accuracy_score_1d, Evaluation};
use crate::activation::{argmax_rows, softmax_rows};
use crate::error::Result;

/// Softmax the logits, take the argmax of each row, and score it against `y_true`.
///
/// Ties in the argmax go to the lowest class index. Labels that do not index
/// a column are not rejected; they count as misses.
///
/// # Example
///
/// ```
/// use learner_utils::metrics::multi_class_accuracy;
/// use ndarray::array;
///
/// let y_true = array![0usize, 1];
/// let logits = array![[5.0, 0.0], [0.0, 5.0]];
///
/// let eval = multi_class_accuracy(y_true.view(), logits.view()).unwrap();
/// assert_eq!(eval.accuracy, 1.0);
/// assert_eq!(eval.probabilities.dim(), (2, 2));
/// ```
pub fn multi_class_accuracy(
    y_true: ArrayView1<'_, usize>,
    logits: ArrayView2<'_, f32>,
) -> Result<Evaluation> {
    let probabilities = softmax_rows(logits);
    let predicted = argmax_rows(probabilities.view())?;
    let accuracy = accuracy_score_1d(y_true, predicted.view())?;

    debug!(
        samples = logits.nrows(),
        classes = logits.ncols(),
        accuracy,
        "multi-class accuracy"
    );
    Ok(Evaluation { accuracy, probabilities })
}
