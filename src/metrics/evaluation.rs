//! Result of evaluating one task head

use ndarray::Array2;

/// Accuracy plus the activated outputs it was computed from
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Fraction of correctly predicted samples, NaN for an empty batch
    pub accuracy: f64,
    /// Logits after the task's output activation (softmax or sigmoid)
    pub probabilities: Array2<f32>,
}

impl Evaluation {
    /// Number of evaluated samples
    pub fn samples(&self) -> usize {
        self.probabilities.nrows()
    }

    /// Number of classes per sample
    pub fn classes(&self) -> usize {
        self.probabilities.ncols()
    }

    /// Split into `(accuracy, probabilities)`
    pub fn into_parts(self) -> (f64, Array2<f32>) {
        (self.accuracy, self.probabilities)
    }
}
