//! Cross Entropy Loss for single-label classification
//!
//! Targets are either class ids or per-class probability rows:
//!
//! ```text
//! l_i = -w[y_i] * log_softmax(x_i)[y_i]          (class ids)
//! l_i = -Σ_c w[c] * p_ic * log_softmax(x_i)[c]   (probabilities)
//! ```
//!
//! Mean reduction divides by `Σ w[y_i]` for class ids and by N for
//! probabilities. Without weights both are the plain batch mean.

use ndarray::{Array1, ArrayView1, ArrayView2};
use tracing::debug;

use super::{LossFn, Reduction};
use crate::activation::log_softmax;
use crate::error::{LearnerError, Result};
use crate::targets::Targets;

/// Cross Entropy Loss (softmax + negative log-likelihood)
///
/// # Example
///
/// ```
/// use learner_utils::loss::{CrossEntropyLoss, LossFn};
/// use learner_utils::Targets;
/// use ndarray::array;
///
/// let logits = array![[2.0, 1.0, 0.5]];
/// let classes = array![0usize];
///
/// let loss = CrossEntropyLoss::default()
///     .forward(logits.view(), Targets::Classes(classes.view()))
///     .unwrap();
/// assert!((loss - 0.4643688).abs() < 1e-5);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CrossEntropyLoss {
    weights: Option<Array1<f32>>,
    reduction: Reduction,
}

impl CrossEntropyLoss {
    /// Unweighted loss with mean reduction
    pub fn new() -> Self {
        Self::default()
    }

    /// Rescale each class's contribution by `weights[class]`
    pub fn with_weights(mut self, weights: Array1<f32>) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Override the batch reduction
    pub fn with_reduction(mut self, reduction: Reduction) -> Self {
        self.reduction = reduction;
        self
    }

    /// Class weights, if any
    pub fn weights(&self) -> Option<&Array1<f32>> {
        self.weights.as_ref()
    }

    /// Configured reduction
    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    /// Unreduced (weighted) loss of every sample
    pub fn per_sample(
        &self,
        logits: ArrayView2<'_, f32>,
        targets: Targets<'_>,
    ) -> Result<Array1<f32>> {
        self.losses(logits, targets).map(|(losses, _)| losses)
    }

    fn class_weight(&self, class: usize) -> f32 {
        self.weights.as_ref().map_or(1.0, |w| w[class])
    }

    fn check_weights(&self, n_classes: usize) -> Result<()> {
        match &self.weights {
            Some(w) if w.len() != n_classes => {
                Err(LearnerError::WeightLength { expected: n_classes, actual: w.len() })
            }
            _ => Ok(()),
        }
    }

    /// Per-sample losses and the mean-reduction denominator
    fn losses(
        &self,
        logits: ArrayView2<'_, f32>,
        targets: Targets<'_>,
    ) -> Result<(Array1<f32>, f32)> {
        let (samples, n_classes) = logits.dim();
        self.check_weights(n_classes)?;

        match targets {
            Targets::Classes(classes) => self.class_id_losses(logits, classes),
            Targets::Dense(probs) => {
                if probs.dim() != logits.dim() {
                    return Err(LearnerError::shape(logits.shape(), probs.shape()));
                }
                let losses = logits
                    .rows()
                    .into_iter()
                    .zip(probs.rows())
                    .map(|(row, p)| {
                        let log_probs = log_softmax(row);
                        -log_probs
                            .iter()
                            .zip(p.iter())
                            .enumerate()
                            .map(|(c, (&lp, &t))| self.class_weight(c) * t * lp)
                            .sum::<f32>()
                    })
                    .collect::<Array1<f32>>();
                Ok((losses, samples as f32))
            }
        }
    }

    fn class_id_losses(
        &self,
        logits: ArrayView2<'_, f32>,
        classes: ArrayView1<'_, usize>,
    ) -> Result<(Array1<f32>, f32)> {
        let (samples, n_classes) = logits.dim();
        if classes.len() != samples {
            return Err(LearnerError::shape(&[samples], &[classes.len()]));
        }

        let mut losses = Array1::zeros(samples);
        let mut total_weight = 0.0;
        for ((row, &class), loss) in logits.rows().into_iter().zip(classes).zip(&mut losses) {
            if class >= n_classes {
                return Err(LearnerError::ClassOutOfRange { class, n_classes });
            }
            let w = self.class_weight(class);
            *loss = -w * log_softmax(row)[class];
            total_weight += w;
        }
        Ok((losses, total_weight))
    }
}

impl LossFn for CrossEntropyLoss {
    fn forward(&self, logits: ArrayView2<'_, f32>, targets: Targets<'_>) -> Result<f32> {
        let (losses, denominator) = self.losses(logits, targets)?;
        let loss = self.reduction.finish(losses.sum(), denominator);
        debug!(loss, samples = losses.len(), reduction = ?self.reduction, "cross-entropy forward");
        Ok(loss)
    }

    fn name(&self) -> &'static str {
        "CrossEntropy"
    }
}
