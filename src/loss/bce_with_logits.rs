//! Binary Cross-Entropy with Logits Loss for multi-label classification
//!
//! Combines a sigmoid activation with binary cross-entropy loss.
//! Each output is treated as an independent binary classification,
//! allowing multiple labels to be active simultaneously.
//!
//! # Formula
//!
//! Numerically stable computation, with optional per-class positive weight `p_c`:
//! ```text
//! L_ic = (1 - t_ic) * x_ic + (1 + (p_c - 1) * t_ic) * softplus(-x_ic)
//! L = mean(L_ic) over all N×C elements
//! ```
//!
//! With `p_c = 1` this is `max(x, 0) - x * t + log(1 + exp(-|x|))`.
//!
//! # Multi-label vs single-label
//!
//! - **CrossEntropyLoss**: softmax → mutual exclusion (single label)
//! - **BCEWithLogitsLoss**: sigmoid → independent per-class (multi-label)

use ndarray::{Array1, Array2, ArrayView2, Zip};
use tracing::debug;

use super::{LossFn, Reduction};
use crate::activation::softplus;
use crate::error::{LearnerError, Result};
use crate::targets::Targets;

/// Binary Cross-Entropy with Logits Loss.
///
/// Targets are multi-hot rows (e.g. `[1.0, 0.0, 1.0]` for classes 0 and 2).
///
/// # Example
///
/// ```
/// use learner_utils::loss::{BCEWithLogitsLoss, LossFn};
/// use learner_utils::Targets;
/// use ndarray::array;
///
/// let logits = array![[0.0]];
/// let targets = array![[1.0]];
///
/// let loss = BCEWithLogitsLoss::default()
///     .forward(logits.view(), Targets::Dense(targets.view()))
///     .unwrap();
/// assert!((loss - std::f32::consts::LN_2).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BCEWithLogitsLoss {
    pos_weight: Option<Array1<f32>>,
    reduction: Reduction,
}

impl BCEWithLogitsLoss {
    /// Unweighted loss with mean reduction
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight the positive term of class `c` by `pos_weight[c]`
    pub fn with_pos_weight(mut self, pos_weight: Array1<f32>) -> Self {
        self.pos_weight = Some(pos_weight);
        self
    }

    /// Override the reduction
    pub fn with_reduction(mut self, reduction: Reduction) -> Self {
        self.reduction = reduction;
        self
    }

    /// Per-class positive weights, if any
    pub fn pos_weight(&self) -> Option<&Array1<f32>> {
        self.pos_weight.as_ref()
    }

    /// Configured reduction
    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    /// Unreduced loss of every (sample, class) element
    pub fn elementwise(
        &self,
        logits: ArrayView2<'_, f32>,
        targets: Targets<'_>,
    ) -> Result<Array2<f32>> {
        let targets = targets.dense()?;
        if targets.dim() != logits.dim() {
            return Err(LearnerError::shape(logits.shape(), targets.shape()));
        }
        if let Some(w) = &self.pos_weight {
            if w.len() != logits.ncols() {
                return Err(LearnerError::WeightLength {
                    expected: logits.ncols(),
                    actual: w.len(),
                });
            }
        }

        let mut losses = Array2::zeros(logits.raw_dim());
        Zip::indexed(&mut losses)
            .and(logits)
            .and(targets)
            .for_each(|(_, class), loss, &x, &t| {
                let p = self.pos_weight.as_ref().map_or(1.0, |w| w[class]);
                *loss = (1.0 - t) * x + (1.0 + (p - 1.0) * t) * softplus(-x);
            });
        Ok(losses)
    }
}

impl LossFn for BCEWithLogitsLoss {
    fn forward(&self, logits: ArrayView2<'_, f32>, targets: Targets<'_>) -> Result<f32> {
        let losses = self.elementwise(logits, targets)?;
        let loss = self.reduction.finish(losses.sum(), losses.len() as f32);
        debug!(loss, elements = losses.len(), reduction = ?self.reduction, "bce-with-logits forward");
        Ok(loss)
    }

    fn name(&self) -> &'static str {
        "BCEWithLogits"
    }
}
