//! Loss function trait

use ndarray::ArrayView2;

use crate::error::Result;
use crate::targets::Targets;

/// Trait for loss functions over a batch of task-head logits
pub trait LossFn: Send + Sync {
    /// Compute the reduced loss for an N×C batch of logits
    fn forward(&self, logits: ArrayView2<'_, f32>, targets: Targets<'_>) -> Result<f32>;

    /// Name of the loss function
    fn name(&self) -> &str;
}
