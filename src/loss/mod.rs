//! Loss functions for task heads
//!
//! - [`CrossEntropyLoss`] - For single-label classification tasks
//! - [`BCEWithLogitsLoss`] - For multi-label classification (sigmoid per class)
//!
//! Both take raw logits; the activation is folded into the loss.

mod bce_with_logits;
mod cross_entropy;
mod reduction;
mod traits;

pub use bce_with_logits::BCEWithLogitsLoss;
pub use cross_entropy::CrossEntropyLoss;
pub use reduction::Reduction;
pub use traits::LossFn;
