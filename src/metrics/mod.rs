//! Evaluation metrics for task heads
//!
//! Turn raw logits into probabilities and an accuracy score:
//! - [`multi_class_accuracy`]: softmax → argmax → accuracy
//! - [`multi_label_accuracy`]: sigmoid → round → subset accuracy

mod accuracy;
mod evaluation;
mod multi_class;
mod multi_label;


pub use accuracy::{accuracy_score, accuracy_score_1d};
pub use evaluation::Evaluation;
pub use multi_class::multi_class_accuracy;
pub use multi_label::multi_label_accuracy;
