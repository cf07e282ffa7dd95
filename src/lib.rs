//! Loss and accuracy helpers for classification task heads.
//!
//! Turns raw task-head logits into probabilities and accuracy scores for two
//! task types, and exposes name-keyed defaults for a training harness:
//!
//! - **Multi-class** (one label per sample): softmax → argmax → accuracy,
//!   trained with `categorical_cross_entropy`, scored with `multi_class_acc`
//! - **Multi-label** (any subset of labels): sigmoid → round → subset accuracy,
//!   trained with `bce_logits`, scored with `multi_label_acc`
//!
//! # Example
//!
//! ```
//! use learner_utils::registry::{DEFAULT_ACCURACIES, DEFAULT_LOSSES};
//! use learner_utils::{LossFn, Targets};
//! use ndarray::array;
//!
//! let labels = array![0usize, 1];
//! let logits = array![[5.0, 0.0], [0.0, 5.0]];
//!
//! let loss = DEFAULT_LOSSES["categorical_cross_entropy"]
//!     .forward(logits.view(), Targets::Classes(labels.view()))?;
//! let eval = DEFAULT_ACCURACIES["multi_class_acc"](Targets::Classes(labels.view()), logits.view())?;
//!
//! assert!(loss < 0.01);
//! assert_eq!(eval.accuracy, 1.0);
//! # Ok::<(), learner_utils::LearnerError>(())
//! ```

pub mod activation;
pub mod config;
pub mod error;
pub mod loss;
pub mod metrics;
pub mod registry;
pub mod targets;

pub use config::{TaskHeadSpec, TaskHeadsConfig};
pub use error::{LearnerError, Result};
pub use loss::{BCEWithLogitsLoss, CrossEntropyLoss, LossFn, Reduction};
pub use metrics::{multi_class_accuracy, multi_label_accuracy, Evaluation};
pub use registry::{AccuracyFn, LossKind, MetricKind, DEFAULT_ACCURACIES, DEFAULT_LOSSES};
pub use targets::Targets;
