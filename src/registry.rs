//! Default losses and accuracy metrics, looked up by name
//!
//! Both tables are built once on first access and never change. Callers that
//! need weighted or differently reduced losses construct them directly from
//! [`crate::loss`] instead of going through the registry.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LearnerError, Result};
use crate::loss::{BCEWithLogitsLoss, CrossEntropyLoss, LossFn};
use crate::metrics::{multi_class_accuracy, multi_label_accuracy, Evaluation};
use crate::targets::Targets;

/// Key of the softmax cross-entropy loss
pub const CATEGORICAL_CROSS_ENTROPY: &str = "categorical_cross_entropy";
/// Key of the sigmoid binary cross-entropy loss
pub const BCE_LOGITS: &str = "bce_logits";
/// Key of the multi-class accuracy metric
pub const MULTI_CLASS_ACC: &str = "multi_class_acc";
/// Key of the multi-label accuracy metric
pub const MULTI_LABEL_ACC: &str = "multi_label_acc";

/// Shared signature of registered accuracy metrics
pub type AccuracyFn = fn(Targets<'_>, ArrayView2<'_, f32>) -> Result<Evaluation>;

/// Losses keyed by name: `categorical_cross_entropy`, `bce_logits`
pub static DEFAULT_LOSSES: LazyLock<BTreeMap<&'static str, Box<dyn LossFn>>> =
    LazyLock::new(|| {
        debug!("building default loss registry");
        let mut losses: BTreeMap<&'static str, Box<dyn LossFn>> = BTreeMap::new();
        losses.insert(CATEGORICAL_CROSS_ENTROPY, Box::new(CrossEntropyLoss::default()));
        losses.insert(BCE_LOGITS, Box::new(BCEWithLogitsLoss::default()));
        losses
    });

/// Accuracy metrics keyed by name: `multi_class_acc`, `multi_label_acc`
pub static DEFAULT_ACCURACIES: LazyLock<BTreeMap<&'static str, AccuracyFn>> =
    LazyLock::new(|| {
        debug!("building default accuracy registry");
        let mut metrics: BTreeMap<&'static str, AccuracyFn> = BTreeMap::new();
        metrics.insert(MULTI_CLASS_ACC, multi_class_entry);
        metrics.insert(MULTI_LABEL_ACC, multi_label_entry);
        metrics
    });

fn multi_class_entry(targets: Targets<'_>, logits: ArrayView2<'_, f32>) -> Result<Evaluation> {
    multi_class_accuracy(targets.classes()?, logits)
}

fn multi_label_entry(targets: Targets<'_>, logits: ArrayView2<'_, f32>) -> Result<Evaluation> {
    multi_label_accuracy(targets.dense()?, logits)
}

fn joined_keys<V>(table: &BTreeMap<&'static str, V>) -> String {
    table.keys().copied().collect::<Vec<_>>().join(", ")
}

/// Look up a default loss by name
pub fn loss_fn(name: &str) -> Result<&'static dyn LossFn> {
    let losses: &'static BTreeMap<&'static str, Box<dyn LossFn>> = &DEFAULT_LOSSES;
    losses.get(name).map(|loss| &**loss).ok_or_else(|| LearnerError::UnknownLoss {
        name: name.to_string(),
        available: joined_keys(losses),
    })
}

/// Look up a default accuracy metric by name
pub fn accuracy_fn(name: &str) -> Result<AccuracyFn> {
    DEFAULT_ACCURACIES.get(name).copied().ok_or_else(|| LearnerError::UnknownMetric {
        name: name.to_string(),
        available: joined_keys(&*DEFAULT_ACCURACIES),
    })
}

/// Typed name of a registered loss
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossKind {
    /// Softmax cross-entropy on class ids
    CategoricalCrossEntropy,
    /// Sigmoid binary cross-entropy on multi-hot rows
    BceLogits,
}

impl LossKind {
    /// All registered losses
    pub const ALL: [Self; 2] = [Self::CategoricalCrossEntropy, Self::BceLogits];

    /// Registry key
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CategoricalCrossEntropy => CATEGORICAL_CROSS_ENTROPY,
            Self::BceLogits => BCE_LOGITS,
        }
    }

    /// Registered loss object
    pub fn loss_fn(self) -> Result<&'static dyn LossFn> {
        loss_fn(self.as_str())
    }

    /// The accuracy metric for the same task type
    pub fn metric(self) -> MetricKind {
        match self {
            Self::CategoricalCrossEntropy => MetricKind::MultiClassAcc,
            Self::BceLogits => MetricKind::MultiLabelAcc,
        }
    }
}

impl fmt::Display for LossKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LossKind {
    type Err = LearnerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s).ok_or_else(|| {
            LearnerError::UnknownLoss { name: s.to_string(), available: joined_keys(&*DEFAULT_LOSSES) }
        })
    }
}

/// Typed name of a registered accuracy metric
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Softmax + argmax accuracy
    MultiClassAcc,
    /// Sigmoid + rounding subset accuracy
    MultiLabelAcc,
}

impl MetricKind {
    /// All registered metrics
    pub const ALL: [Self; 2] = [Self::MultiClassAcc, Self::MultiLabelAcc];

    /// Registry key
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MultiClassAcc => MULTI_CLASS_ACC,
            Self::MultiLabelAcc => MULTI_LABEL_ACC,
        }
    }

    /// Registered accuracy function
    pub fn accuracy_fn(self) -> Result<AccuracyFn> {
        accuracy_fn(self.as_str())
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = LearnerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s).ok_or_else(|| {
            LearnerError::UnknownMetric {
                name: s.to_string(),
                available: joined_keys(&*DEFAULT_ACCURACIES),
            }
        })
    }
}
