//! YAML task-head configuration
//!
//! A training harness declares one entry per task head, naming its loss and
//! accuracy metric by registry key:
//!
//! ```yaml
//! tasks:
//!   - name: category
//!     loss: categorical_cross_entropy
//!     metric: multi_class_acc
//!   - name: tags
//!     loss: bce_logits
//!     metric: multi_label_acc
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LearnerError, Result};
use crate::loss::LossFn;
use crate::metrics::Evaluation;
use crate::registry::{AccuracyFn, LossKind, MetricKind};
use crate::targets::Targets;

/// One task head: its name plus the loss and metric it is trained and scored with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHeadSpec {
    /// Unique task name
    pub name: String,
    /// Registered loss
    pub loss: LossKind,
    /// Registered accuracy metric
    pub metric: MetricKind,
}

impl TaskHeadSpec {
    /// Task head with an explicit loss/metric pair
    pub fn new(name: impl Into<String>, loss: LossKind, metric: MetricKind) -> Self {
        Self { name: name.into(), loss, metric }
    }

    /// Single-label head: cross-entropy + multi-class accuracy
    pub fn multi_class(name: impl Into<String>) -> Self {
        Self::new(name, LossKind::CategoricalCrossEntropy, MetricKind::MultiClassAcc)
    }

    /// Multi-label head: BCE-with-logits + multi-label accuracy
    pub fn multi_label(name: impl Into<String>) -> Self {
        Self::new(name, LossKind::BceLogits, MetricKind::MultiLabelAcc)
    }

    /// Check that the loss and metric belong to the same task type
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LearnerError::ConfigValue {
                field: "tasks.name".into(),
                message: "task name cannot be empty".into(),
            });
        }
        if self.loss.metric() != self.metric {
            return Err(LearnerError::IncompatibleHead {
                task: self.name.clone(),
                loss: self.loss.to_string(),
                metric: self.metric.to_string(),
            });
        }
        Ok(())
    }

    /// Registered loss for this head
    pub fn loss_fn(&self) -> Result<&'static dyn LossFn> {
        self.loss.loss_fn()
    }

    /// Registered accuracy metric for this head
    pub fn accuracy_fn(&self) -> Result<AccuracyFn> {
        self.metric.accuracy_fn()
    }

    /// Reduced loss of a batch of this head's logits
    pub fn loss(&self, logits: ArrayView2<'_, f32>, targets: Targets<'_>) -> Result<f32> {
        self.loss_fn()?.forward(logits, targets)
    }

    /// Probabilities and accuracy of a batch of this head's logits
    pub fn evaluate(&self, targets: Targets<'_>, logits: ArrayView2<'_, f32>) -> Result<Evaluation> {
        let accuracy = self.accuracy_fn()?;
        let evaluation = accuracy(targets, logits)?;
        debug!(task = %self.name, metric = %self.metric, accuracy = evaluation.accuracy, "task head evaluated");
        Ok(evaluation)
    }
}

/// All task heads of a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHeadsConfig {
    /// Task heads, in declaration order
    pub tasks: Vec<TaskHeadSpec>,
}

impl TaskHeadsConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| LearnerError::ConfigParsing { message: e.to_string() })?;
        config.validate()?;
        debug!(tasks = config.tasks.len(), "task-head config loaded");
        Ok(config)
    }

    /// Read, parse, and validate a YAML file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .map_err(|e| LearnerError::io(format!("reading {}", path.display()), e))?;
        Self::from_yaml(&yaml)
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| LearnerError::ConfigParsing { message: e.to_string() })
    }

    /// Reject empty configs, duplicate names, and mismatched loss/metric pairs
    pub fn validate(&self) -> Result<()> {
        if self.tasks.is_empty() {
            return Err(LearnerError::ConfigValue {
                field: "tasks".into(),
                message: "at least one task head is required".into(),
            });
        }

        let mut seen = HashSet::new();
        for task in &self.tasks {
            task.validate()?;
            if !seen.insert(task.name.as_str()) {
                return Err(LearnerError::ConfigValue {
                    field: "tasks.name".into(),
                    message: format!("duplicate task name '{}'", task.name),
                });
            }
        }
        Ok(())
    }

    /// Find a task head by name
    pub fn task(&self, name: &str) -> Option<&TaskHeadSpec> {
        self.tasks.iter().find(|t| t.name == name)
    }
}
