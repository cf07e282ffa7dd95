//! Error types with actionable diagnostics.
//!
//! Every variant carries the context needed to fix the call site without
//! reading the source: offending shapes, indices, or names.

use thiserror::Error;

/// Result type alias for learner-utils operations.
pub type Result<T> = std::result::Result<T, LearnerError>;

/// Errors raised by losses, metrics, registries, and task-head configuration.
#[derive(Error, Debug)]
pub enum LearnerError {
    /// Two arrays that must line up do not.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}\n  → Labels and logits must be aligned sample-for-sample")]
    ShapeMismatch { expected: Vec<usize>, actual: Vec<usize> },

    /// A reduction over the class dimension was requested with zero classes.
    #[error("Logits have {samples} samples but no class columns\n  → Task heads must emit at least one logit per sample")]
    NoClasses { samples: usize },

    /// Multi-label targets must be an indicator matrix.
    #[error("Label at [{row}, {col}] is {value}, expected 0 or 1\n  → Multi-label targets must be a binary indicator matrix")]
    NonBinaryLabels { row: usize, col: usize, value: f32 },

    /// A class id does not index into the logit row.
    #[error("Class id {class} out of range for {n_classes} classes\n  → Check the number of outputs of the task head")]
    ClassOutOfRange { class: usize, n_classes: usize },

    /// A loss or metric was handed the wrong kind of targets.
    #[error("Expected {expected} targets, got {found}\n  → Class-id targets go with multi-class heads, dense targets with multi-label heads")]
    TargetKind { expected: &'static str, found: &'static str },

    /// A per-class weight vector does not match the number of classes.
    #[error("Weight vector has {actual} entries but logits have {expected} classes\n  → Pass one weight per class column")]
    WeightLength { expected: usize, actual: usize },

    /// No loss registered under this name.
    #[error("Unknown loss '{name}'\n  → Registered losses: {available}")]
    UnknownLoss { name: String, available: String },

    /// No accuracy metric registered under this name.
    #[error("Unknown metric '{name}'\n  → Registered metrics: {available}")]
    UnknownMetric { name: String, available: String },

    /// Task-head configuration has invalid syntax.
    #[error("Invalid task-head configuration syntax:\n  {message}\n  → Check YAML syntax at the indicated line")]
    ConfigParsing { message: String },

    /// Task-head configuration value is invalid.
    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValue { field: String, message: String },

    /// A task head pairs a loss with a metric for a different task type.
    #[error("Task '{task}' pairs loss '{loss}' with metric '{metric}'\n  → Use categorical_cross_entropy with multi_class_acc, bce_logits with multi_label_acc")]
    IncompatibleHead { task: String, loss: String, metric: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl LearnerError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Shape mismatch between two array shapes.
    pub(crate) fn shape(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch { expected: expected.to_vec(), actual: actual.to_vec() }
    }

    /// Check if this error stems from configuration rather than data.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownLoss { .. }
                | Self::UnknownMetric { .. }
                | Self::ConfigParsing { .. }
                | Self::ConfigValue { .. }
                | Self::IncompatibleHead { .. }
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ShapeMismatch { .. } => "E040",
            Self::NoClasses { .. } => "E041",
            Self::NonBinaryLabels { .. } => "E042",
            Self::ClassOutOfRange { .. } => "E043",
            Self::TargetKind { .. } => "E044",
            Self::WeightLength { .. } => "E045",
            Self::UnknownLoss { .. } => "E070",
            Self::UnknownMetric { .. } => "E071",
            Self::ConfigParsing { .. } => "E002",
            Self::ConfigValue { .. } => "E003",
            Self::IncompatibleHead { .. } => "E004",
            Self::Io { .. } => "E050",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_errors() -> Vec<LearnerError> {
        vec![
            LearnerError::shape(&[2], &[3]),
            LearnerError::NoClasses { samples: 1 },
            LearnerError::NonBinaryLabels { row: 0, col: 0, value: 2.0 },
            LearnerError::ClassOutOfRange { class: 3, n_classes: 2 },
            LearnerError::TargetKind { expected: "class-id", found: "dense" },
            LearnerError::WeightLength { expected: 2, actual: 3 },
            LearnerError::UnknownLoss { name: "x".into(), available: String::new() },
            LearnerError::UnknownMetric { name: "x".into(), available: String::new() },
            LearnerError::ConfigParsing { message: String::new() },
            LearnerError::ConfigValue { field: String::new(), message: String::new() },
            LearnerError::IncompatibleHead {
                task: String::new(),
                loss: String::new(),
                metric: String::new(),
            },
            LearnerError::io("", std::io::Error::other("test")),
        ]
    }

    #[test]
    fn test_error_codes_are_unique() {
        let errors = all_errors();
        let mut codes: Vec<_> = errors.iter().map(LearnerError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_shape_mismatch_message_names_both_shapes() {
        let msg = LearnerError::shape(&[4, 3], &[4, 2]).to_string();
        assert!(msg.contains("[4, 3]"));
        assert!(msg.contains("[4, 2]"));
    }

    #[test]
    fn test_data_errors_carry_hint() {
        for err in all_errors().into_iter().filter(|e| !e.is_config_error()) {
            if matches!(err, LearnerError::Io { .. }) {
                continue;
            }
            assert!(err.to_string().contains("\n  → "), "{} has no hint", err.code());
        }
        let msg = LearnerError::WeightLength { expected: 2, actual: 3 }.to_string();
        assert!(msg.contains("one weight per class"));
    }

    #[test]
    fn test_config_errors_are_classified() {
        let config_errors = all_errors().into_iter().filter(LearnerError::is_config_error).count();
        assert_eq!(config_errors, 5);
        assert!(!LearnerError::NoClasses { samples: 1 }.is_config_error());
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;
        let err = LearnerError::io("reading heads.yaml", std::io::Error::other("denied"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("heads.yaml"));
    }
}
