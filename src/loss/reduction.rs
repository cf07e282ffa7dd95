//! Reduction applied to per-sample (or per-element) losses

/// How a batch of losses collapses to a scalar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Reduction {
    /// Weighted mean; NaN for an empty batch
    #[default]
    Mean,
    /// Plain sum; 0.0 for an empty batch
    Sum,
}

impl Reduction {
    /// Reduce `total` accumulated over `count` (possibly weighted) items.
    pub(crate) fn finish(self, total: f32, count: f32) -> f32 {
        match self {
            Self::Mean => total / count,
            Self::Sum => total,
        }
    }
}
