//! Output activations applied to raw task-head logits
//!
//! - [`softmax_rows`] - mutually exclusive classes (one distribution per row)
//! - [`sigmoid`] - independent per-class probabilities
//! - [`argmax_rows`] / [`round_half_even`] - probabilities → discrete predictions

use ndarray::{Array, Array1, Array2, ArrayView, ArrayView1, ArrayView2, Axis, Dimension};

use crate::error::{LearnerError, Result};

/// Numerically stable logistic function.
#[inline]
pub(crate) fn sigmoid_scalar(v: f32) -> f32 {
    if v >= 0.0 {
        1.0 / (1.0 + (-v).exp())
    } else {
        let exp_v = v.exp();
        exp_v / (1.0 + exp_v)
    }
}

/// `max(x, 0) + ln(1 + exp(-|x|))`, i.e. `ln(1 + exp(x))` without overflow.
#[inline]
pub(crate) fn softplus(v: f32) -> f32 {
    v.max(0.0) + (-v.abs()).exp().ln_1p()
}

/// Compute softmax of a single row: exp(x_i) / sum(exp(x_j))
pub fn softmax(x: ArrayView1<'_, f32>) -> Array1<f32> {
    let max = x.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let exp_x = x.mapv(|v| (v - max).exp());
    let sum: f32 = exp_x.sum();
    exp_x / sum
}

/// Log-softmax of a single row: x_i - max - ln(sum(exp(x_j - max)))
pub fn log_softmax(x: ArrayView1<'_, f32>) -> Array1<f32> {
    let max = x.iter().fold(f32::NEG_INFINITY, |a, &b| a.max(b));
    let log_sum = x.iter().map(|&v| (v - max).exp()).sum::<f32>().ln();
    x.mapv(|v| v - max - log_sum)
}

/// Apply [`softmax`] independently to every row of an N×C logit matrix.
///
/// The input is left untouched; a new matrix of the same shape is returned.
pub fn softmax_rows(logits: ArrayView2<'_, f32>) -> Array2<f32> {
    let mut probs = logits.to_owned();
    for mut row in probs.rows_mut() {
        let max = row.fold(f32::NEG_INFINITY, |a, &b| a.max(b));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row /= sum;
    }
    probs
}

/// Element-wise sigmoid: σ(x) = 1 / (1 + exp(-x))
pub fn sigmoid<D: Dimension>(x: ArrayView<'_, f32, D>) -> Array<f32, D> {
    x.mapv(sigmoid_scalar)
}

/// Index of the largest entry in each row.
///
/// Ties go to the lowest index. A NaN entry counts as the maximum, so a row
/// containing NaN reports the first NaN position.
pub fn argmax_rows(x: ArrayView2<'_, f32>) -> Result<Array1<usize>> {
    let (samples, classes) = x.dim();
    if classes == 0 && samples > 0 {
        return Err(LearnerError::NoClasses { samples });
    }

    Ok(x.map_axis(Axis(1), |row| {
        let mut best = 0;
        let mut best_val = row[0];
        for (idx, &v) in row.iter().enumerate().skip(1) {
            if best_val.is_nan() {
                break;
            }
            if v > best_val || v.is_nan() {
                best = idx;
                best_val = v;
            }
        }
        best
    }))
}

/// Round every entry to the nearest integer, ties to even (0.5 → 0, 1.5 → 2).
pub fn round_half_even<D: Dimension>(x: ArrayView<'_, f32, D>) -> Array<f32, D> {
    x.mapv(f32::round_ties_even)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};
    use proptest::prelude::*;

    #[test]
    fn test_softmax() {
        let x = array![1.0, 2.0, 3.0];
        let probs = softmax(x.view());

        let sum: f32 = probs.sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
        for &p in &probs {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_softmax_numerical_stability() {
        let x = array![1000.0, 1001.0, 1002.0];
        let probs = softmax(x.view());

        let sum: f32 = probs.sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-5);
        for &p in &probs {
            assert!(p.is_finite());
            assert!(p >= 0.0);
        }
    }

    #[test]
    fn test_log_softmax_matches_ln_of_softmax() {
        let x = array![2.0, 1.0, 0.5];
        let probs = softmax(x.view());
        let log_probs = log_softmax(x.view());
        for (p, lp) in probs.iter().zip(log_probs.iter()) {
            assert_relative_eq!(p.ln(), *lp, epsilon = 1e-5);
        }
        assert_relative_eq!(log_probs[0], -0.464_368_8, epsilon = 1e-5);
    }

    #[test]
    fn test_softmax_rows_normalizes_each_row() {
        let logits = array![[5.0, 0.0], [0.0, 5.0], [1.0, 1.0]];
        let probs = softmax_rows(logits.view());

        assert_eq!(probs.dim(), (3, 2));
        for row in probs.rows() {
            assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-5);
        }
        assert!(probs[[0, 0]] > 0.99);
        assert!(probs[[1, 1]] > 0.99);
        assert_relative_eq!(probs[[2, 0]], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_softmax_rows_leaves_input_untouched() {
        let logits = array![[2.0, -1.0]];
        let _ = softmax_rows(logits.view());
        assert_eq!(logits, array![[2.0f32, -1.0]]);
    }

    #[test]
    fn test_softmax_rows_empty_batch() {
        let logits = Array2::<f32>::zeros((0, 4));
        assert_eq!(softmax_rows(logits.view()).dim(), (0, 4));
    }

    #[test]
    fn test_sigmoid_basic() {
        let x = array![0.0, 100.0, -100.0];
        let s = sigmoid(x.view());

        assert_relative_eq!(s[0], 0.5, epsilon = 1e-5);
        assert_relative_eq!(s[1], 1.0, epsilon = 1e-5);
        assert_relative_eq!(s[2], 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_sigmoid_keeps_shape() {
        let x = array![[10.0, -10.0], [-10.0, 10.0]];
        let s = sigmoid(x.view());
        assert_eq!(s.dim(), (2, 2));
        assert!(s[[0, 0]] > 0.9999 && s[[0, 1]] < 1e-4);
    }

    #[test]
    fn test_softplus_matches_naive_form() {
        for v in [-5.0_f32, -0.5, 0.0, 0.5, 5.0] {
            assert_relative_eq!(softplus(v), (1.0 + v.exp()).ln(), epsilon = 1e-5);
        }
        assert!(softplus(500.0).is_finite());
    }

    #[test]
    fn test_argmax_rows_picks_first_on_tie() {
        let x = array![[0.2, 0.5, 0.5], [0.7, 0.1, 0.2], [1.0, 1.0, 1.0]];
        assert_eq!(argmax_rows(x.view()).unwrap(), array![1usize, 0, 0]);
    }

    #[test]
    fn test_argmax_rows_nan_wins() {
        let x = array![[0.1, f32::NAN, 0.9], [f32::NAN, 5.0, f32::NAN]];
        assert_eq!(argmax_rows(x.view()).unwrap(), array![1usize, 0]);
    }

    #[test]
    fn test_argmax_rows_no_classes() {
        let x = Array2::<f32>::zeros((2, 0));
        let err = argmax_rows(x.view()).unwrap_err();
        assert!(matches!(err, LearnerError::NoClasses { samples: 2 }));
    }

    #[test]
    fn test_argmax_rows_empty_batch() {
        let x = Array2::<f32>::zeros((0, 3));
        assert!(argmax_rows(x.view()).unwrap().is_empty());
    }

    #[test]
    fn test_round_half_even() {
        let x = array![0.5f32, 0.49, 0.51, 1.5, 2.5, 0.0, 1.0];
        assert_eq!(round_half_even(x.view()), array![0.0f32, 0.0, 1.0, 2.0, 2.0, 0.0, 1.0]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_softmax_rows_are_distributions(
            values in proptest::collection::vec(-50.0f32..50.0, 1..40),
            classes in 1..8usize,
        ) {
            let samples = values.len() / classes;
            prop_assume!(samples > 0);
            let logits = Array2::from_shape_vec((samples, classes), values[..samples * classes].to_vec())
                .unwrap();
            let probs = softmax_rows(logits.view());

            prop_assert_eq!(probs.dim(), logits.dim());
            for row in probs.rows() {
                prop_assert!((row.sum() - 1.0).abs() < 1e-4);
                for &p in row {
                    prop_assert!((0.0..=1.0).contains(&p));
                }
            }
        }

        #[test]
        fn prop_sigmoid_in_unit_interval(v in -1000.0f32..1000.0) {
            let s = sigmoid_scalar(v);
            prop_assert!((0.0..=1.0).contains(&s));
            prop_assert!((sigmoid_scalar(-v) - (1.0 - s)).abs() < 1e-5);
        }
    }
}
