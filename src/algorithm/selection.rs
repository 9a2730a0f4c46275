use num_traits::Float;
use rand::Rng;

/// Choose an index from a weight vector
///
/// Returns `None` for an empty vector or when no weight is usable. The first
/// positive-infinite weight is returned immediately without drawing from
/// `rng`. Negative and NaN weights count as zero. Otherwise one uniform value
/// in `[0, 1)` is drawn and the normalized weights are walked left to right,
/// so ties resolve toward the lower index.
///
/// Weights are scaled by the largest one before summing, so finite weights up
/// to `f64::MAX` keep their proportions instead of overflowing the total.
pub fn select_weighted_index<F, R>(weights: &[F], rng: &mut R) -> Option<usize>
where
    F: Float,
    R: Rng + ?Sized,
{
    if weights.is_empty() {
        return None;
    }

    let mut largest = 0.0_f64;
    for (index, &weight) in weights.iter().enumerate() {
        if weight.is_infinite() && weight.is_sign_positive() {
            return Some(index);
        }
        if let Some(value) = usable_weight(weight) {
            largest = largest.max(value);
        }
    }

    if largest <= 0.0 {
        return None;
    }

    let total: f64 = weights
        .iter()
        .filter_map(|&weight| usable_weight(weight))
        .map(|value| value / largest)
        .sum();

    let threshold = rng.random::<f64>();
    let mut cumulative = 0.0;
    for (index, &weight) in weights.iter().enumerate() {
        let Some(value) = usable_weight(weight).filter(|&value| value > 0.0) else {
            continue;
        };

        cumulative += value / largest / total;
        if cumulative >= threshold {
            return Some(index);
        }
    }

    None
}

/// Selection over an optional weight vector, treating absence like emptiness
pub fn select_weighted_index_opt<F, R>(weights: Option<&[F]>, rng: &mut R) -> Option<usize>
where
    F: Float,
    R: Rng + ?Sized,
{
    weights.and_then(|weights| select_weighted_index(weights, rng))
}

// Non-negative, non-NaN weights as f64
fn usable_weight<F: Float>(weight: F) -> Option<f64> {
    if weight.is_nan() || weight < F::zero() {
        return None;
    }
    weight.to_f64()
}
