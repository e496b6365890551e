/// Shannon entropy of a weight distribution given its running sums
///
/// With `S = Σw` and `L = Σ w·ln(w)` over the remaining weights, the entropy
/// of the normalized distribution is `ln(S) - L / S`. Returns `NaN` when
/// nothing remains, which callers treat as a contradiction.
pub fn entropy_from_sums(sum_weights: f64, sum_weight_log_weights: f64) -> f64 {
    if sum_weights <= 0.0 {
        return f64::NAN;
    }
    sum_weights.ln() - sum_weight_log_weights / sum_weights
}

/// `w·ln(w)`, with the limit value 0 at `w = 0`
pub fn weight_log_weight(weight: f64) -> f64 {
    if weight > 0.0 {
        weight * weight.ln()
    } else {
        0.0
    }
}

/// Shannon entropy computed directly from the weights
///
/// The weights need not be normalized. Used as the reference the
/// incremental bookkeeping in cells is checked against.
pub fn shannon_entropy(weights: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, sum_log) = weights
        .into_iter()
        .fold((0.0, 0.0), |(sum, sum_log), weight| {
            (sum + weight, sum_log + weight_log_weight(weight))
        });
    entropy_from_sums(sum, sum_log)
}
