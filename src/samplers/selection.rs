//! Roulette-wheel selection of a value according to non-negative weights.

use util::{Result, ReverendError};

use rand::Rng;


/// Randomly select an index of `weights`, each with probability proportional to its weight.
///
/// The weights need not sum to one. A uniform draw is taken in ```[0, sum)``` and the weights are
/// accumulated until the running total reaches the draw. A zero weight is never selected. Should
/// rounding leave the draw above the final total, the last index with a positive weight is used.
///
/// # Errors
/// * `ReverendError::EmptyDistribution` if there are no weights
/// * `ReverendError::InvalidTable` if a weight is negative or NaN
/// * `ReverendError::DivideByZero` if the weights sum to zero
pub fn weighted_index<R: Rng>(weights: &[f64], rng: &mut R) -> Result<usize> {
    if weights.is_empty() {
        return Err(ReverendError::EmptyDistribution);
    }

    if weights.iter().any(|&w| w < 0.0 || w.is_nan()) {
        return Err(ReverendError::InvalidTable(format!("invalid weights {:?}", weights)));
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(ReverendError::DivideByZero);
    }

    let draw = rng.gen::<f64>() * total;

    let mut upper = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        upper = upper + w;
        if w > 0.0 && upper >= draw {
            return Ok(i);
        }
    }

    // total > 0, so some weight is positive
    let last = weights.iter().rposition(|&w| w > 0.0).unwrap_or(weights.len() - 1);
    warn!(draw = draw, total = total, "weighted selection ran off the end, using the last value");
    Ok(last)
}

/// Randomly select one of `values`, with `weights[i]` the weight of `values[i]`.
///
/// See `weighted_index`. Only the first ```min(values.len(), weights.len())``` pairs are used.
pub fn weighted_selection<'v, T, R: Rng>(values: &'v [T], weights: &[f64], rng: &mut R) -> Result<&'v T> {
    let n = values.len().min(weights.len());
    weighted_index(&weights[..n], rng).map(|i| &values[i])
}
