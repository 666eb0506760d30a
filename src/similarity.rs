use std::f64::consts::LN_2;

use ndarray::Array1;
use tracing::debug;

use crate::{
    configuration::SimilarityMeasure,
    entropy::{power_sum, renyi_entropy, shannon_entropy, tsallis_entropy},
    error::Error,
    utils::{check_same_length, is_singular_order, validate_entropy_order},
};

/// Cosine similarity `x·y / (|x| |y|)`.
///
/// # Arguments
/// * `x` - First intensity vector
/// * `y` - Second intensity vector, same length as `x`
///
pub fn cosine_similarity(x: &Array1<f64>, y: &Array1<f64>) -> Result<f64, Error> {
    check_same_length(x, y)?;

    let norm_product = x.dot(x).sqrt() * y.dot(y).sqrt();
    if !norm_product.is_finite() || norm_product <= 0.0 {
        return Err(Error::DegenerateInput(
            "cosine similarity of an all-zero vector".to_string(),
        ));
    }
    Ok(x.dot(y) / norm_product)
}

/// Shannon entropy similarity (Li et al., Nature Methods 2021, 18, 1524–1531):
/// `1 - (2 H(a + b) - H(a) - H(b)) / ln(4)`.
///
/// The entropies normalize internally, so `a` and `b` do not need to sum to 1.
pub fn shannon_similarity(a: &Array1<f64>, b: &Array1<f64>) -> Result<f64, Error> {
    check_same_length(a, b)?;

    let entropy_a = shannon_entropy(a)?;
    let entropy_b = shannon_entropy(b)?;
    let entropy_ab = shannon_entropy(&(a + b))?;
    Ok(1.0 - (2.0 * entropy_ab - (entropy_a + entropy_b)) / (2.0 * LN_2))
}

/// Rényi entropy similarity, a generalization of [`shannon_similarity`] which approaches it as `q -> 1`.
///
/// The divergence between `a`, `b` and their mean is normalized by its value for two
/// spectra without shared peaks. For `q` (almost) equal to 1 the Shannon similarity is returned.
/// The score is not clamped, it may leave [0, 1] for unusual orders.
///
/// # Arguments
/// * `a` - Probability distribution
/// * `b` - Probability distribution, same length as `a`
/// * `q` - Entropy order, positive
///
pub fn renyi_similarity(a: &Array1<f64>, b: &Array1<f64>, q: f64) -> Result<f64, Error> {
    check_same_length(a, b)?;
    validate_entropy_order(q)?;
    if is_singular_order(q) {
        debug!("Rényi similarity with q = {q}, using Shannon similarity");
        return shannon_similarity(a, b);
    }

    let entropy_a = renyi_entropy(a, q)?;
    let entropy_b = renyi_entropy(b, q)?;
    let entropy_merged = renyi_entropy(&((a + b) / 2.0), q)?;

    let normalizer = (2.0 * (power_sum(&(a / 2.0), q) + power_sum(&(b / 2.0), q)).ln()
        - (power_sum(a, q).ln() + power_sum(b, q).ln()))
        / (1.0 - q);

    normalized_similarity(2.0 * entropy_merged - (entropy_a + entropy_b), normalizer)
}

/// Tsallis entropy similarity, a generalization of [`shannon_similarity`] which approaches it as `q -> 1`.
///
/// Same construction as [`renyi_similarity`], using Tsallis entropies.
///
/// # Arguments
/// * `a` - Probability distribution
/// * `b` - Probability distribution, same length as `a`
/// * `q` - Entropy order, positive
///
pub fn tsallis_similarity(a: &Array1<f64>, b: &Array1<f64>, q: f64) -> Result<f64, Error> {
    check_same_length(a, b)?;
    validate_entropy_order(q)?;
    if is_singular_order(q) {
        debug!("Tsallis similarity with q = {q}, using Shannon similarity");
        return shannon_similarity(a, b);
    }

    let entropy_a = tsallis_entropy(a, q)?;
    let entropy_b = tsallis_entropy(b, q)?;
    let entropy_merged = tsallis_entropy(&((a + b) / 2.0), q)?;

    let normalizer = (2.0 * (power_sum(&(a / 2.0), q) + power_sum(&(b / 2.0), q))
        - (power_sum(a, q) + power_sum(b, q)))
        / (1.0 - q);

    normalized_similarity(2.0 * entropy_merged - (entropy_a + entropy_b), normalizer)
}

fn normalized_similarity(divergence: f64, normalizer: f64) -> Result<f64, Error> {
    if !normalizer.is_finite() || normalizer == 0.0 {
        return Err(Error::DegenerateInput(format!(
            "similarity normalizer is {normalizer}"
        )));
    }
    Ok(1.0 - divergence / normalizer)
}

impl SimilarityMeasure {
    /// Calculates the similarity of two aligned intensity vectors with this measure.
    pub fn similarity(&self, a: &Array1<f64>, b: &Array1<f64>) -> Result<f64, Error> {
        match *self {
            SimilarityMeasure::Cosine => cosine_similarity(a, b),
            SimilarityMeasure::Shannon => shannon_similarity(a, b),
            SimilarityMeasure::Renyi(q) => renyi_similarity(a, b, q),
            SimilarityMeasure::Tsallis(q) => tsallis_similarity(a, b, q),
        }
    }
}
