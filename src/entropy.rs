use ndarray::Array1;

use crate::{
    error::Error,
    utils::{is_singular_order, positive_sum, validate_entropy_order},
};

/// Shannon entropy (natural logarithm) of an intensity vector.
/// The vector is normalized to a probability distribution first, so it does not need to sum to 1.
/// Zero entries contribute nothing (0 * ln 0 = 0).
///
/// # Arguments
/// * `intensities` - Non-negative intensities with a positive sum
///
pub fn shannon_entropy(intensities: &Array1<f64>) -> Result<f64, Error> {
    let total = positive_sum(intensities, "Shannon entropy")?;
    Ok(-intensities
        .iter()
        .filter(|&&intensity| intensity > 0.0)
        .map(|&intensity| {
            let p = intensity / total;
            p * p.ln()
        })
        .sum::<f64>())
}

/// Sum of `v^q`, the building block of both generalized entropies.
pub(crate) fn power_sum(intensities: &Array1<f64>, q: f64) -> f64 {
    intensities.iter().map(|&intensity| intensity.powf(q)).sum()
}

fn check_generalized_order(q: f64) -> Result<(), Error> {
    validate_entropy_order(q)?;
    if is_singular_order(q) {
        return Err(Error::SingularParameter(q));
    }
    Ok(())
}

/// Rényi entropy of order `q`: `ln(Σ v^q) / (1 - q)`.
///
/// Unlike [`shannon_entropy`] the input is taken as is and must already sum to 1.
///
/// # Arguments
/// * `intensities` - Probability distribution
/// * `q` - Entropy order, positive and not 1
///
pub fn renyi_entropy(intensities: &Array1<f64>, q: f64) -> Result<f64, Error> {
    check_generalized_order(q)?;
    let sum = power_sum(intensities, q);
    if !sum.is_finite() || sum <= 0.0 {
        return Err(Error::DegenerateInput(format!(
            "Rényi entropy needs a positive power sum, got {sum}"
        )));
    }
    Ok(sum.ln() / (1.0 - q))
}

/// Tsallis entropy of order `q`: `(Σ v^q - 1) / (1 - q)`.
///
/// The input must already sum to 1.
///
/// # Arguments
/// * `intensities` - Probability distribution
/// * `q` - Entropy order, positive and not 1
///
pub fn tsallis_entropy(intensities: &Array1<f64>, q: f64) -> Result<f64, Error> {
    check_generalized_order(q)?;
    let sum = power_sum(intensities, q);
    if !sum.is_finite() {
        return Err(Error::DegenerateInput(format!(
            "Tsallis entropy needs a finite power sum, got {sum}"
        )));
    }
    Ok((sum - 1.0) / (1.0 - q))
}
