use ndarray::Array1;

use crate::error::Error;

/// Entropy orders closer than this to 1 are treated as q = 1.
pub const ENTROPY_ORDER_EPSILON: f64 = 1e-6;

/// Checks the m/z tolerance (Da) used for centroiding and alignment.
///
/// # Arguments
/// * `tolerance` - Tolerance in Dalton
///
pub fn validate_tolerance(tolerance: f64) -> Result<(), Error> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(Error::InvalidParameter("tolerance".to_string(), tolerance));
    }
    Ok(())
}

/// Checks the noise removal fraction, which is relative to the highest peak.
pub fn validate_noise_removal(noise_removal: f64) -> Result<(), Error> {
    if !(0.0..=1.0).contains(&noise_removal) {
        return Err(Error::InvalidParameter(
            "noise removal".to_string(),
            noise_removal,
        ));
    }
    Ok(())
}

/// Checks the entropy threshold of the entropy based intensity weighting.
pub fn validate_entropy_threshold(threshold: f64) -> Result<(), Error> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(Error::InvalidParameter(
            "entropy threshold".to_string(),
            threshold,
        ));
    }
    Ok(())
}

/// Checks an entropy order `q`, which must be positive and finite.
/// Whether `q` is singular is a separate question, see [`is_singular_order`].
pub fn validate_entropy_order(q: f64) -> Result<(), Error> {
    if !q.is_finite() || q <= 0.0 {
        return Err(Error::InvalidParameter("entropy order".to_string(), q));
    }
    Ok(())
}

pub fn is_singular_order(q: f64) -> bool {
    (q - 1.0).abs() < ENTROPY_ORDER_EPSILON
}

/// Checks that two vectors can be compared element-wise.
pub fn check_same_length(a: &Array1<f64>, b: &Array1<f64>) -> Result<(), Error> {
    if a.len() != b.len() {
        return Err(Error::ShapeMismatch(a.len(), b.len()));
    }
    Ok(())
}

/// Sums a vector and fails if the sum cannot be used as a normalizer.
///
/// # Arguments
/// * `values` - Vector to sum
/// * `context` - What the sum is needed for, used in the error message
///
pub fn positive_sum(values: &Array1<f64>, context: &str) -> Result<f64, Error> {
    let sum = values.sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(Error::DegenerateInput(format!(
            "{context} needs a positive finite sum, got {sum}"
        )));
    }
    Ok(sum)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::spectrum::Spectrum;

    /// Builds a spectrum from (m/z, intensity) pairs, panicking on invalid input.
    pub fn spectrum(peaks: &[(f64, f64)]) -> Spectrum {
        Spectrum::from_peaks(peaks).unwrap()
    }

    /// Small, well separated spectrum resembling a real MS2 scan.
    pub fn reference_spectrum() -> Spectrum {
        spectrum(&[
            (69.034, 8.0),
            (86.096, 100.0),
            (120.081, 45.0),
            (136.076, 12.0),
            (173.129, 3.0),
            (244.166, 27.0),
            (301.187, 5.0),
        ])
    }

    /// Asserts that two floats differ by less than `tolerance`.
    pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "{actual} != {expected} (tolerance {tolerance})"
        );
    }

    #[test]
    fn test_validate_tolerance() {
        assert!(validate_tolerance(0.0).is_ok());
        assert!(validate_tolerance(0.05).is_ok());
        assert!(validate_tolerance(-0.01).is_err());
        assert!(validate_tolerance(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_noise_removal() {
        assert!(validate_noise_removal(0.0).is_ok());
        assert!(validate_noise_removal(1.0).is_ok());
        assert!(validate_noise_removal(1.5).is_err());
        assert!(validate_noise_removal(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_entropy_threshold() {
        assert!(validate_entropy_threshold(0.0).is_ok());
        assert!(validate_entropy_threshold(3.0).is_ok());
        assert!(validate_entropy_threshold(-0.5).is_err());
        assert!(validate_entropy_threshold(f64::NAN).is_err());
    }

    #[test]
    fn test_entropy_order() {
        assert!(validate_entropy_order(0.5).is_ok());
        assert!(validate_entropy_order(0.0).is_err());
        assert!(is_singular_order(1.0));
        assert!(is_singular_order(1.0 + 1e-9));
        assert!(!is_singular_order(1.0001));
    }

    #[test]
    fn test_positive_sum() {
        assert_eq!(
            positive_sum(&Array1::from(vec![1.0, 3.0]), "test").unwrap(),
            4.0
        );
        assert!(matches!(
            positive_sum(&Array1::zeros(3), "test"),
            Err(Error::DegenerateInput(_))
        ));
        assert!(positive_sum(&Array1::zeros(0), "test").is_err());
    }
}
