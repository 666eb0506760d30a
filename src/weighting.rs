use ndarray::{Array1, Zip};

use crate::{
    entropy::shannon_entropy,
    error::Error,
    spectrum::Spectrum,
    utils::{positive_sum, validate_entropy_threshold},
};

/// Weight factor transformation `intensity' = mz^wf_mz * intensity^wf_int`.
/// The m/z values are left as they are.
///
/// # Arguments
/// * `spectrum` - Spectrum to transform
/// * `wf_mz` - Exponent applied to the m/z
/// * `wf_int` - Exponent applied to the intensity
///
pub fn weight_factor_transform(
    spectrum: &Spectrum,
    wf_mz: f64,
    wf_int: f64,
) -> Result<Spectrum, Error> {
    let weighted = Zip::from(spectrum.mz())
        .and(spectrum.intensities())
        .map_collect(|&mz, &intensity| mz.powf(wf_mz) * intensity.powf(wf_int));

    // e.g. a zero intensity with a negative exponent
    spectrum.with_intensities(weighted)
}

/// Entropy based intensity weighting (Li et al., Nature Methods 2021, 18, 1524–1531).
///
/// Low entropy spectra (few dominating peaks) have their intensities raised to
/// `w = (1 + S) / (1 + thresh)`, spectra with an entropy of at least `thresh` are returned unchanged.
///
/// # Arguments
/// * `intensities` - Intensities, do not need to be normalized
/// * `thresh` - Entropy threshold, non-negative
///
pub fn entropy_weight(intensities: &Array1<f64>, thresh: f64) -> Result<Array1<f64>, Error> {
    validate_entropy_threshold(thresh)?;

    let entropy = shannon_entropy(intensities)?;
    if entropy < thresh {
        let weight = (1.0 + entropy) / (1.0 + thresh);
        return Ok(intensities.mapv(|intensity| intensity.powf(weight)));
    }
    Ok(intensities.clone())
}

/// Scales the intensities to sum to 1 so they form a probability distribution.
pub fn normalize(intensities: &Array1<f64>) -> Result<Array1<f64>, Error> {
    let total = positive_sum(intensities, "Normalization")?;
    Ok(intensities / total)
}
