use ndarray::Array1;
use tracing::trace;

use crate::{
    centroiding::centroid_spectrum,
    error::Error,
    spectrum::Spectrum,
    utils::{validate_noise_removal, validate_tolerance},
    weighting::normalize,
};

/// Removes every peak with an intensity below `max_intensity * noise_removal`.
///
/// # Arguments
/// * `spectrum` - Spectrum to filter
/// * `noise_removal` - Fraction of the highest intensity, between 0 and 1
///
pub fn remove_noise(spectrum: &Spectrum, noise_removal: f64) -> Spectrum {
    if spectrum.is_empty() {
        return spectrum.clone();
    }

    let max_intensity = spectrum
        .intensities()
        .iter()
        .fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));
    let threshold = max_intensity * noise_removal;

    let (mz, intensities): (Vec<f64>, Vec<f64>) = spectrum
        .peaks()
        .filter(|(_, intensity)| *intensity >= threshold)
        .unzip();

    trace!(
        "Noise removal (threshold {threshold}) kept {} of {} peaks",
        mz.len(),
        spectrum.len()
    );

    Spectrum::from_valid_parts(Array1::from(mz), Array1::from(intensities))
}

/// Cleans a spectrum (Li et al., Nature Methods 2021, 18, 1524–1531):
/// 1. sorts the peaks by m/z
/// 2. centroids peaks within `tolerance` Da, see [`centroid_spectrum`]
/// 3. removes noise, if `noise_removal` is given, see [`remove_noise`]
/// 4. normalizes the intensities to sum to 1
///
/// Fails with [`Error::DegenerateInput`] if nothing with a positive intensity is left to normalize.
///
/// The output can still contain peaks closer than `tolerance` (see [`centroid_spectrum`]), in
/// which case cleaning it a second time merges them and the function is not idempotent.
///
/// # Arguments
/// * `spectrum` - Raw spectrum, any order
/// * `noise_removal` - Fraction of the highest intensity below which peaks are dropped, `None` to keep all
/// * `tolerance` - Centroiding tolerance in Dalton
///
pub fn clean_spectrum(
    spectrum: &Spectrum,
    noise_removal: Option<f64>,
    tolerance: f64,
) -> Result<Spectrum, Error> {
    validate_tolerance(tolerance)?;
    if let Some(noise_removal) = noise_removal {
        validate_noise_removal(noise_removal)?;
    }

    let sorted = spectrum.sorted_by_mz();
    let mut cleaned = centroid_spectrum(&sorted, tolerance);
    drop(sorted);

    if let Some(noise_removal) = noise_removal {
        cleaned = remove_noise(&cleaned, noise_removal);
    }

    let normalized = normalize(cleaned.intensities())?;
    cleaned.with_intensities(normalized)
}
