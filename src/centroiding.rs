use ndarray::Array1;
use tracing::trace;

use crate::spectrum::Spectrum;

/// Checks if any two neighbouring peaks are within `tolerance` of each other.
/// Expects a spectrum sorted by m/z.
pub fn needs_centroiding(mz: &Array1<f64>, tolerance: f64) -> bool {
    mz.iter()
        .zip(mz.iter().skip(1))
        .any(|(left, right)| right - left <= tolerance)
}

/// Merges peaks which are within `tolerance` Da of each other.
///
/// Peaks are processed by decreasing intensity, so the most intense peak claims its
/// neighbourhood first. For each seed, all peaks within `tolerance` of the seed's m/z
/// (on both sides) are merged into a single peak with the intensity weighted mean m/z
/// and the summed intensity. Merged peaks are consumed and neither seed nor join another
/// window. Ties in intensity are resolved by position, the lower index wins.
///
/// Peaks with zero intensity never seed a window, so they are dropped whenever merging happens.
/// If no two neighbours are close enough the spectrum is returned as is.
///
/// Because windows are measured from the seed, the result is not guaranteed to be free of
/// peaks within `tolerance` of each other: a merged peak's weighted mean m/z can move closer
/// to a neighbour that stayed separate, and centroiding the output again merges them.
/// Kept for score compatibility, needs a correctness review.
///
/// # Arguments
/// * `spectrum` - Spectrum sorted by m/z
/// * `tolerance` - Window half width in Dalton
///
pub fn centroid_spectrum(spectrum: &Spectrum, tolerance: f64) -> Spectrum {
    let mz = spectrum.mz();
    let intensities = spectrum.intensities();

    if !needs_centroiding(mz, tolerance) {
        trace!("Spectrum with {} peaks is already centroided", mz.len());
        return spectrum.clone();
    }

    // Stable sort, equal intensities keep their m/z order
    let mut intensity_order: Vec<usize> = (0..mz.len()).collect();
    intensity_order.sort_by(|&a, &b| intensities[b].total_cmp(&intensities[a]));

    let mut consumed = vec![false; mz.len()];
    let mut merged_peaks: Vec<(f64, f64)> = Vec::new();

    for seed in intensity_order {
        if consumed[seed] || intensities[seed] <= 0.0 {
            continue;
        }
        let seed_mz = mz[seed];

        // Left border (inclusive)
        let mut left = seed;
        while left > 0 && seed_mz - mz[left - 1] <= tolerance {
            left -= 1;
        }

        // Right border (exclusive)
        let mut right = seed + 1;
        while right < mz.len() && mz[right] - seed_mz <= tolerance {
            right += 1;
        }

        let mut intensity_sum = 0.0;
        let mut weighted_mz_sum = 0.0;
        for idx in left..right {
            if consumed[idx] {
                continue;
            }
            intensity_sum += intensities[idx];
            weighted_mz_sum += mz[idx] * intensities[idx];
            consumed[idx] = true;
        }

        merged_peaks.push((weighted_mz_sum / intensity_sum, intensity_sum));
    }

    merged_peaks.sort_by(|a, b| a.0.total_cmp(&b.0));
    trace!(
        "Centroided {} peaks into {}",
        mz.len(),
        merged_peaks.len()
    );

    let (merged_mz, merged_intensities): (Vec<f64>, Vec<f64>) =
        merged_peaks.into_iter().unzip();
    Spectrum::from_valid_parts(Array1::from(merged_mz), Array1::from(merged_intensities))
}
