use ndarray::Array1;

use crate::{error::Error, spectrum::Spectrum, utils::validate_tolerance};

/// Two spectra projected onto a shared m/z axis.
///
/// Row `i` holds the m/z, the intensity of spectrum A and the intensity of spectrum B.
/// A zero in one of the intensity columns means the peak was only found in the other spectrum.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    mz: Array1<f64>,
    intensities_a: Array1<f64>,
    intensities_b: Array1<f64>,
}

impl AlignedPair {
    fn from_rows(rows: Vec<(f64, f64, f64)>) -> Self {
        let mut mz = Vec::with_capacity(rows.len());
        let mut intensities_a = Vec::with_capacity(rows.len());
        let mut intensities_b = Vec::with_capacity(rows.len());
        for (row_mz, intensity_a, intensity_b) in rows {
            mz.push(row_mz);
            intensities_a.push(intensity_a);
            intensities_b.push(intensity_b);
        }
        Self {
            mz: Array1::from(mz),
            intensities_a: Array1::from(intensities_a),
            intensities_b: Array1::from(intensities_b),
        }
    }

    pub fn mz(&self) -> &Array1<f64> {
        &self.mz
    }

    pub fn intensities_a(&self) -> &Array1<f64> {
        &self.intensities_a
    }

    pub fn intensities_b(&self) -> &Array1<f64> {
        &self.intensities_b
    }

    pub fn len(&self) -> usize {
        self.mz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }

    /// Number of rows where both spectra have a non-zero intensity.
    pub fn matched_peaks(&self) -> usize {
        self.intensities_a
            .iter()
            .zip(self.intensities_b.iter())
            .filter(|(&a, &b)| a > 0.0 && b > 0.0)
            .count()
    }
}

/// Matches the peaks of two spectra in a single merge pass (Li et al., Nature Methods 2021, 18, 1524–1531).
///
/// All peaks of B within `tolerance` of the current peak of A are summed into A's row.
/// Peaks only found in one spectrum get a zero for the other one.
/// If neither spectrum has any peaks a single `(0, 0, 0)` row is returned.
///
/// The accumulation only flushes when A moves on, which reproduces the reference
/// behaviour but is questionable when several A peaks share a tolerance window with
/// several B peaks: all of those B peaks end up in the first A peak's row and the
/// following A peaks get none. Kept for score compatibility, needs a correctness review.
///
/// # Arguments
/// * `spectrum_a` - Spectrum sorted by m/z
/// * `spectrum_b` - Spectrum sorted by m/z
/// * `tolerance` - Matching tolerance in Dalton
///
pub fn align_spectra(
    spectrum_a: &Spectrum,
    spectrum_b: &Spectrum,
    tolerance: f64,
) -> Result<AlignedPair, Error> {
    validate_tolerance(tolerance)?;
    if !spectrum_a.is_sorted() || !spectrum_b.is_sorted() {
        return Err(Error::UnsortedSpectrum);
    }

    let (mz_a, int_a) = (spectrum_a.mz(), spectrum_a.intensities());
    let (mz_b, int_b) = (spectrum_b.mz(), spectrum_b.intensities());

    let mut rows: Vec<(f64, f64, f64)> = Vec::with_capacity(mz_a.len() + mz_b.len());
    let mut a = 0;
    let mut b = 0;
    let mut pending_b_intensity = 0.0;

    while a < mz_a.len() && b < mz_b.len() {
        let mass_delta = mz_a[a] - mz_b[b];

        if mass_delta < -tolerance {
            // Only in A (or A with the B peaks accumulated so far)
            rows.push((mz_a[a], int_a[a], pending_b_intensity));
            pending_b_intensity = 0.0;
            a += 1;
        } else if mass_delta > tolerance {
            // Only in B
            rows.push((mz_b[b], 0.0, int_b[b]));
            b += 1;
        } else {
            pending_b_intensity += int_b[b];
            b += 1;
        }
    }

    if pending_b_intensity > 0.0 {
        rows.push((mz_a[a], int_a[a], pending_b_intensity));
        a += 1;
    }

    rows.extend((b..mz_b.len()).map(|idx| (mz_b[idx], 0.0, int_b[idx])));
    rows.extend((a..mz_a.len()).map(|idx| (mz_a[idx], int_a[idx], 0.0)));

    if rows.is_empty() {
        rows.push((0.0, 0.0, 0.0));
    }

    Ok(AlignedPair::from_rows(rows))
}
