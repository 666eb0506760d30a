use ndarray::Array1;

use crate::error::Error;

/// A fragmentation spectrum stored as two equal-length columns (m/z and intensity).
///
/// Every m/z and intensity is finite and non-negative. Ordering is only guaranteed
/// after the spectrum went through [`crate::cleaning::clean_spectrum`].
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    mz: Array1<f64>,
    intensities: Array1<f64>,
}

impl Spectrum {
    /// Creates a new spectrum from m/z and intensity arrays.
    ///
    /// # Arguments
    /// * `mz` - Mass to charge ratios
    /// * `intensities` - Intensities, one per m/z
    ///
    pub fn new(mz: Array1<f64>, intensities: Array1<f64>) -> Result<Self, Error> {
        if mz.len() != intensities.len() {
            return Err(Error::ShapeMismatch(mz.len(), intensities.len()));
        }
        validate_column("m/z", &mz)?;
        validate_column("intensity", &intensities)?;
        Ok(Self { mz, intensities })
    }

    /// Creates a new spectrum from (m/z, intensity) pairs.
    pub fn from_peaks(peaks: &[(f64, f64)]) -> Result<Self, Error> {
        let (mz, intensities): (Vec<f64>, Vec<f64>) = peaks.iter().copied().unzip();
        Self::new(Array1::from(mz), Array1::from(intensities))
    }

    /// Builds a spectrum from columns which are already known to be valid.
    pub(crate) fn from_valid_parts(mz: Array1<f64>, intensities: Array1<f64>) -> Self {
        debug_assert_eq!(mz.len(), intensities.len());
        Self { mz, intensities }
    }

    /// Returns a copy of this spectrum with the intensities replaced.
    /// The new intensities are checked the same way as in [`Spectrum::new`].
    pub fn with_intensities(&self, intensities: Array1<f64>) -> Result<Self, Error> {
        Self::new(self.mz.clone(), intensities)
    }

    pub fn mz(&self) -> &Array1<f64> {
        &self.mz
    }

    pub fn intensities(&self) -> &Array1<f64> {
        &self.intensities
    }

    pub fn len(&self) -> usize {
        self.mz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }

    /// Iterates over the (m/z, intensity) pairs.
    pub fn peaks(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.mz
            .iter()
            .copied()
            .zip(self.intensities.iter().copied())
    }

    /// True if the m/z values are in ascending order.
    pub fn is_sorted(&self) -> bool {
        self.mz
            .iter()
            .zip(self.mz.iter().skip(1))
            .all(|(left, right)| left <= right)
    }

    /// Returns the peaks in ascending m/z order. Peaks with equal m/z keep their relative order.
    pub fn sorted_by_mz(&self) -> Self {
        if self.is_sorted() {
            return self.clone();
        }
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| self.mz[a].total_cmp(&self.mz[b]));

        Self {
            mz: order.iter().map(|&idx| self.mz[idx]).collect(),
            intensities: order.iter().map(|&idx| self.intensities[idx]).collect(),
        }
    }
}

fn validate_column(name: &str, values: &Array1<f64>) -> Result<(), Error> {
    match values.iter().find(|v| !v.is_finite() || **v < 0.0) {
        Some(value) => Err(Error::DomainViolation(name.to_string(), *value)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_shape_mismatch() {
        let result = Spectrum::new(Array1::from(vec![1.0, 2.0]), Array1::from(vec![1.0]));
        assert_eq!(result, Err(Error::ShapeMismatch(2, 1)));
    }

    #[test]
    fn test_new_rejects_negative_values() {
        let result = Spectrum::from_peaks(&[(100.0, 1.0), (-1.0, 2.0)]);
        assert_eq!(
            result,
            Err(Error::DomainViolation("m/z".to_string(), -1.0))
        );

        let result = Spectrum::from_peaks(&[(100.0, -3.0)]);
        assert_eq!(
            result,
            Err(Error::DomainViolation("intensity".to_string(), -3.0))
        );

        assert!(Spectrum::from_peaks(&[(f64::NAN, 1.0)]).is_err());
    }

    #[test]
    fn test_sorted_by_mz_is_stable() {
        let spectrum =
            Spectrum::from_peaks(&[(200.0, 1.0), (100.0, 2.0), (200.0, 3.0), (50.0, 4.0)])
                .unwrap();
        assert!(!spectrum.is_sorted());

        let sorted = spectrum.sorted_by_mz();
        assert!(sorted.is_sorted());
        assert_eq!(
            sorted.peaks().collect::<Vec<_>>(),
            vec![(50.0, 4.0), (100.0, 2.0), (200.0, 1.0), (200.0, 3.0)]
        );
        // Input is left untouched
        assert_eq!(spectrum.mz()[0], 200.0);
    }
}
