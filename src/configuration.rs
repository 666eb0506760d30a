use crate::{
    error::Error,
    utils::{
        validate_entropy_order, validate_entropy_threshold, validate_noise_removal,
        validate_tolerance,
    },
};

/// Similarity measure used to compare two aligned spectra.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimilarityMeasure {
    Cosine,
    Shannon,
    /// Rényi entropy similarity with the given entropy order `q`
    Renyi(f64),
    /// Tsallis entropy similarity with the given entropy order `q`
    Tsallis(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// Exponent for the m/z in the weight factor transformation
    pub weight_factor_mz: f64,
    /// Exponent for the intensity in the weight factor transformation
    pub weight_factor_intensity: f64,
    /// Entropy threshold for the entropy based intensity weighting, `None` disables it
    pub entropy_threshold: Option<f64>,
    /// Peaks below `max_intensity * noise_removal` are removed, `None` disables it
    pub noise_removal: Option<f64>,
    /// Tolerance (Da) for centroiding and peak matching
    pub tolerance: f64,
    pub measure: SimilarityMeasure,
}

impl Configuration {
    pub fn new(
        weight_factor_mz: f64,
        weight_factor_intensity: f64,
        entropy_threshold: Option<f64>,
        noise_removal: Option<f64>,
        tolerance: f64,
        measure: SimilarityMeasure,
    ) -> Self {
        Self {
            weight_factor_mz,
            weight_factor_intensity,
            entropy_threshold,
            noise_removal,
            tolerance,
            measure,
        }
    }

    /// Checks all parameters for their valid ranges.
    /// An entropy order of 1 is allowed, the generalized measures fall back to Shannon.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("weight factor m/z", self.weight_factor_mz),
            ("weight factor intensity", self.weight_factor_intensity),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidParameter(name.to_string(), value));
            }
        }

        if let Some(threshold) = self.entropy_threshold {
            validate_entropy_threshold(threshold)?;
        }

        if let Some(noise_removal) = self.noise_removal {
            validate_noise_removal(noise_removal)?;
        }

        validate_tolerance(self.tolerance)?;

        match self.measure {
            SimilarityMeasure::Renyi(q) | SimilarityMeasure::Tsallis(q) => {
                validate_entropy_order(q)
            }
            SimilarityMeasure::Cosine | SimilarityMeasure::Shannon => Ok(()),
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new(0.0, 1.0, None, Some(0.01), 0.05, SimilarityMeasure::Shannon)
    }
}
