use tracing::instrument;

use crate::{
    alignment::align_spectra,
    cleaning::clean_spectrum,
    configuration::Configuration,
    error::Error,
    scoring_result::ScoringResult,
    spectrum::Spectrum,
    weighting::{entropy_weight, weight_factor_transform},
};

/// Scores a query spectrum against any number of reference spectra.
///
/// The query is weighted and cleaned once on creation. The scorer holds no mutable
/// state, so a single instance can be shared between threads, e.g. to search a library in parallel.
pub struct SimilarityScorer<'a> {
    config: &'a Configuration,
    prepared_query: Spectrum,
}

impl SimilarityScorer<'_> {
    /// Creates a new SimilarityScorer instance.
    ///
    /// Arguments:
    /// * `config` - The configuration to use for scoring.
    /// * `query` - The raw query spectrum.
    ///
    pub fn new<'a>(
        config: &'a Configuration,
        query: &Spectrum,
    ) -> Result<SimilarityScorer<'a>, Error> {
        config.validate()?;
        let prepared_query = Self::prepare_spectrum(config, query)?;

        Ok(SimilarityScorer {
            config,
            prepared_query,
        })
    }

    /// Applies the weighting and cleaning steps of the configuration to a raw spectrum:
    /// 1. weight factor transformation
    /// 2. entropy based intensity weighting, if an entropy threshold is configured
    /// 3. centroiding, noise removal and normalization
    ///
    /// # Arguments
    /// * `config` - Configuration
    /// * `spectrum` - Raw spectrum
    ///
    #[instrument(skip_all, level = "trace")]
    pub fn prepare_spectrum(config: &Configuration, spectrum: &Spectrum) -> Result<Spectrum, Error> {
        let mut prepared = weight_factor_transform(
            spectrum,
            config.weight_factor_mz,
            config.weight_factor_intensity,
        )?;

        if let Some(threshold) = config.entropy_threshold {
            let weighted = entropy_weight(prepared.intensities(), threshold)?;
            prepared = prepared.with_intensities(weighted)?;
        }

        clean_spectrum(&prepared, config.noise_removal, config.tolerance)
    }

    /// Aligns two prepared spectra and scores them with the configured measure.
    ///
    /// # Arguments
    /// * `config` - Configuration
    /// * `prepared_query` - Query spectrum, output of [`Self::prepare_spectrum`]
    /// * `prepared_reference` - Reference spectrum, output of [`Self::prepare_spectrum`]
    ///
    pub fn score_prepared(
        config: &Configuration,
        prepared_query: &Spectrum,
        prepared_reference: &Spectrum,
    ) -> Result<ScoringResult, Error> {
        let aligned = align_spectra(prepared_query, prepared_reference, config.tolerance)?;
        let score = config
            .measure
            .similarity(aligned.intensities_a(), aligned.intensities_b())?;

        Ok(ScoringResult {
            score,
            query_peaks: prepared_query.len(),
            reference_peaks: prepared_reference.len(),
            peaks_matched: aligned.matched_peaks(),
        })
    }

    pub fn prepared_query(&self) -> &Spectrum {
        &self.prepared_query
    }

    /// Calculates the similarity between the query and a raw reference spectrum.
    ///
    /// # Arguments
    /// * `reference` - The raw reference spectrum to score.
    ///
    #[instrument(skip_all, level = "trace")]
    pub fn score(&self, reference: &Spectrum) -> Result<ScoringResult, Error> {
        let prepared_reference = Self::prepare_spectrum(self.config, reference)?;
        Self::score_prepared(self.config, &self.prepared_query, &prepared_reference)
    }
}

/// Similarity of two raw spectra, running the whole pipeline once.
///
/// # Arguments
/// * `spectrum_a` - First raw spectrum
/// * `spectrum_b` - Second raw spectrum
/// * `config` - Configuration
///
pub fn spectral_similarity(
    spectrum_a: &Spectrum,
    spectrum_b: &Spectrum,
    config: &Configuration,
) -> Result<f64, Error> {
    Ok(SimilarityScorer::new(config, spectrum_a)?
        .score(spectrum_b)?
        .score)
}

#[cfg(test)]
mod tests {
    use rayon::prelude::*;

    use super::*;
    use crate::{
        configuration::SimilarityMeasure,
        utils::tests::{assert_close, reference_spectrum, spectrum},
    };

    fn all_measures() -> Vec<SimilarityMeasure> {
        vec![
            SimilarityMeasure::Cosine,
            SimilarityMeasure::Shannon,
            SimilarityMeasure::Renyi(0.25),
            SimilarityMeasure::Renyi(1.0),
            SimilarityMeasure::Renyi(2.0),
            SimilarityMeasure::Tsallis(0.5),
            SimilarityMeasure::Tsallis(1.0),
            SimilarityMeasure::Tsallis(3.0),
        ]
    }

    fn query_spectrum() -> Spectrum {
        spectrum(&[
            (69.04, 5.0),
            (86.097, 90.0),
            (86.099, 10.0),
            (120.08, 60.0),
            (150.5, 20.0),
            (244.17, 15.0),
            (244.171, 2.0),
            (301.19, 0.1),
        ])
    }

    #[test]
    fn test_identical_spectra_score_one() {
        let raw = query_spectrum();
        for measure in all_measures() {
            let config = Configuration {
                measure,
                ..Configuration::default()
            };
            let result = SimilarityScorer::new(&config, &raw)
                .unwrap()
                .score(&raw)
                .unwrap();
            assert_close(result.score, 1.0, 1e-9);
            assert_eq!(result.query_peaks, result.reference_peaks);
            assert_eq!(result.peaks_matched, result.query_peaks);
        }
    }

    #[test]
    fn test_identical_spectra_with_weighting_score_one() {
        let raw = reference_spectrum();
        let config = Configuration::new(
            1.0,
            0.5,
            Some(3.0),
            Some(0.01),
            0.05,
            SimilarityMeasure::Tsallis(2.0),
        );
        assert_close(spectral_similarity(&raw, &raw, &config).unwrap(), 1.0, 1e-9);
    }

    #[test]
    fn test_prepare_spectrum() {
        let config = Configuration::default();
        let prepared = SimilarityScorer::prepare_spectrum(&config, &query_spectrum()).unwrap();

        // 86.097/86.099 and 244.17/244.171 are merged, 301.19 is noise
        assert_eq!(prepared.len(), 5);
        assert!(prepared.is_sorted());
        assert_close(prepared.intensities().sum(), 1.0, 1e-12);
    }

    #[test]
    fn test_score_is_symmetric() {
        let query = query_spectrum();
        let reference = reference_spectrum();
        for measure in all_measures() {
            let config = Configuration {
                measure,
                ..Configuration::default()
            };
            let forward = spectral_similarity(&query, &reference, &config).unwrap();
            let backward = spectral_similarity(&reference, &query, &config).unwrap();
            assert_close(forward, backward, 1e-9);
        }
    }

    #[test]
    fn test_shannon_score_between_zero_and_one() {
        let config = Configuration::default();
        let result = SimilarityScorer::new(&config, &query_spectrum())
            .unwrap()
            .score(&reference_spectrum())
            .unwrap();

        assert!(result.score > 0.0 && result.score < 1.0);
        assert!(result.peaks_matched > 0);
        assert!(result.peaks_matched <= result.query_peaks.min(result.reference_peaks));
    }

    #[test]
    fn test_degenerate_spectra_fail() {
        let config = Configuration::default();
        assert!(matches!(
            SimilarityScorer::new(&config, &spectrum(&[])),
            Err(Error::DegenerateInput(_))
        ));

        let scorer = SimilarityScorer::new(&config, &query_spectrum()).unwrap();
        assert!(matches!(
            scorer.score(&spectrum(&[(100.0, 0.0)])),
            Err(Error::DegenerateInput(_))
        ));

        let config = Configuration {
            entropy_threshold: Some(3.0),
            ..Configuration::default()
        };
        assert!(SimilarityScorer::new(&config, &spectrum(&[(100.0, 0.0)])).is_err());
    }

    #[test]
    fn test_invalid_configuration_fails() {
        let config = Configuration {
            measure: SimilarityMeasure::Renyi(-1.0),
            ..Configuration::default()
        };
        assert!(matches!(
            SimilarityScorer::new(&config, &query_spectrum()),
            Err(Error::InvalidParameter(_, _))
        ));
    }

    #[test]
    fn test_parallel_library_search() {
        let config = Configuration::default();
        let scorer = SimilarityScorer::new(&config, &query_spectrum()).unwrap();

        let library: Vec<Spectrum> = (0..64)
            .map(|idx| {
                let shift = idx as f64 * 0.5;
                spectrum(&[
                    (69.04 + shift, 5.0),
                    (86.098 + shift, 100.0),
                    (120.08 + shift, 60.0),
                    (244.17 + shift, 17.0),
                ])
            })
            .collect();

        let parallel_scores: Vec<f64> = library
            .par_iter()
            .map(|reference| scorer.score(reference).unwrap().score)
            .collect();
        let sequential_scores: Vec<f64> = library
            .iter()
            .map(|reference| scorer.score(reference).unwrap().score)
            .collect();

        assert_eq!(parallel_scores, sequential_scores);
        // Unshifted reference is the best match
        let best = parallel_scores
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| idx)
            .unwrap();
        assert_eq!(best, 0);
    }
}
