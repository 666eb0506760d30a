/// Peak matching between two spectra
pub mod alignment;
pub mod centroiding;
/// Centroiding, noise removal and normalization
pub mod cleaning;
pub mod configuration;
pub mod entropy;
pub mod error;
/// Weighting, cleaning, alignment and scoring in one place
pub mod scorer;
pub mod scoring_result;
/// Cosine and entropy based similarity measures
pub mod similarity;
pub mod spectrum;
// Various utilities
pub mod utils;
pub mod weighting;
