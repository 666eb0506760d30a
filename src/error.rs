use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),
    #[error("Entropy order q = {0} is singular, q must differ from 1")]
    SingularParameter(f64),
    #[error("Vectors must have the same length, got {0} and {1}")]
    ShapeMismatch(usize, usize),
    #[error("Invalid {0}: {1} (must be finite and non-negative)")]
    DomainViolation(String, f64),
    #[error("Invalid parameter {0}: {1}")]
    InvalidParameter(String, f64),
    #[error("Spectrum must be sorted by m/z")]
    UnsortedSpectrum,
}
