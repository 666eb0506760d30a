#[derive(Debug, Clone, PartialEq)]
pub struct ScoringResult {
    pub score: f64,
    /// Peaks in the query after cleaning
    pub query_peaks: usize,
    /// Peaks in the reference after cleaning
    pub reference_peaks: usize,
    /// Aligned rows with an intensity in both spectra
    pub peaks_matched: usize,
}
