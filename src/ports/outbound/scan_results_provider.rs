use crate::model_building::domain::{AnalysisResult, Identifier, ScanResult};

/// ScanResultsProvider port for looking up the raw scans of a project or package
///
/// Implementations must return the same results for the same id on every call;
/// the model builder asks once per id.
pub trait ScanResultsProvider {
    /// Returns every scan result recorded for `id`, in recording order
    ///
    /// # Arguments
    /// * `id` - Identifier of the project or package
    ///
    /// # Returns
    /// The scan results for `id`, or an empty slice if it was never scanned
    fn scan_results_for(&self, id: &Identifier) -> &[ScanResult];
}

impl ScanResultsProvider for AnalysisResult {
    fn scan_results_for(&self, id: &Identifier) -> &[ScanResult] {
        self.scan_results
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl<T: ScanResultsProvider + ?Sized> ScanResultsProvider for &T {
    fn scan_results_for(&self, id: &Identifier) -> &[ScanResult] {
        (**self).scan_results_for(id)
    }
}
