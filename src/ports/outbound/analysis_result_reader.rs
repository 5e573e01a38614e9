use crate::model_building::domain::AnalysisResult;
use crate::shared::Result;
use std::path::Path;

/// AnalysisResultReader port for loading the combined analysis output
pub trait AnalysisResultReader {
    /// Reads and parses an analysis result file
    ///
    /// # Arguments
    /// * `path` - Path to a JSON or YAML analysis result
    ///
    /// # Returns
    /// The parsed analysis result
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or is not a regular file
    /// - The file exceeds the maximum allowed size
    /// - The content is not a valid analysis result
    fn read_analysis_result(&self, path: &Path) -> Result<AnalysisResult>;
}
