use crate::model_building::domain::{AnalysisResult, Statistics};
use crate::ports::outbound::ResolutionProvider;

/// StatisticsProvider port for computing the aggregate numbers stored in the model
///
/// The result is opaque to the model builder and copied through unchanged.
pub trait StatisticsProvider {
    /// Computes statistics over the complete analysis result
    ///
    /// # Arguments
    /// * `analysis` - The analysis result the model is built from
    /// * `resolutions` - Used to tell open issues and violations from resolved ones
    fn statistics_for(
        &self,
        analysis: &AnalysisResult,
        resolutions: &dyn ResolutionProvider,
    ) -> Statistics;
}
