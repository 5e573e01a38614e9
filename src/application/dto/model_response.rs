use crate::model_building::domain::EvaluatedModel;

/// ModelResponse - Internal response DTO from the model build use case
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub model: EvaluatedModel,
    /// Whether any open issue or rule violation reaches its severe threshold.
    /// Used to determine the exit code for CI integration
    pub has_severe_findings: bool,
}

impl ModelResponse {
    pub fn new(model: EvaluatedModel) -> Self {
        let has_severe_findings = model.has_severe_findings();
        Self {
            model,
            has_severe_findings,
        }
    }
}
