use crate::model_building::domain::{RepositoryConfiguration, Severity};

/// BuildModelRequest - Internal request DTO for the model build use case
#[derive(Debug, Clone, Default)]
pub struct BuildModelRequest {
    /// Open issues at or above this severity are severe
    pub severe_issue_threshold: Severity,
    /// Open rule violations at or above this severity are severe
    pub severe_rule_violation_threshold: Severity,
    /// The effective repository configuration, recorded in the model as a snapshot
    pub repository_configuration: RepositoryConfiguration,
}

impl BuildModelRequest {
    pub fn new(
        severe_issue_threshold: Severity,
        severe_rule_violation_threshold: Severity,
        repository_configuration: RepositoryConfiguration,
    ) -> Self {
        Self {
            severe_issue_threshold,
            severe_rule_violation_threshold,
            repository_configuration,
        }
    }
}
