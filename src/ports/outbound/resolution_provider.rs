use crate::model_building::domain::{
    IssueResolution, OrtIssue, RuleViolation, RuleViolationResolution,
};

/// ResolutionProvider port for finding the rules that dismiss an issue or violation
pub trait ResolutionProvider {
    /// Returns every issue resolution that applies to `issue`
    fn issue_resolutions_for(&self, issue: &OrtIssue) -> Vec<IssueResolution>;

    /// Returns every rule violation resolution that applies to `violation`
    fn rule_violation_resolutions_for(
        &self,
        violation: &RuleViolation,
    ) -> Vec<RuleViolationResolution>;

    /// Whether at least one resolution applies to `issue`
    fn is_issue_resolved(&self, issue: &OrtIssue) -> bool {
        !self.issue_resolutions_for(issue).is_empty()
    }

    /// Whether at least one resolution applies to `violation`
    fn is_rule_violation_resolved(&self, violation: &RuleViolation) -> bool {
        !self.rule_violation_resolutions_for(violation).is_empty()
    }
}

impl<T: ResolutionProvider + ?Sized> ResolutionProvider for &T {
    fn issue_resolutions_for(&self, issue: &OrtIssue) -> Vec<IssueResolution> {
        (**self).issue_resolutions_for(issue)
    }

    fn rule_violation_resolutions_for(
        &self,
        violation: &RuleViolation,
    ) -> Vec<RuleViolationResolution> {
        (**self).rule_violation_resolutions_for(violation)
    }
}
