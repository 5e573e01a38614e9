use crate::model_building::domain::{
    IssueResolution, OrtIssue, Resolutions, RuleViolation, RuleViolationResolution,
};
use crate::ports::outbound::ResolutionProvider;
use crate::shared::error::ModelError;
use crate::shared::Result;
use regex::Regex;

/// Compiles a resolution message pattern so that it must match the whole message.
fn compile(kind: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(&format!("(?s)^(?:{})$", pattern)).map_err(|e| {
        ModelError::InvalidPattern {
            kind,
            pattern: pattern.to_string(),
            details: e.to_string(),
        }
        .into()
    })
}

/// RegexResolutionProvider adapter matching resolutions by message pattern
///
/// A resolution applies when its `message` regex matches the entire message of
/// the issue or rule violation.
pub struct RegexResolutionProvider {
    issues: Vec<(Regex, IssueResolution)>,
    rule_violations: Vec<(Regex, RuleViolationResolution)>,
}

impl RegexResolutionProvider {
    /// Compiles all resolution patterns up front
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidPattern`] for the first pattern that is not a valid regex
    pub fn new(resolutions: &Resolutions) -> Result<Self> {
        let issues = resolutions
            .issues
            .iter()
            .map(|resolution| Ok((compile("issue resolution", &resolution.message)?, resolution.clone())))
            .collect::<Result<Vec<_>>>()?;
        let rule_violations = resolutions
            .rule_violations
            .iter()
            .map(|resolution| {
                Ok((
                    compile("rule violation resolution", &resolution.message)?,
                    resolution.clone(),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            issue_resolutions = issues.len(),
            rule_violation_resolutions = rule_violations.len(),
            "compiled resolution patterns"
        );

        Ok(Self {
            issues,
            rule_violations,
        })
    }
}

impl ResolutionProvider for RegexResolutionProvider {
    fn issue_resolutions_for(&self, issue: &OrtIssue) -> Vec<IssueResolution> {
        self.issues
            .iter()
            .filter(|(regex, _)| regex.is_match(&issue.message))
            .map(|(_, resolution)| resolution.clone())
            .collect()
    }

    fn rule_violation_resolutions_for(
        &self,
        violation: &RuleViolation,
    ) -> Vec<RuleViolationResolution> {
        self.rule_violations
            .iter()
            .filter(|(regex, _)| regex.is_match(&violation.message))
            .map(|(_, resolution)| resolution.clone())
            .collect()
    }
}
