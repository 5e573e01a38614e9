use evaluated_model::model_building::domain::{
    CopyrightFinding, IssueResolution, IssueResolutionReason, LicenseFinding, OrtIssue,
    PathExclude, Project, RuleViolation, RuleViolationResolution, Scope, ScopeExclude,
    ScopeExcludeReason, Statistics,
};
use evaluated_model::ports::outbound::{CopyrightGroup, FindingsGroup};
use evaluated_model::prelude::*;
use std::cell::Cell;
use std::collections::BTreeSet;

/// Mock FindingsMatcher grouping license findings by license and attaching
/// every copyright to every group. Counts its calls.
#[derive(Default)]
pub struct MockFindingsMatcher {
    pub calls: Cell<usize>,
}

impl MockFindingsMatcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FindingsMatcher for MockFindingsMatcher {
    fn match_findings(
        &self,
        license_findings: &[LicenseFinding],
        copyright_findings: &[CopyrightFinding],
    ) -> Vec<FindingsGroup> {
        self.calls.set(self.calls.get() + 1);

        let mut groups: Vec<FindingsGroup> = Vec::new();
        for finding in license_findings {
            match groups.iter_mut().find(|g| g.license == finding.license) {
                Some(group) => group.locations.push(finding.location.clone()),
                None => groups.push(FindingsGroup {
                    license: finding.license.clone(),
                    locations: vec![finding.location.clone()],
                    copyrights: copyright_findings
                        .iter()
                        .map(|c| CopyrightGroup {
                            statement: c.statement.clone(),
                            locations: vec![c.location.clone()],
                        })
                        .collect(),
                }),
            }
        }
        groups
    }
}

/// Mock ResolutionProvider resolving issues whose message is in a fixed set
#[derive(Default)]
pub struct MockResolutionProvider {
    resolved_messages: BTreeSet<String>,
}

impl MockResolutionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolving(mut self, message: &str) -> Self {
        self.resolved_messages.insert(message.to_string());
        self
    }
}

impl ResolutionProvider for MockResolutionProvider {
    fn issue_resolutions_for(&self, issue: &OrtIssue) -> Vec<IssueResolution> {
        if self.resolved_messages.contains(&issue.message) {
            vec![IssueResolution {
                message: issue.message.clone(),
                reason: IssueResolutionReason::CantFixIssue,
                comment: "resolved in test".to_string(),
            }]
        } else {
            vec![]
        }
    }

    fn rule_violation_resolutions_for(
        &self,
        _violation: &RuleViolation,
    ) -> Vec<RuleViolationResolution> {
        vec![]
    }
}

/// Mock ExcludesProvider excluding scopes by exact name and nothing else
#[derive(Default)]
pub struct MockExcludesProvider {
    excluded_scopes: BTreeSet<String>,
}

impl MockExcludesProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn excluding_scope(mut self, name: &str) -> Self {
        self.excluded_scopes.insert(name.to_string());
        self
    }
}

impl ExcludesProvider for MockExcludesProvider {
    fn path_excludes_for(&self, _project: &Project) -> Vec<PathExclude> {
        vec![]
    }

    fn scope_excludes_for(&self, scope: &Scope) -> Vec<ScopeExclude> {
        if self.excluded_scopes.contains(&scope.name) {
            vec![ScopeExclude {
                pattern: scope.name.clone(),
                reason: ScopeExcludeReason::TestDependencyOf,
                comment: String::new(),
            }]
        } else {
            vec![]
        }
    }

    fn is_excluded(&self, _id: &Identifier) -> bool {
        false
    }
}

/// Mock StatisticsProvider returning fixed statistics
#[derive(Default)]
pub struct MockStatisticsProvider {
    pub statistics: Statistics,
}

impl MockStatisticsProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatisticsProvider for MockStatisticsProvider {
    fn statistics_for(
        &self,
        _analysis: &AnalysisResult,
        _resolutions: &dyn ResolutionProvider,
    ) -> Statistics {
        self.statistics.clone()
    }
}
