use super::analysis_result::Severity;
use super::dependency_tree::DependencyTreeNode;
use super::identifier::Identifier;
use super::issue::{EvaluatedIssue, EvaluatedRuleViolation};
use super::license::{Copyright, License};
use super::package::{EvaluatedPackage, EvaluatedPackagePath};
use super::repository_config::{IssueResolution, PathExclude, RuleViolationResolution, ScopeExclude};
use super::scan_result::EvaluatedScanResult;
use super::statistics::Statistics;
use super::{CopyrightRef, IssueRef, LicenseRef, PackageRef, PathRef, ScanResultRef};
use std::collections::BTreeMap;

/// The evaluated model: every distinct entity exactly once, cross-referenced by
/// [`Handle`](super::Handle)s into the lists below.
///
/// A handle of type `Handle<T>` indexes the list holding `T`s, e.g. a
/// [`PackageRef`] indexes `packages`.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedModel {
    pub path_excludes: Vec<PathExclude>,
    pub scope_excludes: Vec<ScopeExclude>,
    pub issue_resolutions: Vec<IssueResolution>,
    pub rule_violation_resolutions: Vec<RuleViolationResolution>,
    pub copyrights: Vec<Copyright>,
    pub licenses: Vec<License>,
    pub scan_results: Vec<EvaluatedScanResult>,
    pub packages: Vec<EvaluatedPackage>,
    pub paths: Vec<EvaluatedPackagePath>,
    pub issues: Vec<EvaluatedIssue>,
    pub dependency_trees: Vec<DependencyTreeNode>,
    pub rule_violations: Vec<EvaluatedRuleViolation>,
    /// Number of distinct packages declaring each license, sorted by license id.
    pub declared_license_stats: BTreeMap<String, usize>,
    /// Number of distinct packages with findings of each license, sorted by license id.
    pub detected_license_stats: BTreeMap<String, usize>,
    pub statistics: Statistics,
    pub severe_issue_threshold: Severity,
    pub severe_rule_violation_threshold: Severity,
    pub repository_configuration: String,
    pub labels: BTreeMap<String, String>,
    pub custom_data: BTreeMap<String, serde_json::Value>,
}

impl EvaluatedModel {
    pub fn package(&self, handle: PackageRef) -> &EvaluatedPackage {
        &self.packages[handle.index()]
    }

    pub fn license(&self, handle: LicenseRef) -> &License {
        &self.licenses[handle.index()]
    }

    pub fn copyright(&self, handle: CopyrightRef) -> &Copyright {
        &self.copyrights[handle.index()]
    }

    pub fn scan_result(&self, handle: ScanResultRef) -> &EvaluatedScanResult {
        &self.scan_results[handle.index()]
    }

    pub fn issue(&self, handle: IssueRef) -> &EvaluatedIssue {
        &self.issues[handle.index()]
    }

    pub fn path(&self, handle: PathRef) -> &EvaluatedPackagePath {
        &self.paths[handle.index()]
    }

    pub fn find_package(&self, id: &Identifier) -> Option<&EvaluatedPackage> {
        self.packages.iter().find(|package| &package.id == id)
    }

    pub fn projects(&self) -> impl Iterator<Item = &EvaluatedPackage> {
        self.packages.iter().filter(|package| package.is_project)
    }

    /// Issues without a matching resolution.
    pub fn open_issues(&self) -> impl Iterator<Item = &EvaluatedIssue> {
        self.issues.iter().filter(|issue| !issue.is_resolved())
    }

    pub fn open_rule_violations(&self) -> impl Iterator<Item = &EvaluatedRuleViolation> {
        self.rule_violations
            .iter()
            .filter(|violation| !violation.is_resolved())
    }

    /// Whether any open issue or rule violation reaches its severe threshold.
    pub fn has_severe_findings(&self) -> bool {
        self.open_issues()
            .any(|issue| issue.severity >= self.severe_issue_threshold)
            || self
                .open_rule_violations()
                .any(|violation| violation.severity >= self.severe_rule_violation_threshold)
    }
}
