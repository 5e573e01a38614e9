//! Simple collaborators and fixtures for the service unit tests.

use crate::model_building::domain::{
    CopyrightFinding, Identifier, IssueResolution, LicenseFinding, OrtIssue, PathExclude,
    PathExcludeReason, Project, RuleViolation, RuleViolationResolution, ScanResult, ScanSummary,
    Scope, ScopeExclude, ScopeExcludeReason, Severity, TextLocation, Provenance, ScannerDetails,
};
use crate::ports::outbound::{
    CopyrightGroup, ExcludesProvider, FindingsGroup, FindingsMatcher, ResolutionProvider,
};
use std::collections::BTreeSet;

pub(crate) fn id(s: &str) -> Identifier {
    s.parse().unwrap()
}

pub(crate) fn issue(message: &str) -> OrtIssue {
    OrtIssue {
        timestamp: "2024-01-01T00:00:00Z".parse().unwrap(),
        source: "Analyzer".to_string(),
        message: message.to_string(),
        severity: Severity::Error,
    }
}

pub(crate) fn scan_result(licenses: &[(&str, &str)], issues: Vec<OrtIssue>) -> ScanResult {
    let time = "2024-01-01T00:00:00Z".parse().unwrap();
    ScanResult {
        provenance: Provenance::Unknown,
        scanner: ScannerDetails {
            name: "ScanCode".to_string(),
            version: "32.0.0".to_string(),
            configuration: String::new(),
        },
        summary: ScanSummary {
            start_time: time,
            end_time: time,
            file_count: licenses.len() as u64,
            package_verification_code: "0000".to_string(),
            license_findings: licenses
                .iter()
                .map(|(license, path)| LicenseFinding {
                    license: license.to_string(),
                    location: TextLocation::new(path, 1, 1),
                })
                .collect(),
            copyright_findings: vec![],
            issues,
        },
    }
}

pub(crate) fn project(project_id: &str, scopes: Vec<Scope>) -> Project {
    let mut project = Project::new(id(project_id), "package.json");
    project.scopes = scopes;
    project
}

/// Groups license findings by license without any copyright matching.
pub(crate) struct LicenseOnlyMatcher;

impl FindingsMatcher for LicenseOnlyMatcher {
    fn match_findings(
        &self,
        license_findings: &[LicenseFinding],
        copyright_findings: &[CopyrightFinding],
    ) -> Vec<FindingsGroup> {
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

pub(crate) struct NoResolutions;

impl ResolutionProvider for NoResolutions {
    fn issue_resolutions_for(&self, _issue: &OrtIssue) -> Vec<IssueResolution> {
        vec![]
    }

    fn rule_violation_resolutions_for(
        &self,
        _violation: &RuleViolation,
    ) -> Vec<RuleViolationResolution> {
        vec![]
    }
}

/// Excludes by exact definition file path and exact scope name.
#[derive(Default)]
pub(crate) struct FixedExcludes {
    pub definition_files: Vec<String>,
    pub scopes: Vec<String>,
    pub excluded_ids: BTreeSet<Identifier>,
}

impl ExcludesProvider for FixedExcludes {
    fn path_excludes_for(&self, project: &Project) -> Vec<PathExclude> {
        self.definition_files
            .iter()
            .filter(|file| **file == project.definition_file_path)
            .map(|file| PathExclude {
                pattern: file.clone(),
                reason: PathExcludeReason::TestOf,
                comment: String::new(),
            })
            .collect()
    }

    fn scope_excludes_for(&self, scope: &Scope) -> Vec<ScopeExclude> {
        self.scopes
            .iter()
            .filter(|name| **name == scope.name)
            .map(|name| ScopeExclude {
                pattern: name.clone(),
                reason: ScopeExcludeReason::TestDependencyOf,
                comment: String::new(),
            })
            .collect()
    }

    fn is_excluded(&self, id: &Identifier) -> bool {
        self.excluded_ids.contains(id)
    }
}
