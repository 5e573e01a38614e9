use super::analysis_result::{PackageCuration, RemoteArtifact, TextLocation, VcsInfo};
use super::identifier::Identifier;
use super::{CopyrightRef, IssueRef, LicenseRef, PackageRef, PathExcludeRef, PathRef, ScanResultRef, ScopeExcludeRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingKind {
    License,
    Copyright,
}

/// What a finding attributes: a license or a copyright statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingSubject {
    License(LicenseRef),
    Copyright(CopyrightRef),
}

/// One license or copyright attribution at one file location of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvaluatedFinding {
    pub subject: FindingSubject,
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub scan_result: ScanResultRef,
}

impl EvaluatedFinding {
    pub fn license(license: LicenseRef, location: &TextLocation, scan_result: ScanResultRef) -> Self {
        Self::at(FindingSubject::License(license), location, scan_result)
    }

    pub fn copyright(
        copyright: CopyrightRef,
        location: &TextLocation,
        scan_result: ScanResultRef,
    ) -> Self {
        Self::at(FindingSubject::Copyright(copyright), location, scan_result)
    }

    fn at(subject: FindingSubject, location: &TextLocation, scan_result: ScanResultRef) -> Self {
        Self {
            subject,
            path: location.path.clone(),
            start_line: location.start_line,
            end_line: location.end_line,
            scan_result,
        }
    }

    pub fn kind(&self) -> FindingKind {
        match self.subject {
            FindingSubject::License(_) => FindingKind::License,
            FindingSubject::Copyright(_) => FindingKind::Copyright,
        }
    }

    pub fn license_ref(&self) -> Option<LicenseRef> {
        match self.subject {
            FindingSubject::License(license) => Some(license),
            FindingSubject::Copyright(_) => None,
        }
    }
}

/// One root-to-node route by which a package is reached in a dependency tree.
///
/// `path` holds the identifiers from the project down to the package's parent,
/// so its length is the depth ("level") of the package on this route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvaluatedPackagePath {
    pub package: PackageRef,
    pub project: PackageRef,
    pub scope: String,
    pub path: Vec<Identifier>,
}

/// The immutable part of an evaluated package, fixed when it is interned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCore {
    pub id: Identifier,
    pub is_project: bool,
    pub definition_file_path: String,
    pub purl: String,
    pub declared_licenses: BTreeSet<String>,
    pub declared_licenses_processed: Vec<LicenseRef>,
    pub concluded_license: Option<String>,
    pub description: String,
    pub homepage_url: String,
    pub binary_artifact: RemoteArtifact,
    pub source_artifact: RemoteArtifact,
    pub vcs: VcsInfo,
    pub vcs_processed: VcsInfo,
    pub curations: Vec<PackageCuration>,
    pub is_excluded: bool,
    pub path_excludes: Vec<PathExcludeRef>,
    pub scope_excludes: Vec<ScopeExcludeRef>,
}

/// The parts of a package that keep growing while the model is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageAccumulator {
    pub paths: Vec<PathRef>,
    pub levels: BTreeSet<usize>,
    pub scan_results: Vec<ScanResultRef>,
    pub findings: Vec<EvaluatedFinding>,
    pub detected_licenses: BTreeSet<LicenseRef>,
    pub issues: Vec<IssueRef>,
}

impl PackageAccumulator {
    /// Projects are the roots of their own trees.
    pub fn for_project() -> Self {
        Self {
            levels: BTreeSet::from([0]),
            ..Self::default()
        }
    }

    pub fn add_path(&mut self, path: PathRef, level: usize) {
        push_distinct(&mut self.paths, path);
        self.levels.insert(level);
    }

    pub fn add_scan_result(&mut self, scan_result: ScanResultRef) {
        push_distinct(&mut self.scan_results, scan_result);
    }

    pub fn add_issues(&mut self, issues: impl IntoIterator<Item = IssueRef>) {
        for issue in issues {
            push_distinct(&mut self.issues, issue);
        }
    }

    pub fn add_findings(&mut self, findings: Vec<EvaluatedFinding>) {
        self.detected_licenses
            .extend(findings.iter().filter_map(EvaluatedFinding::license_ref));
        self.findings.extend(findings);
    }
}

pub(crate) fn push_distinct<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

impl PackageCore {
    pub fn finalize(self, accumulator: PackageAccumulator) -> EvaluatedPackage {
        EvaluatedPackage {
            id: self.id,
            is_project: self.is_project,
            definition_file_path: self.definition_file_path,
            purl: self.purl,
            declared_licenses: self.declared_licenses,
            declared_licenses_processed: self.declared_licenses_processed,
            detected_licenses: accumulator.detected_licenses,
            concluded_license: self.concluded_license,
            description: self.description,
            homepage_url: self.homepage_url,
            binary_artifact: self.binary_artifact,
            source_artifact: self.source_artifact,
            vcs: self.vcs,
            vcs_processed: self.vcs_processed,
            curations: self.curations,
            paths: accumulator.paths,
            levels: accumulator.levels,
            scan_results: accumulator.scan_results,
            findings: accumulator.findings,
            is_excluded: self.is_excluded,
            path_excludes: self.path_excludes,
            scope_excludes: self.scope_excludes,
            issues: accumulator.issues,
        }
    }
}

/// A project or dependency package as it appears in the finished model.
///
/// Exactly one instance exists per [`Identifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedPackage {
    pub id: Identifier,
    pub is_project: bool,
    pub definition_file_path: String,
    pub purl: String,
    pub declared_licenses: BTreeSet<String>,
    pub declared_licenses_processed: Vec<LicenseRef>,
    pub detected_licenses: BTreeSet<LicenseRef>,
    pub concluded_license: Option<String>,
    pub description: String,
    pub homepage_url: String,
    pub binary_artifact: RemoteArtifact,
    pub source_artifact: RemoteArtifact,
    pub vcs: VcsInfo,
    pub vcs_processed: VcsInfo,
    pub curations: Vec<PackageCuration>,
    pub paths: Vec<PathRef>,
    pub levels: BTreeSet<usize>,
    pub scan_results: Vec<ScanResultRef>,
    pub findings: Vec<EvaluatedFinding>,
    pub is_excluded: bool,
    pub path_excludes: Vec<PathExcludeRef>,
    pub scope_excludes: Vec<ScopeExcludeRef>,
    pub issues: Vec<IssueRef>,
}
