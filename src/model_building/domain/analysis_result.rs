//! Raw results of the analyzer, scanner and evaluator stages.
//!
//! This is the input side of model building. The types mirror what the
//! upstream stages produce and are deserialized as-is; nothing here is
//! interned or cross-referenced yet.

use super::identifier::Identifier;
use super::repository_config::RepositoryConfiguration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Hint,
    Warning,
    #[default]
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Hint => "HINT",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HINT" => Ok(Severity::Hint),
            "WARNING" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            _ => Err(format!(
                "Invalid severity: {}. Please specify 'hint', 'warning' or 'error'",
                s
            )),
        }
    }
}

/// An issue reported by one of the analysis stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrtIssue {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteArtifact {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VcsInfo {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub revision: String,
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageLinkage {
    #[default]
    Dynamic,
    Static,
    ProjectDynamic,
    ProjectStatic,
}

/// One edge of a scope's dependency tree, with the issues found while resolving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReference {
    pub id: Identifier,
    #[serde(default)]
    pub linkage: PackageLinkage,
    #[serde(default)]
    pub dependencies: Vec<PackageReference>,
    #[serde(default)]
    pub issues: Vec<OrtIssue>,
}

impl PackageReference {
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            linkage: PackageLinkage::default(),
            dependencies: Vec::new(),
            issues: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, dependency: PackageReference) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn with_issue(mut self, issue: OrtIssue) -> Self {
        self.issues.push(issue);
        self
    }

    /// Whether `id` is this reference or appears anywhere below it.
    pub fn contains(&self, id: &Identifier) -> bool {
        &self.id == id || self.dependencies.iter().any(|dep| dep.contains(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub name: String,
    #[serde(default)]
    pub dependencies: Vec<PackageReference>,
}

impl Scope {
    pub fn new(name: &str, dependencies: Vec<PackageReference>) -> Self {
        Self {
            name: name.to_string(),
            dependencies,
        }
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.dependencies.iter().any(|dep| dep.contains(id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Identifier,
    pub definition_file_path: String,
    #[serde(default)]
    pub declared_licenses: BTreeSet<String>,
    /// Declared licenses after normalization to license ids.
    #[serde(default)]
    pub declared_licenses_processed: BTreeSet<String>,
    #[serde(default)]
    pub homepage_url: String,
    #[serde(default)]
    pub vcs: VcsInfo,
    #[serde(default)]
    pub vcs_processed: VcsInfo,
    #[serde(default)]
    pub scopes: Vec<Scope>,
}

impl Project {
    pub fn new(id: Identifier, definition_file_path: &str) -> Self {
        Self {
            id,
            definition_file_path: definition_file_path.to_string(),
            declared_licenses: BTreeSet::new(),
            declared_licenses_processed: BTreeSet::new(),
            homepage_url: String::new(),
            vcs: VcsInfo::default(),
            vcs_processed: VcsInfo::default(),
            scopes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: Identifier,
    #[serde(default)]
    pub purl: String,
    #[serde(default)]
    pub declared_licenses: BTreeSet<String>,
    #[serde(default)]
    pub declared_licenses_processed: BTreeSet<String>,
    #[serde(default)]
    pub concluded_license: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub homepage_url: String,
    #[serde(default)]
    pub binary_artifact: RemoteArtifact,
    #[serde(default)]
    pub source_artifact: RemoteArtifact,
    #[serde(default)]
    pub vcs: VcsInfo,
    #[serde(default)]
    pub vcs_processed: VcsInfo,
}

impl Package {
    pub fn new(id: Identifier) -> Self {
        Self {
            id,
            purl: String::new(),
            declared_licenses: BTreeSet::new(),
            declared_licenses_processed: BTreeSet::new(),
            concluded_license: None,
            description: String::new(),
            homepage_url: String::new(),
            binary_artifact: RemoteArtifact::default(),
            source_artifact: RemoteArtifact::default(),
            vcs: VcsInfo::default(),
            vcs_processed: VcsInfo::default(),
        }
    }
}

/// One applied curation: who changed which metadata fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageCuration {
    pub provider: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub changed_fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedPackage {
    #[serde(flatten)]
    pub package: Package,
    #[serde(default)]
    pub curations: Vec<PackageCuration>,
}

impl CuratedPackage {
    pub fn new(package: Package) -> Self {
        Self {
            package,
            curations: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextLocation {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
}

impl TextLocation {
    pub fn new(path: &str, start_line: u32, end_line: u32) -> Self {
        Self {
            path: path.to_string(),
            start_line,
            end_line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseFinding {
    pub license: String,
    pub location: TextLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyrightFinding {
    pub statement: String,
    pub location: TextLocation,
}

/// Where the scanned source code came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Provenance {
    Artifact {
        source_artifact: RemoteArtifact,
    },
    Repository {
        vcs_info: VcsInfo,
        resolved_revision: String,
    },
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScannerDetails {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub configuration: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub file_count: u64,
    #[serde(default)]
    pub package_verification_code: String,
    #[serde(default)]
    pub license_findings: Vec<LicenseFinding>,
    #[serde(default)]
    pub copyright_findings: Vec<CopyrightFinding>,
    #[serde(default)]
    pub issues: Vec<OrtIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub provenance: Provenance,
    pub scanner: ScannerDetails,
    pub summary: ScanSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseSource {
    Declared,
    Detected,
    Concluded,
}

/// A policy breach reported by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleViolation {
    pub rule: String,
    pub pkg: Identifier,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub license_source: Option<LicenseSource>,
    #[serde(default)]
    pub severity: Severity,
    pub message: String,
    #[serde(default)]
    pub how_to_fix: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    #[serde(default)]
    pub vcs: VcsInfo,
    #[serde(default)]
    pub config: RepositoryConfiguration,
}

/// The combined output of all analysis stages for one repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub repository: RepositoryInfo,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub packages: Vec<CuratedPackage>,
    /// Analyzer issues keyed by the project or package they were raised for.
    #[serde(default)]
    pub issues: BTreeMap<Identifier, Vec<OrtIssue>>,
    #[serde(default)]
    pub scan_results: BTreeMap<Identifier, Vec<ScanResult>>,
    #[serde(default)]
    pub rule_violations: Vec<RuleViolation>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub custom_data: BTreeMap<String, serde_json::Value>,
}

impl AnalysisResult {
    pub fn analyzer_issues_for(&self, id: &Identifier) -> &[OrtIssue] {
        self.issues.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn project(&self, id: &Identifier) -> Option<&Project> {
        self.projects.iter().find(|project| &project.id == id)
    }

    /// All issues of every stage, used for statistics.
    pub fn all_issues(&self) -> impl Iterator<Item = &OrtIssue> {
        fn tree_issues<'a>(reference: &'a PackageReference, out: &mut Vec<&'a OrtIssue>) {
            out.extend(reference.issues.iter());
            for dependency in &reference.dependencies {
                tree_issues(dependency, out);
            }
        }

        let mut issues: Vec<&OrtIssue> = self.issues.values().flatten().collect();
        for result in self.scan_results.values().flatten() {
            issues.extend(result.summary.issues.iter());
        }
        for scope in self.projects.iter().flat_map(|project| &project.scopes) {
            for reference in &scope.dependencies {
                tree_issues(reference, &mut issues);
            }
        }
        issues.into_iter()
    }
}
