pub mod analysis_result;
pub mod dependency_tree;
pub mod evaluated_model;
pub mod handle;
pub mod identifier;
pub mod issue;
pub mod license;
pub mod package;
pub mod repository_config;
pub mod scan_result;
pub mod statistics;

pub use analysis_result::{
    AnalysisResult, CopyrightFinding, CuratedPackage, LicenseFinding, LicenseSource, OrtIssue,
    Package, PackageCuration, PackageLinkage, PackageReference, Project, Provenance,
    RemoteArtifact, RepositoryInfo, RuleViolation, ScanResult, ScanSummary, ScannerDetails,
    Scope, Severity, TextLocation, VcsInfo,
};
pub use dependency_tree::DependencyTreeNode;
pub use evaluated_model::EvaluatedModel;
pub use handle::Handle;
pub use identifier::Identifier;
pub use issue::{EvaluatedIssue, EvaluatedRuleViolation, IssueType};
pub use license::{Copyright, License};
pub use package::{
    EvaluatedFinding, EvaluatedPackage, EvaluatedPackagePath, FindingKind, FindingSubject,
    PackageAccumulator, PackageCore,
};
pub use repository_config::{
    Excludes, IssueResolution, IssueResolutionReason, PathExclude, PathExcludeReason,
    RepositoryConfiguration, Resolutions, RuleViolationResolution, RuleViolationResolutionReason,
    ScopeExclude, ScopeExcludeReason,
};
pub use scan_result::{EvaluatedScanResult, ScanResultCore};
pub use statistics::{DependencyTreeStatistics, SeverityCounts, Statistics};

pub type LicenseRef = Handle<License>;
pub type CopyrightRef = Handle<Copyright>;
pub type PackageRef = Handle<EvaluatedPackage>;
pub type PathRef = Handle<EvaluatedPackagePath>;
pub type ScanResultRef = Handle<EvaluatedScanResult>;
pub type IssueRef = Handle<EvaluatedIssue>;
pub type IssueResolutionRef = Handle<IssueResolution>;
pub type RuleViolationResolutionRef = Handle<RuleViolationResolution>;
pub type PathExcludeRef = Handle<PathExclude>;
pub type ScopeExcludeRef = Handle<ScopeExclude>;
