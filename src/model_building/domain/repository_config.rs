//! Exclude and resolution rules from the repository configuration.
//!
//! These are plain records; deciding whether a rule applies to a given
//! project, scope, issue or violation is the job of the outbound providers.

use serde::{Deserialize, Serialize};

/// A rule marking files matching a glob `pattern` as out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathExclude {
    pub pattern: String,
    pub reason: PathExcludeReason,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathExcludeReason {
    BuildToolOf,
    DataFileOf,
    DocumentationOf,
    ExampleOf,
    OptionalComponentOf,
    Other,
    ProvidedBy,
    TestOf,
    TestToolOf,
}

/// A rule marking dependency scopes whose name matches the regex `pattern` as out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeExclude {
    pub pattern: String,
    pub reason: ScopeExcludeReason,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScopeExcludeReason {
    BuildDependencyOf,
    DevDependencyOf,
    DocumentationDependencyOf,
    ProvidedDependencyOf,
    RuntimeDependencyOf,
    TestDependencyOf,
}

/// Dismisses issues whose message matches the regex `message`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueResolution {
    pub message: String,
    pub reason: IssueResolutionReason,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueResolutionReason {
    BuildToolIssue,
    CantFixIssue,
    ScannerIssue,
}

/// Dismisses rule violations whose message matches the regex `message`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleViolationResolution {
    pub message: String,
    pub reason: RuleViolationResolutionReason,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleViolationResolutionReason {
    CantFixException,
    DynamicLinkageException,
    ExampleOfException,
    LicenseAcquiredException,
    NotModifiedException,
    PatentGrantException,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Excludes {
    #[serde(default)]
    pub paths: Vec<PathExclude>,
    #[serde(default)]
    pub scopes: Vec<ScopeExclude>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolutions {
    #[serde(default)]
    pub issues: Vec<IssueResolution>,
    #[serde(default)]
    pub rule_violations: Vec<RuleViolationResolution>,
}

/// The effective repository configuration the analysis ran with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfiguration {
    #[serde(default)]
    pub excludes: Excludes,
    #[serde(default)]
    pub resolutions: Resolutions,
}

impl RepositoryConfiguration {
    /// Appends the rules of `other` that are not already present.
    pub fn merge(&mut self, other: RepositoryConfiguration) {
        fn extend_distinct<T: PartialEq>(target: &mut Vec<T>, items: Vec<T>) {
            for item in items {
                if !target.contains(&item) {
                    target.push(item);
                }
            }
        }

        extend_distinct(&mut self.excludes.paths, other.excludes.paths);
        extend_distinct(&mut self.excludes.scopes, other.excludes.scopes);
        extend_distinct(&mut self.resolutions.issues, other.resolutions.issues);
        extend_distinct(
            &mut self.resolutions.rule_violations,
            other.resolutions.rule_violations,
        );
    }
}
