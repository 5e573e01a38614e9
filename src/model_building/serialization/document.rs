//! Graph-as-table document layout.
//!
//! Every entity that can be referenced appears exactly once, in the table for
//! its type, tagged with an `_id` that is unique within that table. All
//! references between entities are bare `_id` integers. The fields `pkg` and
//! `scan_result` of an issue close the model's cycles and are always written
//! as ids; on load they are rebuilt from the owning lists.

use crate::model_building::domain::{
    FindingKind, Identifier, IssueResolution, IssueType, LicenseSource, PackageCuration,
    PackageLinkage, PathExclude, Provenance, RemoteArtifact, RuleViolationResolution,
    ScannerDetails, ScopeExclude, Severity, Statistics, VcsInfo,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Layout version written by this crate.
pub const FORMAT_VERSION: u32 = 1;

/// Surrogate id of a table row.
pub type SurrogateId = u32;

/// A table row: the entity body plus its surrogate id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    #[serde(rename = "_id")]
    pub id: SurrogateId,
    #[serde(flatten)]
    pub body: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseBody {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyrightBody {
    pub statement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResultBody {
    pub provenance: Provenance,
    pub scanner: ScannerDetails,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub file_count: u64,
    pub package_verification_code: String,
    #[serde(default)]
    pub issues: Vec<SurrogateId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindingBody {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<SurrogateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<SurrogateId>,
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub scan_result: SurrogateId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageBody {
    pub id: Identifier,
    #[serde(default)]
    pub is_project: bool,
    #[serde(default)]
    pub definition_file_path: String,
    #[serde(default)]
    pub purl: String,
    #[serde(default)]
    pub declared_licenses: BTreeSet<String>,
    #[serde(default)]
    pub declared_licenses_processed: Vec<SurrogateId>,
    #[serde(default)]
    pub detected_licenses: Vec<SurrogateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
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
    #[serde(default)]
    pub curations: Vec<PackageCuration>,
    #[serde(default)]
    pub paths: Vec<SurrogateId>,
    #[serde(default)]
    pub levels: BTreeSet<usize>,
    #[serde(default)]
    pub scan_results: Vec<SurrogateId>,
    #[serde(default)]
    pub findings: Vec<FindingBody>,
    #[serde(default)]
    pub is_excluded: bool,
    #[serde(default)]
    pub path_excludes: Vec<SurrogateId>,
    #[serde(default)]
    pub scope_excludes: Vec<SurrogateId>,
    #[serde(default)]
    pub issues: Vec<SurrogateId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathBody {
    pub pkg: SurrogateId,
    pub project: SurrogateId,
    pub scope: String,
    #[serde(default)]
    pub path: Vec<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueBody {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub source: String,
    pub message: String,
    pub severity: Severity,
    #[serde(default)]
    pub resolutions: Vec<SurrogateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pkg: Option<SurrogateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_result: Option<SurrogateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<SurrogateId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNodeBody {
    pub title: String,
    pub key: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkage: Option<PackageLinkage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pkg: Option<SurrogateId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path_excludes: Vec<SurrogateId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scope_excludes: Vec<SurrogateId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<SurrogateId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNodeBody>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleViolationBody {
    pub rule: String,
    pub pkg: SurrogateId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<SurrogateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_source: Option<LicenseSource>,
    pub severity: Severity,
    pub message: String,
    #[serde(default)]
    pub how_to_fix: String,
    #[serde(default)]
    pub resolutions: Vec<SurrogateId>,
}

/// The serialized form of an evaluated model.
///
/// Entity tables come first, in the order their ids are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub format_version: Option<u32>,
    #[serde(default)]
    pub path_excludes: Vec<Entry<PathExclude>>,
    #[serde(default)]
    pub scope_excludes: Vec<Entry<ScopeExclude>>,
    #[serde(default)]
    pub issue_resolutions: Vec<Entry<IssueResolution>>,
    #[serde(default)]
    pub rule_violation_resolutions: Vec<Entry<RuleViolationResolution>>,
    #[serde(default)]
    pub copyrights: Vec<Entry<CopyrightBody>>,
    #[serde(default)]
    pub licenses: Vec<Entry<LicenseBody>>,
    #[serde(default)]
    pub scan_results: Vec<Entry<ScanResultBody>>,
    #[serde(default)]
    pub packages: Vec<Entry<PackageBody>>,
    #[serde(default)]
    pub paths: Vec<Entry<PathBody>>,
    #[serde(default)]
    pub issues: Vec<Entry<IssueBody>>,
    #[serde(default)]
    pub dependency_trees: Vec<TreeNodeBody>,
    #[serde(default)]
    pub rule_violations: Vec<RuleViolationBody>,
    #[serde(default)]
    pub declared_license_stats: BTreeMap<String, usize>,
    #[serde(default)]
    pub detected_license_stats: BTreeMap<String, usize>,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub severe_issue_threshold: Severity,
    #[serde(default)]
    pub severe_rule_violation_threshold: Severity,
    #[serde(default)]
    pub repository_configuration: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub custom_data: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_flattens_body_next_to_id() {
        let entry = Entry {
            id: 3,
            body: LicenseBody {
                id: "MIT".to_string(),
            },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({ "_id": 3, "id": "MIT" }));

        let back: Entry<LicenseBody> = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_leaf_tree_node_omits_empty_lists() {
        let node = TreeNodeBody {
            title: "compile".to_string(),
            key: 1,
            linkage: None,
            pkg: None,
            path_excludes: vec![],
            scope_excludes: vec![],
            issues: vec![],
            children: vec![],
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "compile", "key": 1 }));
    }
}
