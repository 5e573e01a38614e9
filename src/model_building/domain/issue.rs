use super::analysis_result::{LicenseSource, Severity};
use super::{IssueResolutionRef, LicenseRef, PackageRef, PathRef, RuleViolationResolutionRef, ScanResultRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueType {
    Analyzer,
    Scanner,
}

/// An analyzer or scanner issue together with its resolutions and owners.
///
/// `package` and `scan_result` point back at the entities that list this issue,
/// which makes the model graph cyclic. They are `None` only between decoding a
/// document and reconciling it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EvaluatedIssue {
    pub timestamp: DateTime<Utc>,
    pub issue_type: IssueType,
    pub source: String,
    pub message: String,
    pub severity: Severity,
    pub resolutions: Vec<IssueResolutionRef>,
    pub package: Option<PackageRef>,
    pub scan_result: Option<ScanResultRef>,
    pub path: Option<PathRef>,
}

impl EvaluatedIssue {
    pub fn is_resolved(&self) -> bool {
        !self.resolutions.is_empty()
    }
}

/// A policy breach reported by the evaluator, bound to the package it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedRuleViolation {
    pub rule: String,
    pub package: PackageRef,
    pub license: Option<LicenseRef>,
    pub license_source: Option<LicenseSource>,
    pub severity: Severity,
    pub message: String,
    pub how_to_fix: String,
    pub resolutions: Vec<RuleViolationResolutionRef>,
}

impl EvaluatedRuleViolation {
    pub fn is_resolved(&self) -> bool {
        !self.resolutions.is_empty()
    }
}
