use super::analysis_result::{Provenance, ScanResult, ScannerDetails};
use super::IssueRef;
use chrono::{DateTime, Utc};

/// The interned part of a scan result: everything except the issues, which
/// are attached per package after interning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanResultCore {
    pub provenance: Provenance,
    pub scanner: ScannerDetails,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub file_count: u64,
    pub package_verification_code: String,
}

impl ScanResultCore {
    pub fn from_scan_result(result: &ScanResult) -> Self {
        Self {
            provenance: result.provenance.clone(),
            scanner: result.scanner.clone(),
            start_time: result.summary.start_time,
            end_time: result.summary.end_time,
            file_count: result.summary.file_count,
            package_verification_code: result.summary.package_verification_code.clone(),
        }
    }

    pub fn finalize(self, issues: Vec<IssueRef>) -> EvaluatedScanResult {
        EvaluatedScanResult {
            provenance: self.provenance,
            scanner: self.scanner,
            start_time: self.start_time,
            end_time: self.end_time,
            file_count: self.file_count,
            package_verification_code: self.package_verification_code,
            issues,
        }
    }
}

/// One distinct scan, shared by every package it was performed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedScanResult {
    pub provenance: Provenance,
    pub scanner: ScannerDetails,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub file_count: u64,
    pub package_verification_code: String,
    pub issues: Vec<IssueRef>,
}
