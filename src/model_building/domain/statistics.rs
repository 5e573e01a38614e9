use super::analysis_result::Severity;
use serde::{Deserialize, Serialize};

/// Open (unresolved) findings per severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub errors: usize,
    pub warnings: usize,
    pub hints: usize,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Hint => self.hints += 1,
        }
    }

    /// Number of entries at or above `threshold`.
    pub fn at_or_above(&self, threshold: Severity) -> usize {
        match threshold {
            Severity::Error => self.errors,
            Severity::Warning => self.errors + self.warnings,
            Severity::Hint => self.errors + self.warnings + self.hints,
        }
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.hints
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyTreeStatistics {
    pub included_projects: usize,
    pub excluded_projects: usize,
    pub included_packages: usize,
    pub excluded_packages: usize,
    pub total_scopes: usize,
    pub total_tree_depth: usize,
}

/// Aggregate numbers computed by the statistics provider and copied into the
/// model unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub open_issues: SeverityCounts,
    pub open_rule_violations: SeverityCounts,
    pub has_severe_issues: bool,
    pub has_severe_rule_violations: bool,
    pub dependency_tree: DependencyTreeStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_counts_threshold() {
        let mut counts = SeverityCounts::default();
        counts.record(Severity::Error);
        counts.record(Severity::Warning);
        counts.record(Severity::Warning);
        counts.record(Severity::Hint);

        assert_eq!(counts.at_or_above(Severity::Error), 1);
        assert_eq!(counts.at_or_above(Severity::Warning), 3);
        assert_eq!(counts.at_or_above(Severity::Hint), 4);
        assert_eq!(counts.total(), 4);
    }
}
