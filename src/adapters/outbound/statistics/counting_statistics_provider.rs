use crate::model_building::domain::{
    AnalysisResult, DependencyTreeStatistics, PackageReference, Severity, SeverityCounts,
    Statistics,
};
use crate::ports::outbound::{ExcludesProvider, ResolutionProvider, StatisticsProvider};

/// CountingStatisticsProvider adapter counting open findings and tree shape
///
/// Issues and rule violations are open when no resolution applies to them.
/// They are severe when at or above the configured threshold.
pub struct CountingStatisticsProvider<'a, EP> {
    excludes: &'a EP,
    severe_issue_threshold: Severity,
    severe_rule_violation_threshold: Severity,
}

impl<'a, EP: ExcludesProvider> CountingStatisticsProvider<'a, EP> {
    pub fn new(
        excludes: &'a EP,
        severe_issue_threshold: Severity,
        severe_rule_violation_threshold: Severity,
    ) -> Self {
        Self {
            excludes,
            severe_issue_threshold,
            severe_rule_violation_threshold,
        }
    }

    fn dependency_tree_statistics(&self, analysis: &AnalysisResult) -> DependencyTreeStatistics {
        fn depth(reference: &PackageReference) -> usize {
            1 + reference.dependencies.iter().map(depth).max().unwrap_or(0)
        }

        let mut stats = DependencyTreeStatistics::default();
        for project in &analysis.projects {
            if self.excludes.path_excludes_for(project).is_empty() {
                stats.included_projects += 1;
            } else {
                stats.excluded_projects += 1;
            }

            stats.total_scopes += project.scopes.len();
            let deepest = project
                .scopes
                .iter()
                .flat_map(|scope| &scope.dependencies)
                .map(depth)
                .max()
                .unwrap_or(0);
            stats.total_tree_depth = stats.total_tree_depth.max(deepest);
        }

        for package in &analysis.packages {
            if self.excludes.is_excluded(&package.package.id) {
                stats.excluded_packages += 1;
            } else {
                stats.included_packages += 1;
            }
        }
        stats
    }
}

impl<EP: ExcludesProvider> StatisticsProvider for CountingStatisticsProvider<'_, EP> {
    fn statistics_for(
        &self,
        analysis: &AnalysisResult,
        resolutions: &dyn ResolutionProvider,
    ) -> Statistics {
        let mut open_issues = SeverityCounts::default();
        for issue in analysis.all_issues() {
            if !resolutions.is_issue_resolved(issue) {
                open_issues.record(issue.severity);
            }
        }

        let mut open_rule_violations = SeverityCounts::default();
        for violation in &analysis.rule_violations {
            if !resolutions.is_rule_violation_resolved(violation) {
                open_rule_violations.record(violation.severity);
            }
        }

        let statistics = Statistics {
            has_severe_issues: open_issues.at_or_above(self.severe_issue_threshold) > 0,
            has_severe_rule_violations: open_rule_violations
                .at_or_above(self.severe_rule_violation_threshold)
                > 0,
            open_issues,
            open_rule_violations,
            dependency_tree: self.dependency_tree_statistics(analysis),
        };

        tracing::debug!(
            open_issues = statistics.open_issues.total(),
            open_rule_violations = statistics.open_rule_violations.total(),
            "computed statistics"
        );
        statistics
    }
}
