use crate::application::dto::{BuildModelRequest, ModelResponse};
use crate::model_building::domain::AnalysisResult;
use crate::model_building::services::{
    DependencyTreeBuilder, EntityStore, IssueEnricher, ModelAnnotations, PackageAssembler,
};
use crate::ports::outbound::{
    ExcludesProvider, FindingsMatcher, ProgressReporter, ResolutionProvider, ScanResultsProvider,
    StatisticsProvider,
};
use crate::shared::Result;

/// BuildEvaluatedModelUseCase - Core use case assembling the evaluated model
///
/// Drives every build step sequentially over one [`EntityStore`]:
/// projects, packages, rule violations, and finally the dependency trees,
/// which need every package registered to resolve their references.
///
/// # Type Parameters
/// * `SP` - ScanResultsProvider implementation
/// * `FM` - FindingsMatcher implementation
/// * `RP` - ResolutionProvider implementation
/// * `EP` - ExcludesProvider implementation
/// * `STP` - StatisticsProvider implementation
/// * `PR` - ProgressReporter implementation
pub struct BuildEvaluatedModelUseCase<SP, FM, RP, EP, STP, PR> {
    scan_results: SP,
    matcher: FM,
    resolutions: RP,
    excludes: EP,
    statistics: STP,
    progress_reporter: PR,
}

impl<SP, FM, RP, EP, STP, PR> BuildEvaluatedModelUseCase<SP, FM, RP, EP, STP, PR>
where
    SP: ScanResultsProvider,
    FM: FindingsMatcher,
    RP: ResolutionProvider,
    EP: ExcludesProvider,
    STP: StatisticsProvider,
    PR: ProgressReporter,
{
    /// Creates a new BuildEvaluatedModelUseCase with injected dependencies
    pub fn new(
        scan_results: SP,
        matcher: FM,
        resolutions: RP,
        excludes: EP,
        statistics: STP,
        progress_reporter: PR,
    ) -> Self {
        Self {
            scan_results,
            matcher,
            resolutions,
            excludes,
            statistics,
            progress_reporter,
        }
    }

    /// Builds the evaluated model of one analysis result
    ///
    /// # Arguments
    /// * `analysis` - The combined analyzer, scanner and evaluator output
    /// * `request` - Thresholds and the effective repository configuration
    ///
    /// # Errors
    /// Returns [`ModelError::MissingPackage`](crate::shared::error::ModelError::MissingPackage)
    /// if analyzer issues or a rule violation reference an id that is neither a
    /// project nor a package. Nothing is returned in that case.
    pub fn execute(
        &self,
        analysis: &AnalysisResult,
        request: &BuildModelRequest,
    ) -> Result<ModelResponse> {
        let mut store = EntityStore::new();

        // Step 1: Register projects and packages
        self.register_packages(&mut store, analysis);

        // Step 2: Every analyzer issue must belong to a registered id
        for id in analysis.issues.keys() {
            IssueEnricher::require_package(&store, id, "analyzer issues")?;
        }

        // Step 3: Rule violations
        self.add_rule_violations(&mut store, analysis)?;

        // Step 4: Dependency trees
        self.build_dependency_trees(&mut store, analysis)?;

        // Step 5: Statistics and pass-through data
        self.progress_reporter.report("📊 Computing statistics...");
        let annotations = ModelAnnotations {
            statistics: self.statistics.statistics_for(analysis, &self.resolutions),
            severe_issue_threshold: request.severe_issue_threshold,
            severe_rule_violation_threshold: request.severe_rule_violation_threshold,
            repository_configuration: serde_yaml_ng::to_string(&request.repository_configuration)?,
            labels: analysis.labels.clone(),
            custom_data: analysis.custom_data.clone(),
        };

        let model = store.into_model(annotations);
        tracing::info!(
            packages = model.packages.len(),
            scan_results = model.scan_results.len(),
            licenses = model.licenses.len(),
            issues = model.issues.len(),
            rule_violations = model.rule_violations.len(),
            "built evaluated model"
        );

        let response = ModelResponse::new(model);
        self.progress_reporter.report_completion(&format!(
            "✅ Built model with {} package(s) and {} issue(s)",
            response.model.packages.len(),
            response.model.issues.len()
        ));
        Ok(response)
    }

    fn register_packages(&self, store: &mut EntityStore, analysis: &AnalysisResult) {
        let assembler = PackageAssembler::new(
            analysis,
            &self.scan_results,
            &self.matcher,
            &self.resolutions,
            &self.excludes,
        );

        self.progress_reporter.report(&format!(
            "📦 Assembling {} project(s) and {} package(s)...",
            analysis.projects.len(),
            analysis.packages.len()
        ));

        let total = analysis.projects.len() + analysis.packages.len();
        let mut current = 0;
        for project in &analysis.projects {
            assembler.add_project(store, project);
            current += 1;
            self.progress_reporter
                .report_progress(current, total, Some(&project.id.to_string()));
        }
        for package in &analysis.packages {
            assembler.add_package(store, package);
            current += 1;
            self.progress_reporter
                .report_progress(current, total, Some(&package.package.id.to_string()));
        }
    }

    fn add_rule_violations(&self, store: &mut EntityStore, analysis: &AnalysisResult) -> Result<()> {
        if analysis.rule_violations.is_empty() {
            return Ok(());
        }

        self.progress_reporter.report(&format!(
            "⚖️  Adding {} rule violation(s)...",
            analysis.rule_violations.len()
        ));
        for violation in &analysis.rule_violations {
            let evaluated = IssueEnricher::enrich_rule_violation(store, &self.resolutions, violation)?;
            store.rule_violations.push(evaluated);
        }
        Ok(())
    }

    fn build_dependency_trees(&self, store: &mut EntityStore, analysis: &AnalysisResult) -> Result<()> {
        self.progress_reporter.report("🌳 Building dependency trees...");

        let mut builder = DependencyTreeBuilder::new(&self.resolutions, &self.excludes);
        for project in &analysis.projects {
            let tree = builder.build(store, project)?;
            tracing::debug!(
                project = %project.id,
                nodes = tree.node_count(),
                depth = tree.depth(),
                "built dependency tree"
            );
            store.dependency_trees.push(tree);
        }
        Ok(())
    }
}
