use super::entity_store::EntityStore;
use super::finding_attacher::FindingAttacher;
use super::issue_enricher::{IssueEnricher, IssueOwner};
use crate::model_building::domain::{
    AnalysisResult, CuratedPackage, Identifier, IssueType, License, LicenseRef,
    PackageAccumulator, PackageCore, PackageRef, PathExclude, Project, RemoteArtifact,
    ScanResultCore, ScopeExclude,
};
use crate::ports::outbound::{
    ExcludesProvider, FindingsMatcher, ResolutionProvider, ScanResultsProvider,
};
use std::collections::BTreeSet;

/// PackageAssembler converts raw projects and curated packages into canonical
/// evaluated packages
///
/// After [`add_project`](Self::add_project) or [`add_package`](Self::add_package)
/// returns, the package is registered with all of its analyzer issues, scan
/// results, scanner issues and findings attached. Calling either again for the
/// same id returns the existing handle and changes nothing.
pub struct PackageAssembler<'a, SP, FM, RP, EP> {
    analysis: &'a AnalysisResult,
    scan_results: &'a SP,
    matcher: &'a FM,
    resolutions: &'a RP,
    excludes: &'a EP,
}

impl<'a, SP, FM, RP, EP> PackageAssembler<'a, SP, FM, RP, EP>
where
    SP: ScanResultsProvider,
    FM: FindingsMatcher,
    RP: ResolutionProvider,
    EP: ExcludesProvider,
{
    pub fn new(
        analysis: &'a AnalysisResult,
        scan_results: &'a SP,
        matcher: &'a FM,
        resolutions: &'a RP,
        excludes: &'a EP,
    ) -> Self {
        Self {
            analysis,
            scan_results,
            matcher,
            resolutions,
            excludes,
        }
    }

    /// Registers a project
    ///
    /// A project is excluded if any path exclude matches its definition file.
    pub fn add_project(&self, store: &mut EntityStore, project: &Project) -> PackageRef {
        if let Some(existing) = store.packages.handle_of(&project.id) {
            tracing::debug!(id = %project.id, "project already registered");
            return existing;
        }

        let path_excludes = store
            .path_excludes
            .add_all_if_required(self.excludes.path_excludes_for(project));
        let declared_licenses_processed =
            Self::intern_declared_licenses(store, &project.id, &project.declared_licenses_processed);

        let core = PackageCore {
            id: project.id.clone(),
            is_project: true,
            definition_file_path: project.definition_file_path.clone(),
            purl: String::new(),
            declared_licenses: project.declared_licenses.clone(),
            declared_licenses_processed,
            concluded_license: None,
            description: String::new(),
            homepage_url: project.homepage_url.clone(),
            binary_artifact: RemoteArtifact::default(),
            source_artifact: RemoteArtifact::default(),
            vcs: project.vcs.clone(),
            vcs_processed: project.vcs_processed.clone(),
            curations: Vec::new(),
            is_excluded: !path_excludes.is_empty(),
            path_excludes,
            scope_excludes: Vec::new(),
        };

        let (handle, _) = store
            .packages
            .add_if_required(core, PackageAccumulator::for_project());
        self.attach_issues_and_scans(store, handle, &project.id);
        tracing::debug!(id = %project.id, "registered project");
        handle
    }

    /// Registers a curated package
    ///
    /// The path and scope excludes of every project and scope referencing the
    /// package are only collected when the excludes provider reports it as excluded.
    pub fn add_package(&self, store: &mut EntityStore, curated: &CuratedPackage) -> PackageRef {
        let package = &curated.package;
        if let Some(existing) = store.packages.handle_of(&package.id) {
            tracing::debug!(id = %package.id, "package already registered");
            return existing;
        }

        let is_excluded = self.excludes.is_excluded(&package.id);
        let (path_excludes, scope_excludes) = if is_excluded {
            let (paths, scopes) = self.inherited_excludes(&package.id);
            (
                store.path_excludes.add_all_if_required(paths),
                store.scope_excludes.add_all_if_required(scopes),
            )
        } else {
            (Vec::new(), Vec::new())
        };
        let declared_licenses_processed =
            Self::intern_declared_licenses(store, &package.id, &package.declared_licenses_processed);

        let core = PackageCore {
            id: package.id.clone(),
            is_project: false,
            definition_file_path: String::new(),
            purl: package.purl.clone(),
            declared_licenses: package.declared_licenses.clone(),
            declared_licenses_processed,
            concluded_license: package.concluded_license.clone(),
            description: package.description.clone(),
            homepage_url: package.homepage_url.clone(),
            binary_artifact: package.binary_artifact.clone(),
            source_artifact: package.source_artifact.clone(),
            vcs: package.vcs.clone(),
            vcs_processed: package.vcs_processed.clone(),
            curations: curated.curations.clone(),
            is_excluded,
            path_excludes,
            scope_excludes,
        };

        let (handle, _) = store
            .packages
            .add_if_required(core, PackageAccumulator::default());
        self.attach_issues_and_scans(store, handle, &package.id);
        tracing::debug!(id = %package.id, excluded = is_excluded, "registered package");
        handle
    }

    /// Collects the excludes of every project and scope that references `id`.
    ///
    /// Rescans all projects on every call.
    fn inherited_excludes(&self, id: &Identifier) -> (Vec<PathExclude>, Vec<ScopeExclude>) {
        let mut path_excludes = Vec::new();
        let mut scope_excludes = Vec::new();

        for project in &self.analysis.projects {
            for scope in project.scopes.iter().filter(|scope| scope.contains(id)) {
                path_excludes.extend(self.excludes.path_excludes_for(project));
                scope_excludes.extend(self.excludes.scope_excludes_for(scope));
            }
        }

        (path_excludes, scope_excludes)
    }

    fn intern_declared_licenses(
        store: &mut EntityStore,
        id: &Identifier,
        licenses: &BTreeSet<String>,
    ) -> Vec<LicenseRef> {
        let mut handles = Vec::with_capacity(licenses.len());
        for license_id in licenses {
            let license = License::new(license_id);
            store.record_declared_license(&license, id);
            handles.push(store.licenses.add_if_required(license));
        }
        handles
    }

    fn attach_issues_and_scans(&self, store: &mut EntityStore, handle: PackageRef, id: &Identifier) {
        let analyzer_issues = IssueEnricher::enrich_issues(
            store,
            self.resolutions,
            self.analysis.analyzer_issues_for(id),
            IssueType::Analyzer,
            IssueOwner::package(handle),
        );
        store.packages.accumulator_mut(handle).add_issues(analyzer_issues);

        for result in self.scan_results.scan_results_for(id) {
            let scan_result = store.intern_scan_result(ScanResultCore::from_scan_result(result));
            let scanner_issues = IssueEnricher::enrich_issues(
                store,
                self.resolutions,
                &result.summary.issues,
                IssueType::Scanner,
                IssueOwner::package(handle).with_scan_result(scan_result),
            );
            store.add_scan_result_issues(scan_result, &scanner_issues);

            let accumulator = store.packages.accumulator_mut(handle);
            accumulator.add_scan_result(scan_result);
            accumulator.add_issues(scanner_issues);

            FindingAttacher::attach(store, self.matcher, &result.summary, scan_result, handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_building::domain::{Package, PackageReference, Scope};
    use crate::model_building::services::test_support::{
        id, issue, project, scan_result, FixedExcludes, LicenseOnlyMatcher, NoResolutions,
    };

    fn curated(package_id: &str, declared: &[&str]) -> CuratedPackage {
        let mut package = Package::new(id(package_id));
        package.declared_licenses_processed = declared.iter().map(|l| l.to_string()).collect();
        CuratedPackage::new(package)
    }

    #[test]
    fn test_add_project_starts_at_level_zero() {
        let analysis = AnalysisResult::default();
        let excludes = FixedExcludes::default();
        let assembler =
            PackageAssembler::new(&analysis, &analysis, &LicenseOnlyMatcher, &NoResolutions, &excludes);
        let mut store = EntityStore::new();

        let handle = assembler.add_project(&mut store, &project("NPM::app:1.0", vec![]));

        let core = store.packages.core(handle);
        assert!(core.is_project);
        assert!(!core.is_excluded);
        assert_eq!(store.packages.accumulator(handle).levels, BTreeSet::from([0]));
    }

    #[test]
    fn test_add_project_with_matching_path_exclude_is_excluded() {
        let analysis = AnalysisResult::default();
        let excludes = FixedExcludes {
            definition_files: vec!["package.json".to_string()],
            ..FixedExcludes::default()
        };
        let assembler =
            PackageAssembler::new(&analysis, &analysis, &LicenseOnlyMatcher, &NoResolutions, &excludes);
        let mut store = EntityStore::new();

        let handle = assembler.add_project(&mut store, &project("NPM::app:1.0", vec![]));

        assert!(store.packages.core(handle).is_excluded);
        assert_eq!(store.packages.core(handle).path_excludes.len(), 1);
    }

    #[test]
    fn test_add_package_twice_returns_same_handle() {
        let analysis = AnalysisResult::default();
        let excludes = FixedExcludes::default();
        let assembler =
            PackageAssembler::new(&analysis, &analysis, &LicenseOnlyMatcher, &NoResolutions, &excludes);
        let mut store = EntityStore::new();
        let package = curated("NPM::x:1.0", &["MIT"]);

        let first = assembler.add_package(&mut store, &package);
        let second = assembler.add_package(&mut store, &package);

        assert_eq!(first, second);
        assert_eq!(store.packages.len(), 1);
        assert_eq!(store.declared_license_stats()["MIT"], 1);
        assert!(store.packages.accumulator(first).levels.is_empty());
    }

    #[test]
    fn test_add_package_attaches_issues_scans_and_findings() {
        let mut analysis = AnalysisResult::default();
        analysis
            .issues
            .insert(id("NPM::x:1.0"), vec![issue("could not resolve")]);
        analysis.scan_results.insert(
            id("NPM::x:1.0"),
            vec![scan_result(&[("MIT", "a.py")], vec![issue("scan timeout")])],
        );
        let excludes = FixedExcludes::default();
        let assembler =
            PackageAssembler::new(&analysis, &analysis, &LicenseOnlyMatcher, &NoResolutions, &excludes);
        let mut store = EntityStore::new();

        let handle = assembler.add_package(&mut store, &curated("NPM::x:1.0", &["MIT"]));

        let accumulator = store.packages.accumulator(handle);
        assert_eq!(accumulator.issues.len(), 2);
        assert_eq!(accumulator.scan_results.len(), 1);
        assert_eq!(accumulator.findings.len(), 1);
        assert_eq!(accumulator.detected_licenses.len(), 1);
        assert_eq!(store.licenses.len(), 1);
        assert_eq!(store.detected_license_stats()["MIT"], 1);

        let scanner_issue = store.issues.get(accumulator.issues[1]).unwrap();
        assert_eq!(scanner_issue.issue_type, IssueType::Scanner);
        assert_eq!(scanner_issue.scan_result, Some(accumulator.scan_results[0]));
    }

    #[test]
    fn test_identical_scans_of_different_packages_are_interned_once() {
        let mut analysis = AnalysisResult::default();
        for package in ["NPM::a:1.0", "NPM::b:1.0", "NPM::c:1.0"] {
            analysis
                .scan_results
                .insert(id(package), vec![scan_result(&[("MIT", "LICENSE")], vec![])]);
        }
        let excludes = FixedExcludes::default();
        let assembler =
            PackageAssembler::new(&analysis, &analysis, &LicenseOnlyMatcher, &NoResolutions, &excludes);
        let mut store = EntityStore::new();

        let handles: Vec<_> = ["NPM::a:1.0", "NPM::b:1.0", "NPM::c:1.0"]
            .iter()
            .map(|package| assembler.add_package(&mut store, &curated(package, &[])))
            .collect();

        assert_eq!(store.scan_results.len(), 1);
        for handle in handles {
            assert_eq!(store.packages.accumulator(handle).scan_results.len(), 1);
        }
    }

    #[test]
    fn test_excluded_package_inherits_excludes_of_referencing_scopes() {
        let test_scope = Scope::new("test", vec![PackageReference::new(id("NPM::jest:29.0"))]);
        let mut analysis = AnalysisResult::default();
        analysis.projects.push(project("NPM::app:1.0", vec![test_scope]));
        let excludes = FixedExcludes {
            scopes: vec!["test".to_string()],
            excluded_ids: BTreeSet::from([id("NPM::jest:29.0")]),
            ..FixedExcludes::default()
        };
        let assembler =
            PackageAssembler::new(&analysis, &analysis, &LicenseOnlyMatcher, &NoResolutions, &excludes);
        let mut store = EntityStore::new();

        let handle = assembler.add_package(&mut store, &curated("NPM::jest:29.0", &[]));

        let core = store.packages.core(handle);
        assert!(core.is_excluded);
        assert_eq!(core.scope_excludes.len(), 1);
        assert!(core.path_excludes.is_empty());
    }

    #[test]
    fn test_included_package_skips_exclude_lookup() {
        let compile = Scope::new("compile", vec![PackageReference::new(id("NPM::x:1.0"))]);
        let mut analysis = AnalysisResult::default();
        analysis.projects.push(project("NPM::app:1.0", vec![compile]));
        let excludes = FixedExcludes {
            scopes: vec!["compile".to_string()],
            ..FixedExcludes::default()
        };
        let assembler =
            PackageAssembler::new(&analysis, &analysis, &LicenseOnlyMatcher, &NoResolutions, &excludes);
        let mut store = EntityStore::new();

        let handle = assembler.add_package(&mut store, &curated("NPM::x:1.0", &[]));

        assert!(!store.packages.core(handle).is_excluded);
        assert!(store.packages.core(handle).scope_excludes.is_empty());
        assert!(store.scope_excludes.is_empty());
    }
}
