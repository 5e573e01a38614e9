use super::interner::Interner;
use crate::model_building::domain::{
    Copyright, DependencyTreeNode, EvaluatedIssue, EvaluatedModel, EvaluatedPackage,
    EvaluatedPackagePath, EvaluatedRuleViolation, EvaluatedScanResult, Identifier,
    IssueRef, IssueResolution, License, PackageAccumulator, PackageCore, PackageRef,
    PathExclude, RuleViolationResolution, ScanResultCore, ScanResultRef, ScopeExclude, Severity,
    Statistics,
};
use crate::model_building::domain::package::push_distinct;
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
struct PackageEntry {
    core: PackageCore,
    accumulator: PackageAccumulator,
}

/// Packages interned by [`Identifier`], each split into its fixed core and the
/// accumulator that grows while trees are built.
#[derive(Debug, Clone, Default)]
pub struct PackageRegistry {
    entries: IndexMap<Identifier, PackageEntry>,
}

impl PackageRegistry {
    /// Registers a package unless one with the same id exists.
    ///
    /// # Returns
    /// The handle of the registered package and whether it was inserted by this call
    pub fn add_if_required(
        &mut self,
        core: PackageCore,
        accumulator: PackageAccumulator,
    ) -> (PackageRef, bool) {
        if let Some(index) = self.entries.get_index_of(&core.id) {
            return (PackageRef::from_index(index), false);
        }
        let (index, _) = self
            .entries
            .insert_full(core.id.clone(), PackageEntry { core, accumulator });
        (PackageRef::from_index(index), true)
    }

    pub fn handle_of(&self, id: &Identifier) -> Option<PackageRef> {
        self.entries.get_index_of(id).map(PackageRef::from_index)
    }

    pub fn core(&self, handle: PackageRef) -> &PackageCore {
        &self.entries[handle.index()].core
    }

    pub fn accumulator(&self, handle: PackageRef) -> &PackageAccumulator {
        &self.entries[handle.index()].accumulator
    }

    pub fn accumulator_mut(&mut self, handle: PackageRef) -> &mut PackageAccumulator {
        &mut self.entries[handle.index()].accumulator
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn finalize(self) -> Vec<EvaluatedPackage> {
        self.entries
            .into_values()
            .map(|entry| entry.core.finalize(entry.accumulator))
            .collect()
    }
}

/// Model-level values that do not come out of the entity arenas.
#[derive(Debug, Clone, Default)]
pub struct ModelAnnotations {
    pub statistics: Statistics,
    pub severe_issue_threshold: Severity,
    pub severe_rule_violation_threshold: Severity,
    pub repository_configuration: String,
    pub labels: BTreeMap<String, String>,
    pub custom_data: BTreeMap<String, serde_json::Value>,
}

/// Every arena of one model build.
///
/// Owned exclusively by a single build and consumed by [`EntityStore::into_model`].
#[derive(Debug, Default)]
pub struct EntityStore {
    pub licenses: Interner<License>,
    pub copyrights: Interner<Copyright>,
    pub scan_results: Interner<ScanResultCore, EvaluatedScanResult>,
    pub issues: Interner<EvaluatedIssue>,
    pub issue_resolutions: Interner<IssueResolution>,
    pub rule_violation_resolutions: Interner<RuleViolationResolution>,
    pub path_excludes: Interner<PathExclude>,
    pub scope_excludes: Interner<ScopeExclude>,
    pub paths: Interner<EvaluatedPackagePath>,
    pub packages: PackageRegistry,
    pub rule_violations: Vec<EvaluatedRuleViolation>,
    pub dependency_trees: Vec<DependencyTreeNode>,
    scan_result_issues: Vec<Vec<IssueRef>>,
    declared_license_packages: BTreeMap<String, BTreeSet<Identifier>>,
    detected_license_packages: BTreeMap<String, BTreeSet<Identifier>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern_scan_result(&mut self, core: ScanResultCore) -> ScanResultRef {
        let handle = self.scan_results.add_if_required(core);
        if self.scan_result_issues.len() <= handle.index() {
            self.scan_result_issues.resize_with(handle.index() + 1, Vec::new);
        }
        handle
    }

    pub fn add_scan_result_issues(&mut self, scan_result: ScanResultRef, issues: &[IssueRef]) {
        if let Some(list) = self.scan_result_issues.get_mut(scan_result.index()) {
            for issue in issues {
                push_distinct(list, *issue);
            }
        }
    }

    /// Records that `package` declares `license`; repeated calls count once.
    pub fn record_declared_license(&mut self, license: &License, package: &Identifier) {
        self.declared_license_packages
            .entry(license.id().to_string())
            .or_default()
            .insert(package.clone());
    }

    /// Records that findings of `license` were detected in `package`; repeated calls count once.
    pub fn record_detected_license(&mut self, license: &License, package: &Identifier) {
        self.detected_license_packages
            .entry(license.id().to_string())
            .or_default()
            .insert(package.clone());
    }

    pub fn declared_license_stats(&self) -> BTreeMap<String, usize> {
        Self::count_packages(&self.declared_license_packages)
    }

    pub fn detected_license_stats(&self) -> BTreeMap<String, usize> {
        Self::count_packages(&self.detected_license_packages)
    }

    fn count_packages(
        occurrences: &BTreeMap<String, BTreeSet<Identifier>>,
    ) -> BTreeMap<String, usize> {
        occurrences
            .iter()
            .map(|(license, packages)| (license.clone(), packages.len()))
            .collect()
    }

    /// Finalizes all accumulating entities and produces the immutable model.
    pub fn into_model(self, annotations: ModelAnnotations) -> EvaluatedModel {
        let declared_license_stats = self.declared_license_stats();
        let detected_license_stats = self.detected_license_stats();

        let mut scan_result_issues = self.scan_result_issues.into_iter();
        let scan_results = self
            .scan_results
            .into_vec()
            .into_iter()
            .map(|core| core.finalize(scan_result_issues.next().unwrap_or_default()))
            .collect();

        EvaluatedModel {
            path_excludes: self.path_excludes.into_vec(),
            scope_excludes: self.scope_excludes.into_vec(),
            issue_resolutions: self.issue_resolutions.into_vec(),
            rule_violation_resolutions: self.rule_violation_resolutions.into_vec(),
            copyrights: self.copyrights.into_vec(),
            licenses: self.licenses.into_vec(),
            scan_results,
            packages: self.packages.finalize(),
            paths: self.paths.into_vec(),
            issues: self.issues.into_vec(),
            dependency_trees: self.dependency_trees,
            rule_violations: self.rule_violations,
            declared_license_stats,
            detected_license_stats,
            statistics: annotations.statistics,
            severe_issue_threshold: annotations.severe_issue_threshold,
            severe_rule_violation_threshold: annotations.severe_rule_violation_threshold,
            repository_configuration: annotations.repository_configuration,
            labels: annotations.labels,
            custom_data: annotations.custom_data,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model_building::domain::{Provenance, RemoteArtifact, ScannerDetails, VcsInfo};
    use crate::model_building::domain::Handle;

    pub(crate) fn core_for(id: &str) -> PackageCore {
        PackageCore {
            id: id.parse().unwrap(),
            is_project: false,
            definition_file_path: String::new(),
            purl: String::new(),
            declared_licenses: BTreeSet::new(),
            declared_licenses_processed: vec![],
            concluded_license: None,
            description: String::new(),
            homepage_url: String::new(),
            binary_artifact: RemoteArtifact::default(),
            source_artifact: RemoteArtifact::default(),
            vcs: VcsInfo::default(),
            vcs_processed: VcsInfo::default(),
            curations: vec![],
            is_excluded: false,
            path_excludes: vec![],
            scope_excludes: vec![],
        }
    }

    fn scan_core(code: &str) -> ScanResultCore {
        let time = "2024-01-01T00:00:00Z".parse().unwrap();
        ScanResultCore {
            provenance: Provenance::Unknown,
            scanner: ScannerDetails {
                name: "ScanCode".to_string(),
                version: "32.0.0".to_string(),
                configuration: String::new(),
            },
            start_time: time,
            end_time: time,
            file_count: 1,
            package_verification_code: code.to_string(),
        }
    }

    #[test]
    fn test_package_registry_interns_by_id() {
        let mut registry = PackageRegistry::default();
        let (first, inserted) =
            registry.add_if_required(core_for("NPM::a:1.0"), PackageAccumulator::default());
        let mut duplicate = core_for("NPM::a:1.0");
        duplicate.description = "different".to_string();
        let (second, inserted_again) =
            registry.add_if_required(duplicate, PackageAccumulator::default());

        assert!(inserted);
        assert!(!inserted_again);
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.core(first).description, "");
        assert_eq!(registry.handle_of(&"NPM::a:1.0".parse().unwrap()), Some(first));
        assert_eq!(registry.handle_of(&"NPM::b:1.0".parse().unwrap()), None);
    }

    #[test]
    fn test_license_stats_count_distinct_packages() {
        let mut store = EntityStore::new();
        let a: Identifier = "NPM::a:1.0".parse().unwrap();
        let b: Identifier = "NPM::b:1.0".parse().unwrap();
        let mit = License::new("MIT");

        store.record_declared_license(&mit, &a);
        store.record_declared_license(&mit, &a);
        store.record_declared_license(&mit, &b);
        store.record_detected_license(&License::new("Apache-2.0"), &a);

        assert_eq!(store.declared_license_stats()["MIT"], 2);
        assert_eq!(store.detected_license_stats()["Apache-2.0"], 1);
        assert!(!store.detected_license_stats().contains_key("MIT"));
    }

    #[test]
    fn test_scan_result_issues_are_distinct_per_scan() {
        let mut store = EntityStore::new();
        let first = store.intern_scan_result(scan_core("abc"));
        let again = store.intern_scan_result(scan_core("abc"));
        let other = store.intern_scan_result(scan_core("def"));
        assert_eq!(first, again);

        store.add_scan_result_issues(first, &[Handle::from_index(0), Handle::from_index(1)]);
        store.add_scan_result_issues(again, &[Handle::from_index(1)]);

        let model = store.into_model(ModelAnnotations::default());
        assert_eq!(model.scan_results.len(), 2);
        assert_eq!(model.scan_results[first.index()].issues.len(), 2);
        assert!(model.scan_results[other.index()].issues.is_empty());
    }

    #[test]
    fn test_into_model_finalizes_packages_in_registration_order() {
        let mut store = EntityStore::new();
        let (project, _) = store
            .packages
            .add_if_required(core_for("NPM::app:1.0"), PackageAccumulator::for_project());
        let (dependency, _) = store
            .packages
            .add_if_required(core_for("NPM::dep:1.0"), PackageAccumulator::default());
        store
            .packages
            .accumulator_mut(dependency)
            .add_path(Handle::from_index(0), 1);

        let model = store.into_model(ModelAnnotations {
            repository_configuration: "excludes: {}".to_string(),
            ..ModelAnnotations::default()
        });

        assert_eq!(model.packages[project.index()].levels, BTreeSet::from([0]));
        assert_eq!(model.packages[dependency.index()].levels, BTreeSet::from([1]));
        assert_eq!(model.repository_configuration, "excludes: {}");
    }
}
