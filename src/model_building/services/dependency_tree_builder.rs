use super::entity_store::EntityStore;
use super::issue_enricher::{IssueEnricher, IssueOwner};
use crate::model_building::domain::{
    DependencyTreeNode, EvaluatedPackagePath, Identifier, IssueType, PackageRef, PackageReference,
    Project, Scope,
};
use crate::ports::outbound::{ExcludesProvider, ResolutionProvider};
use crate::shared::Result;

/// DependencyTreeBuilder mirrors each project's scopes and dependency references
/// as a tree of nodes
///
/// While walking, every package node records the route it was reached by
/// (project, scope, chain of parent ids) and the depth of that route. Node keys
/// come from a counter owned by the builder, so one builder must be used for
/// exactly one model build.
pub struct DependencyTreeBuilder<'a, RP, EP> {
    resolutions: &'a RP,
    excludes: &'a EP,
    next_key: u64,
}

impl<'a, RP, EP> DependencyTreeBuilder<'a, RP, EP>
where
    RP: ResolutionProvider,
    EP: ExcludesProvider,
{
    pub fn new(resolutions: &'a RP, excludes: &'a EP) -> Self {
        Self {
            resolutions,
            excludes,
            next_key: 0,
        }
    }

    /// Builds the tree of one project
    ///
    /// # Arguments
    /// * `store` - Arenas of the current build; every package must already be registered
    /// * `project` - The project whose scopes are walked
    ///
    /// # Returns
    /// The root node, with one child per scope in declaration order
    ///
    /// # Errors
    /// Returns an error if the project itself was never registered
    pub fn build(&mut self, store: &mut EntityStore, project: &Project) -> Result<DependencyTreeNode> {
        let project_ref = IssueEnricher::require_package(store, &project.id, "dependency tree root")?;
        let key = self.next_key();
        let path_excludes = store.packages.core(project_ref).path_excludes.clone();

        let children = project
            .scopes
            .iter()
            .map(|scope| self.scope_node(store, project_ref, &project.id, scope))
            .collect();

        Ok(DependencyTreeNode {
            title: project.id.to_string(),
            key,
            linkage: None,
            package: Some(project_ref),
            path_excludes,
            scope_excludes: Vec::new(),
            issues: Vec::new(),
            children,
        })
    }

    fn scope_node(
        &mut self,
        store: &mut EntityStore,
        project_ref: PackageRef,
        project_id: &Identifier,
        scope: &Scope,
    ) -> DependencyTreeNode {
        let key = self.next_key();
        let scope_excludes = store
            .scope_excludes
            .add_all_if_required(self.excludes.scope_excludes_for(scope));

        let mut chain = vec![project_id.clone()];
        let children = scope
            .dependencies
            .iter()
            .filter_map(|reference| {
                self.dependency_node(store, project_ref, &scope.name, reference, &mut chain)
            })
            .collect();

        DependencyTreeNode {
            title: scope.name.clone(),
            key,
            linkage: None,
            package: None,
            path_excludes: Vec::new(),
            scope_excludes,
            issues: Vec::new(),
            children,
        }
    }

    /// Walks one dependency reference; `chain` holds the ids from the project
    /// down to the reference's parent and is restored before returning.
    fn dependency_node(
        &mut self,
        store: &mut EntityStore,
        project_ref: PackageRef,
        scope_name: &str,
        reference: &PackageReference,
        chain: &mut Vec<Identifier>,
    ) -> Option<DependencyTreeNode> {
        let Some(package) = store.packages.handle_of(&reference.id) else {
            tracing::warn!(
                id = %reference.id,
                scope = scope_name,
                "skipping dependency on unknown package"
            );
            return None;
        };
        let key = self.next_key();

        let level = chain.len();
        let path = store.paths.add_if_required(EvaluatedPackagePath {
            package,
            project: project_ref,
            scope: scope_name.to_string(),
            path: chain.clone(),
        });
        store.packages.accumulator_mut(package).add_path(path, level);

        let issues = IssueEnricher::enrich_issues(
            store,
            self.resolutions,
            &reference.issues,
            IssueType::Analyzer,
            IssueOwner::package(package).with_path(path),
        );
        store
            .packages
            .accumulator_mut(package)
            .add_issues(issues.iter().copied());

        chain.push(reference.id.clone());
        let children = reference
            .dependencies
            .iter()
            .filter_map(|dependency| self.dependency_node(store, project_ref, scope_name, dependency, chain))
            .collect();
        chain.pop();

        Some(DependencyTreeNode {
            title: reference.id.to_string(),
            key,
            linkage: Some(reference.linkage),
            package: Some(package),
            path_excludes: Vec::new(),
            scope_excludes: Vec::new(),
            issues,
            children,
        })
    }

    fn next_key(&mut self) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        key
    }
}
