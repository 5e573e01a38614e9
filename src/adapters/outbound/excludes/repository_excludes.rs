use crate::model_building::domain::{
    Excludes, Identifier, PackageReference, PathExclude, Project, Scope, ScopeExclude,
};
use crate::ports::outbound::ExcludesProvider;
use crate::shared::error::ModelError;
use crate::shared::Result;
use globset::{Glob, GlobMatcher};
use regex::Regex;
use std::collections::HashMap;

/// RepositoryExcludes adapter applying the excludes of a repository configuration
///
/// Path excludes are globs matched against a project's definition file, scope
/// excludes are regexes matched against the whole scope name. Package exclusion
/// is decided once at construction time from the projects that reference each
/// package.
pub struct RepositoryExcludes {
    paths: Vec<(GlobMatcher, PathExclude)>,
    scopes: Vec<(Regex, ScopeExclude)>,
    excluded: HashMap<Identifier, bool>,
}

impl RepositoryExcludes {
    /// Compiles all patterns and classifies every id the projects reference
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidPattern`] for an invalid glob or regex
    pub fn new(excludes: &Excludes, projects: &[Project]) -> Result<Self> {
        let paths = excludes
            .paths
            .iter()
            .map(|exclude| {
                let glob = Glob::new(&exclude.pattern).map_err(|e| ModelError::InvalidPattern {
                    kind: "path exclude",
                    pattern: exclude.pattern.clone(),
                    details: e.to_string(),
                })?;
                Ok((glob.compile_matcher(), exclude.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        let scopes = excludes
            .scopes
            .iter()
            .map(|exclude| {
                let regex = Regex::new(&format!("^(?:{})$", exclude.pattern)).map_err(|e| {
                    ModelError::InvalidPattern {
                        kind: "scope exclude",
                        pattern: exclude.pattern.clone(),
                        details: e.to_string(),
                    }
                })?;
                Ok((regex, exclude.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut provider = Self {
            paths,
            scopes,
            excluded: HashMap::new(),
        };
        provider.classify(projects);
        Ok(provider)
    }

    /// Marks an id as excluded only if every project or scope that reaches it is excluded.
    fn classify(&mut self, projects: &[Project]) {
        fn mark(
            excluded: &mut HashMap<Identifier, bool>,
            reference: &PackageReference,
            is_excluded: bool,
        ) {
            let entry = excluded.entry(reference.id.clone()).or_insert(true);
            *entry &= is_excluded;
            for dependency in &reference.dependencies {
                mark(excluded, dependency, is_excluded);
            }
        }

        let mut excluded = HashMap::new();
        for project in projects {
            let project_excluded = self.matches_project(project);
            *excluded.entry(project.id.clone()).or_insert(true) &= project_excluded;

            for scope in &project.scopes {
                let scope_excluded = project_excluded || self.matches_scope(scope);
                for reference in &scope.dependencies {
                    mark(&mut excluded, reference, scope_excluded);
                }
            }
        }

        tracing::debug!(
            ids = excluded.len(),
            excluded = excluded.values().filter(|is_excluded| **is_excluded).count(),
            "classified excluded ids"
        );
        self.excluded = excluded;
    }

    fn matches_project(&self, project: &Project) -> bool {
        self.paths
            .iter()
            .any(|(glob, _)| glob.is_match(&project.definition_file_path))
    }

    fn matches_scope(&self, scope: &Scope) -> bool {
        self.scopes.iter().any(|(regex, _)| regex.is_match(&scope.name))
    }
}

impl ExcludesProvider for RepositoryExcludes {
    fn path_excludes_for(&self, project: &Project) -> Vec<PathExclude> {
        self.paths
            .iter()
            .filter(|(glob, _)| glob.is_match(&project.definition_file_path))
            .map(|(_, exclude)| exclude.clone())
            .collect()
    }

    fn scope_excludes_for(&self, scope: &Scope) -> Vec<ScopeExclude> {
        self.scopes
            .iter()
            .filter(|(regex, _)| regex.is_match(&scope.name))
            .map(|(_, exclude)| exclude.clone())
            .collect()
    }

    fn is_excluded(&self, id: &Identifier) -> bool {
        self.excluded.get(id).copied().unwrap_or(false)
    }
}
