use crate::model_building::domain::{Identifier, PathExclude, Project, Scope, ScopeExclude};

/// ExcludesProvider port for deciding which projects, scopes and packages are out of scope
pub trait ExcludesProvider {
    /// Returns the path excludes matching the definition file of `project`
    fn path_excludes_for(&self, project: &Project) -> Vec<PathExclude>;

    /// Returns the scope excludes matching the name of `scope`
    fn scope_excludes_for(&self, scope: &Scope) -> Vec<ScopeExclude>;

    /// Whether the package `id` is only reachable through excluded projects or scopes
    ///
    /// Packages that no project references are never excluded.
    fn is_excluded(&self, id: &Identifier) -> bool;
}

impl<T: ExcludesProvider + ?Sized> ExcludesProvider for &T {
    fn path_excludes_for(&self, project: &Project) -> Vec<PathExclude> {
        (**self).path_excludes_for(project)
    }

    fn scope_excludes_for(&self, scope: &Scope) -> Vec<ScopeExclude> {
        (**self).scope_excludes_for(scope)
    }

    fn is_excluded(&self, id: &Identifier) -> bool {
        (**self).is_excluded(id)
    }
}
