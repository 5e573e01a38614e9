use super::analysis_result::PackageLinkage;
use super::{IssueRef, PackageRef, PathExcludeRef, ScopeExcludeRef};

/// A node of a project's dependency tree.
///
/// Project roots and package nodes carry the package they stand for; scope
/// nodes in between carry none. `key` is unique within one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyTreeNode {
    pub title: String,
    pub key: u64,
    pub linkage: Option<PackageLinkage>,
    pub package: Option<PackageRef>,
    pub path_excludes: Vec<PathExcludeRef>,
    pub scope_excludes: Vec<ScopeExcludeRef>,
    pub issues: Vec<IssueRef>,
    pub children: Vec<DependencyTreeNode>,
}

impl DependencyTreeNode {
    /// Visits this node and all of its descendants in pre-order.
    pub fn visit<'a>(&'a self, visitor: &mut impl FnMut(&'a DependencyTreeNode)) {
        visitor(self);
        for child in &self.children {
            child.visit(visitor);
        }
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |_| count += 1);
        count
    }

    /// Length of the longest root-to-leaf chain, counting nodes.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(DependencyTreeNode::depth)
            .max()
            .unwrap_or(0)
    }
}
