pub mod dependency_tree_builder;
pub mod entity_store;
pub mod finding_attacher;
pub mod interner;
pub mod issue_enricher;
pub mod package_assembler;

#[cfg(test)]
pub(crate) mod test_support;

pub use dependency_tree_builder::DependencyTreeBuilder;
pub use entity_store::{EntityStore, ModelAnnotations, PackageRegistry};
pub use finding_attacher::FindingAttacher;
pub use interner::Interner;
pub use issue_enricher::{IssueEnricher, IssueOwner};
pub use package_assembler::PackageAssembler;
