/// Exclude adapters
mod repository_excludes;

pub use repository_excludes::RepositoryExcludes;
