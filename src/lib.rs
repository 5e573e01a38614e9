//! evaluated-model - assemble analysis results into an evaluated model
//!
//! This library turns the combined output of an analyzer, a scanner and an
//! evaluator into a deduplicated, cross-referenced model in which every
//! license, copyright, scan result, issue and package exists exactly once, and
//! serializes that cyclic model into a self-contained document with integer
//! surrogate ids.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`model_building`): Pure model building logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure and collaborators
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use evaluated_model::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<()> {
//! let analysis = FileSystemReader::new().read_analysis_result(Path::new("analysis-result.json"))?;
//! let config = &analysis.repository.config;
//!
//! let resolutions = RegexResolutionProvider::new(&config.resolutions)?;
//! let excludes = RepositoryExcludes::new(&config.excludes, &analysis.projects)?;
//! let statistics = CountingStatisticsProvider::new(&excludes, Severity::Error, Severity::Error);
//!
//! let use_case = BuildEvaluatedModelUseCase::new(
//!     &analysis,
//!     ProximityFindingsMatcher::default(),
//!     &resolutions,
//!     &excludes,
//!     statistics,
//!     StderrProgressReporter::new(),
//! );
//! let response = use_case.execute(&analysis, &BuildModelRequest::default())?;
//!
//! let document = JsonModelCodec::new(true).encode(&response.model)?;
//! println!("{}", document);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod model_building;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::codecs::{JsonModelCodec, YamlModelCodec};
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::excludes::RepositoryExcludes;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::matching::ProximityFindingsMatcher;
    pub use crate::adapters::outbound::resolutions::RegexResolutionProvider;
    pub use crate::adapters::outbound::statistics::CountingStatisticsProvider;
    pub use crate::application::dto::{BuildModelRequest, ModelResponse, OutputFormat};
    pub use crate::application::factories::CodecFactory;
    pub use crate::application::use_cases::{BuildEvaluatedModelUseCase, DecodeModelUseCase};
    pub use crate::model_building::domain::{
        AnalysisResult, DependencyTreeNode, EvaluatedModel, EvaluatedPackage, Handle,
        Identifier, Severity,
    };
    pub use crate::model_building::serialization::{decode_model, encode_model, ModelDocument};
    pub use crate::ports::outbound::{
        AnalysisResultReader, ExcludesProvider, FindingsMatcher, ModelCodec,
        ModelDocumentReader, OutputPresenter, ProgressReporter, ResolutionProvider,
        ScanResultsProvider, StatisticsProvider,
    };
    pub use crate::shared::Result;
}
