/// Outbound ports (Driven ports) - Infrastructure and collaborator interfaces
///
/// These ports define the interfaces that the model builder uses to interact
/// with the file system, the console and the external analysis collaborators
/// (findings matching, resolutions, excludes, statistics).
pub mod analysis_result_reader;
pub mod excludes_provider;
pub mod findings_matcher;
pub mod model_codec;
pub mod model_document_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod resolution_provider;
pub mod scan_results_provider;
pub mod statistics_provider;

pub use analysis_result_reader::AnalysisResultReader;
pub use excludes_provider::ExcludesProvider;
pub use findings_matcher::{CopyrightGroup, FindingsGroup, FindingsMatcher};
pub use model_codec::ModelCodec;
pub use model_document_reader::ModelDocumentReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use resolution_provider::ResolutionProvider;
pub use scan_results_provider::ScanResultsProvider;
pub use statistics_provider::StatisticsProvider;
