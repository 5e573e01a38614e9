/// Mock implementations for testing
mod mock_collaborators;
mod mock_progress_reporter;

pub use mock_collaborators::{
    MockExcludesProvider, MockFindingsMatcher, MockResolutionProvider, MockStatisticsProvider,
};
pub use mock_progress_reporter::MockProgressReporter;
