/// Findings matching adapters
mod proximity_matcher;

pub use proximity_matcher::{ProximityFindingsMatcher, DEFAULT_TOLERANCE_LINES};
