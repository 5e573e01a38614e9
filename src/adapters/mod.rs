/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports,
/// providing the actual integration with the file system, the console and
/// reference implementations of the analysis collaborators.
pub mod outbound;
