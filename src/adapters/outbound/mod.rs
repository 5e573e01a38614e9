/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod codecs;
pub mod console;
pub mod excludes;
pub mod filesystem;
pub mod matching;
pub mod resolutions;
pub mod statistics;
