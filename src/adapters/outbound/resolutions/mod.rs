/// Resolution adapters
mod regex_resolution_provider;

pub use regex_resolution_provider::RegexResolutionProvider;
