//! Cyclic serializer and deserializer for the evaluated model.
//!
//! Encoding assigns per-type surrogate ids and writes each entity once;
//! decoding resolves ids back into handles and reconciles the issue
//! back-references that close the model's cycles.

pub mod decoder;
pub mod document;
pub mod encoder;

pub use decoder::{decode_model, reconcile};
pub use document::{ModelDocument, FORMAT_VERSION};
pub use encoder::encode_model;
