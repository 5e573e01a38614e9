use crate::model_building::domain::EvaluatedModel;
use crate::shared::Result;

/// ModelCodec port for turning an evaluated model into a document and back
///
/// Implementations only choose the concrete text format; the graph-as-table
/// layout with surrogate ids is shared by all of them.
pub trait ModelCodec {
    /// Encodes `model` into document text
    ///
    /// # Errors
    /// Returns an error if the model references an entity missing from its own
    /// entity lists, or if the text format fails to serialize
    fn encode(&self, model: &EvaluatedModel) -> Result<String>;

    /// Decodes document text into a model with all back-references restored
    ///
    /// # Errors
    /// Returns an error for malformed documents; no partial model is returned
    fn decode(&self, content: &str) -> Result<EvaluatedModel>;
}
