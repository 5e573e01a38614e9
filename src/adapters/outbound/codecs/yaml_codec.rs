use crate::model_building::domain::EvaluatedModel;
use crate::model_building::serialization::{decode_model, encode_model, ModelDocument};
use crate::ports::outbound::ModelCodec;
use crate::shared::error::ModelError;
use crate::shared::Result;

/// YamlModelCodec adapter writing the model document as YAML
pub struct YamlModelCodec;

impl YamlModelCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlModelCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelCodec for YamlModelCodec {
    fn encode(&self, model: &EvaluatedModel) -> Result<String> {
        let document = encode_model(model)?;
        Ok(serde_yaml_ng::to_string(&document)?)
    }

    fn decode(&self, content: &str) -> Result<EvaluatedModel> {
        let document: ModelDocument =
            serde_yaml_ng::from_str(content).map_err(|e| ModelError::MalformedDocument {
                details: e.to_string(),
            })?;
        decode_model(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let model = crate::adapters::outbound::codecs::tests::small_model();
        let codec = YamlModelCodec::new();

        let text = codec.encode(&model).unwrap();
        assert!(text.contains("format_version: 1"));
        assert_eq!(codec.decode(&text).unwrap(), model);
    }

    #[test]
    fn test_decode_invalid_yaml() {
        let err = YamlModelCodec::new().decode("packages: [[[").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ModelError>(),
            Some(ModelError::MalformedDocument { .. })
        ));
    }
}
