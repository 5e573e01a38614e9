use crate::model_building::domain::EvaluatedModel;
use crate::model_building::serialization::{decode_model, encode_model, ModelDocument};
use crate::ports::outbound::ModelCodec;
use crate::shared::error::ModelError;
use crate::shared::Result;

/// JsonModelCodec adapter writing the model document as JSON
///
/// Compact output is suitable for embedding in a web page; pretty output is
/// meant for reading and diffing.
pub struct JsonModelCodec {
    pretty: bool,
}

impl JsonModelCodec {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for JsonModelCodec {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ModelCodec for JsonModelCodec {
    fn encode(&self, model: &EvaluatedModel) -> Result<String> {
        let document = encode_model(model)?;
        let text = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(text)
    }

    fn decode(&self, content: &str) -> Result<EvaluatedModel> {
        let document: ModelDocument =
            serde_json::from_str(content).map_err(|e| ModelError::MalformedDocument {
                details: e.to_string(),
            })?;
        decode_model(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_and_pretty_output() {
        let model = crate::adapters::outbound::codecs::tests::small_model();

        let compact = JsonModelCodec::new(false).encode(&model).unwrap();
        let pretty = JsonModelCodec::new(true).encode(&model).unwrap();

        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        assert!(compact.starts_with("{\"format_version\":1"));
    }

    #[test]
    fn test_round_trip() {
        let model = crate::adapters::outbound::codecs::tests::small_model();
        let codec = JsonModelCodec::default();

        let decoded = codec.decode(&codec.encode(&model).unwrap()).unwrap();
        assert_eq!(decoded, model);
    }

    #[test]
    fn test_decode_invalid_json() {
        let err = JsonModelCodec::default().decode("{ nope").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ModelError>(),
            Some(ModelError::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_decode_missing_required_field() {
        let err = JsonModelCodec::default()
            .decode(r#"{"format_version": 1, "licenses": [{"_id": 0}]}"#)
            .unwrap_err();
        assert!(format!("{}", err).contains("Malformed model document"));
    }
}
