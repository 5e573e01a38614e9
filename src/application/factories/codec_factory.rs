use crate::adapters::outbound::codecs::{JsonModelCodec, YamlModelCodec};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ModelCodec;

/// Factory for creating model codecs
///
/// Encapsulates the choice of codec adapter for an output format so that the
/// binary only deals with the [`ModelCodec`] port.
pub struct CodecFactory;

impl CodecFactory {
    /// Creates a codec for the specified output format
    ///
    /// # Arguments
    /// * `format` - The output format to create a codec for
    /// * `pretty` - Whether JSON output is indented; YAML is always block style
    ///
    /// # Examples
    /// ```
    /// use evaluated_model::application::dto::OutputFormat;
    /// use evaluated_model::application::factories::CodecFactory;
    ///
    /// let codec = CodecFactory::create(OutputFormat::Yaml, false);
    /// ```
    pub fn create(format: OutputFormat, pretty: bool) -> Box<dyn ModelCodec> {
        match format {
            OutputFormat::Json => Box::new(JsonModelCodec::new(pretty)),
            OutputFormat::Yaml => Box::new(YamlModelCodec::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Json => "📝 Encoding model as JSON...",
            OutputFormat::Yaml => "📝 Encoding model as YAML...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_building::domain::EvaluatedModel;
    use crate::model_building::services::{EntityStore, ModelAnnotations};

    fn empty_model() -> EvaluatedModel {
        EntityStore::new().into_model(ModelAnnotations::default())
    }

    #[test]
    fn test_json_codec_round_trips_empty_model() {
        let codec = CodecFactory::create(OutputFormat::Json, true);
        let text = codec.encode(&empty_model()).unwrap();
        assert!(text.trim_start().starts_with('{'));
        assert_eq!(codec.decode(&text).unwrap(), empty_model());
    }

    #[test]
    fn test_yaml_codec_round_trips_empty_model() {
        let codec = CodecFactory::create(OutputFormat::Yaml, false);
        let text = codec.encode(&empty_model()).unwrap();
        assert!(text.starts_with("format_version: 1"));
        assert_eq!(codec.decode(&text).unwrap(), empty_model());
    }

    #[test]
    fn test_progress_message() {
        assert_eq!(
            CodecFactory::progress_message(OutputFormat::Json),
            "📝 Encoding model as JSON..."
        );
        assert_eq!(
            CodecFactory::progress_message(OutputFormat::Yaml),
            "📝 Encoding model as YAML..."
        );
    }
}
