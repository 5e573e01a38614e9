/// Model document codecs
mod json_codec;
mod yaml_codec;

pub use json_codec::JsonModelCodec;
pub use yaml_codec::YamlModelCodec;
