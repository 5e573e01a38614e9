mod codec_factory;

pub use codec_factory::CodecFactory;
