/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod build_model_request;
mod model_response;
mod output_format;

pub use build_model_request::BuildModelRequest;
pub use model_response::ModelResponse;
pub use output_format::OutputFormat;
