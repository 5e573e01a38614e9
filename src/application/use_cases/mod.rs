/// Use cases module containing application business logic orchestration
mod build_evaluated_model;
mod decode_model;

pub use build_evaluated_model::BuildEvaluatedModelUseCase;
pub use decode_model::DecodeModelUseCase;
