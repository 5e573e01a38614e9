//! Model building core: domain types, the services that assemble an
//! evaluated model, and the document layout it is serialized to.

pub mod domain;
pub mod serialization;
pub mod services;
