//! Request extractors with house error handling.

pub mod validated_json;

pub use validated_json::ValidatedJson;
