//! Request extractors shared by handlers.
//!
//! - [`validated_json::ValidatedJson`] -- JSON body that is deserialized and
//!   range-checked before the handler runs.

pub mod validated_json;
