//! Policy engine API models

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Serialize};

/// Listing of feed metadata. Carries no fields of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedMetadataListing {}

impl FeedMetadataListing {
    pub fn new() -> Self {
        Self {}
    }

    /// Build from a decoded JSON object; unknown keys are ignored.
    ///
    /// Arrays (including `[]`) and scalars are rejected.
    pub fn from_dict(dict: &serde_json::Value) -> Result<Self, serde_json::Error> {
        if !dict.is_object() {
            return Err(serde_json::Error::invalid_type(unexpected(dict), &"a JSON object"));
        }
        Self::deserialize(dict)
    }
}

fn unexpected(value: &serde_json::Value) -> Unexpected<'_> {
    match value {
        serde_json::Value::Null => Unexpected::Unit,
        serde_json::Value::Bool(b) => Unexpected::Bool(*b),
        serde_json::Value::Number(_) => Unexpected::Other("number"),
        serde_json::Value::String(s) => Unexpected::Str(s),
        serde_json::Value::Array(_) => Unexpected::Seq,
        serde_json::Value::Object(_) => Unexpected::Map,
    }
}
