//! Movie payload types.

use crate::{ReelError, ReelResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded movie metadata as returned by the provider.
///
/// The shape is opaque: fields are passed through untouched, the service
/// only requires the payload to be a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieRecord(Map<String, Value>);

impl MovieRecord {
    /// Decodes a record from JSON text.
    pub fn from_json(json: &str) -> ReelResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::try_from(value)
    }

    /// Returns a field by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns the `title` field when it is a string.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Number of top-level fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the empty object `{}`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Value> for MovieRecord {
    type Error = ReelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(ReelError::decode(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Condensed entry of the popular movies listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    /// Release year, or `"Unknown"` when the provider has no release date.
    pub year: String,
    /// Average vote, or `"N/A"` when the provider has none.
    pub rating: Value,
    pub description: String,
}

impl MovieSummary {
    /// Builds a summary from one entry of the provider's `results` array.
    ///
    /// Returns `None` for entries without a numeric `id` or a string `title`.
    #[must_use]
    pub fn from_listing(entry: &Value) -> Option<Self> {
        let id = entry.get("id")?.as_i64()?;
        let title = entry.get("title")?.as_str()?.to_string();

        let year = entry
            .get("release_date")
            .and_then(Value::as_str)
            .map_or_else(|| "Unknown".to_string(), |date| date.chars().take(4).collect());

        let rating = entry
            .get("vote_average")
            .filter(|v| !v.is_null())
            .cloned()
            .unwrap_or_else(|| Value::String("N/A".to_string()));

        let description = entry
            .get("overview")
            .and_then(Value::as_str)
            .unwrap_or("No description available.")
            .to_string();

        Some(Self {
            id,
            title,
            year,
            rating,
            description,
        })
    }
}
