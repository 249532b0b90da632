//! Value entity - the only record the service stores

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::ValidationError;

/// Maximum length for value names
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length for value payloads
pub const MAX_VALUE_LEN: usize = 255;

/// A named value.
///
/// Serializes with the capitalized field convention (`ID`, `Name`, `Value`)
/// regardless of which convention the storage row used. Deserialization
/// accepts both `ID`/`id`, `Name`/`name` and `Value`/`value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    #[serde(rename = "ID", alias = "id", default)]
    id: Option<i64>,

    #[serde(rename = "Name", alias = "name")]
    name: String,

    #[serde(rename = "Value", alias = "value")]
    value: String,

    #[serde(
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    created_at: Option<DateTime<Utc>>,
}

impl Value {
    /// Create a transient value with no identifier.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            value: value.into(),
            created_at: None,
        }
    }

    /// Create a value that storage has already assigned an identity to.
    pub fn persisted(
        id: i64,
        name: impl Into<String>,
        value: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            value: value.into(),
            created_at: Some(created_at),
        }
    }

    /// Decode a raw storage row (a JSON object) in either casing convention.
    ///
    /// # Example
    /// ```
    /// use values_server::models::Value;
    ///
    /// let upper = Value::from_row(serde_json::json!({"ID": 1, "Name": "a", "Value": "b"})).unwrap();
    /// let lower = Value::from_row(serde_json::json!({"id": 1, "name": "a", "value": "b"})).unwrap();
    /// assert_eq!(upper, lower);
    /// ```
    pub fn from_row(row: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(row)
    }

    /// Check the business rules.
    ///
    /// # Rules
    /// - Name and value non-empty (after trimming whitespace)
    /// - Name max 100 characters, value max 255 characters
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "Name" });
        }
        if self.value.trim().is_empty() {
            return Err(ValidationError::Empty { field: "Value" });
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "Name",
                max: MAX_NAME_LEN,
            });
        }
        if self.value.chars().count() > MAX_VALUE_LEN {
            return Err(ValidationError::TooLong {
                field: "Value",
                max: MAX_VALUE_LEN,
            });
        }
        Ok(())
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Give a transient value its storage identity. An identity that is
    /// already set is never overwritten.
    pub(crate) fn with_identity(mut self, id: i64, created_at: DateTime<Utc>) -> Self {
        if self.id.is_none() {
            self.id = Some(id);
            self.created_at = Some(created_at);
        }
        self
    }

    /// Replace name and value, keeping identity.
    pub(crate) fn set_content(&mut self, other: &Value) {
        self.name = other.name.clone();
        self.value = other.value.clone();
    }
}

/// Parse an identifier from a path segment.
///
/// Rejects empty and non-numeric input with [`ValidationError::InvalidId`].
pub fn parse_id(raw: &str) -> Result<i64, ValidationError> {
    raw.trim().parse().map_err(|_| ValidationError::InvalidId)
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| parse_timestamp(&s).map_err(serde::de::Error::custom))
        .transpose()
}

/// Accepts RFC 3339 and offset-less timestamps (read as UTC).
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_values() {
        assert!(Value::new("name", "value").validate().is_ok());
        assert!(Value::new("a", "b").validate().is_ok());
        assert!(Value::new("  padded  ", "  x ").validate().is_ok());
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert_eq!(
            Value::new("", "b").validate().unwrap_err(),
            ValidationError::Empty { field: "Name" }
        );
        assert_eq!(
            Value::new("a", "   ").validate().unwrap_err(),
            ValidationError::Empty { field: "Value" }
        );
    }

    #[test]
    fn max_lengths() {
        assert!(Value::new("a".repeat(100), "b").validate().is_ok());
        assert!(matches!(
            Value::new("a".repeat(101), "b").validate().unwrap_err(),
            ValidationError::TooLong { max: 100, .. }
        ));

        assert!(Value::new("a", "b".repeat(255)).validate().is_ok());
        assert!(matches!(
            Value::new("a", "b".repeat(256)).validate().unwrap_err(),
            ValidationError::TooLong { max: 255, .. }
        ));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 100 two-byte characters
        assert!(Value::new("é".repeat(100), "b").validate().is_ok());
    }

    #[test]
    fn row_in_either_casing() {
        let upper = Value::from_row(json!({
            "ID": 7,
            "Name": "n",
            "Value": "v",
            "created_at": "2024-03-01T10:00:00.5+00:00"
        }))
        .unwrap();
        let lower = Value::from_row(json!({
            "id": 7,
            "name": "n",
            "value": "v",
            "created_at": "2024-03-01T10:00:00.5"
        }))
        .unwrap();

        assert_eq!(upper, lower);
        assert_eq!(upper.id(), Some(7));
        assert_eq!(upper.name(), "n");
        assert!(upper.created_at().is_some());
    }

    #[test]
    fn row_without_timestamp() {
        let v = Value::from_row(json!({"id": 1, "name": "n", "value": "v"})).unwrap();
        assert_eq!(v.created_at(), None);

        let v = Value::from_row(json!({"ID": 1, "Name": "n", "Value": "v", "created_at": null}))
            .unwrap();
        assert_eq!(v.created_at(), None);
    }

    #[test]
    fn serializes_capitalized() {
        let v = Value::from_row(json!({"id": 3, "name": "n", "value": "v"})).unwrap();
        let out = serde_json::to_value(&v).unwrap();
        assert_eq!(out, json!({"ID": 3, "Name": "n", "Value": "v"}));
    }

    #[test]
    fn identity_is_assigned_once() {
        let now = Utc::now();
        let v = Value::new("n", "v").with_identity(5, now);
        assert_eq!(v.id(), Some(5));

        let v = v.with_identity(9, now);
        assert_eq!(v.id(), Some(5));
    }

    #[test]
    fn parses_ids() {
        assert_eq!(parse_id("42"), Ok(42));
        assert_eq!(parse_id(" 7 "), Ok(7));
        assert_eq!(parse_id(""), Err(ValidationError::InvalidId));
        assert_eq!(parse_id("abc"), Err(ValidationError::InvalidId));
        assert_eq!(parse_id("1.5"), Err(ValidationError::InvalidId));
    }
}
