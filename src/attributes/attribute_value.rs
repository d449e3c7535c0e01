use chrono::{DateTime, Utc};

/// A resolved attribute value in its native semantic type.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
    List(Vec<Self>),
}

impl AttributeValue {
    /// Build a list-of-strings value from a slice of strings.
    #[must_use]
    pub fn strings(values: &[String]) -> Self {
        Self::List(values.iter().map(|s| Self::String(s.clone())).collect())
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}
