use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Catalog identifier normalized to trimmed text.
///
/// Selector values arrive as strings while catalog ids may be JSON numbers,
/// so every comparison goes through this type: `7`, `"7"` and `" 7 "` are the
/// same id. Blank input never produces an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Self::new(text),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    return Some(Self(int.to_string()));
                }
                if let Some(int) = number.as_u64() {
                    return Some(Self(int.to_string()));
                }
                let float = number.as_f64()?;
                if float.fract() == 0.0 && float.is_finite() {
                    return Some(Self(format!("{float:.0}")));
                }
                Some(Self(number.to_string()))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value when the text is a canonical non-negative integer.
    pub fn as_number(&self) -> Option<u64> {
        let parsed = self.0.parse::<u64>().ok()?;
        (parsed.to_string() == self.0).then_some(parsed)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for TargetId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for TargetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_number() {
            Some(number) => serializer.serialize_u64(number),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for TargetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| de::Error::custom(format!("invalid target id: {value}")))
    }
}
