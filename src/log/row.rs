//! A single log row: records keyed by name

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Records written at one point of the training timeline
///
/// Writing a name that already exists replaces the old value. Serialized as a
/// map of numbers; NaN and infinities are written as the strings `"NaN"`,
/// `"inf"` and `"-inf"` so a diverged run survives a JSON round trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogRow {
    records: BTreeMap<String, f64>,
}

impl LogRow {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a record, returning the value it replaced
    pub fn set(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        let name = name.into();
        let previous = self.records.insert(name.clone(), value);
        if let Some(old) = previous {
            tracing::debug!(record = %name, old, new = value, "log record overwritten");
        }
        previous
    }

    /// Read a record
    pub fn get(&self, name: &str) -> Option<f64> {
        self.records.get(name).copied()
    }

    /// Check if a record exists
    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Records in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.records.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the row holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// On-disk form of a record value
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RecordValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RecordValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Number(value)
        } else if value.is_nan() {
            Self::Text("NaN".to_string())
        } else if value > 0.0 {
            Self::Text("inf".to_string())
        } else {
            Self::Text("-inf".to_string())
        }
    }
}

impl RecordValue {
    fn into_f64(self) -> Result<f64, String> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(format!("invalid record value '{other}'")),
            },
        }
    }
}

impl Serialize for LogRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for (name, value) in &self.records {
            map.serialize_entry(name, &RecordValue::from(*value))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LogRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, RecordValue>::deserialize(deserializer)?;
        let records: BTreeMap<String, f64> = raw
            .into_iter()
            .map(|(name, value)| value.into_f64().map(|v| (name, v)))
            .collect::<Result<_, _>>()
            .map_err(de::Error::custom)?;
        Ok(Self { records })
    }
}
