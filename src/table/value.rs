//! Cell values and records
//!
//! A record is a flat mapping from column key to a [`CellValue`]. Values are a
//! closed tagged union so comparison and rendering can match exhaustively.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single field value inside a record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    /// Missing or explicit `null`
    #[default]
    Absent,
}

impl CellValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write_number(f, *n),
            CellValue::Absent => Ok(()),
        }
    }
}

/// Shortest round-trip decimal form, with the non-finite spellings used by
/// JSON-producing services.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{}", n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Absent)
    }
}

/// One logical row of display data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, CellValue>,
}

/// Shared value returned for keys a record does not carry
static ABSENT: CellValue = CellValue::Absent;

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Value for `key`, or [`CellValue::Absent`] if the record has no such field
    pub fn get(&self, key: &str) -> &CellValue {
        self.fields.get(key).unwrap_or(&ABSENT)
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_like_json() {
        assert_eq!(CellValue::Number(4500.0).to_string(), "4500");
        assert_eq!(CellValue::Number(0.02).to_string(), "0.02");
        assert_eq!(CellValue::Number(-12.5).to_string(), "-12.5");
        assert_eq!(CellValue::Number(f64::NAN).to_string(), "NaN");
        assert_eq!(CellValue::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn missing_key_reads_as_absent() {
        let record = Record::new().with("k", "b");
        assert_eq!(record.get("k"), &CellValue::Text("b".into()));
        assert!(record.get("other").is_absent());
        assert_eq!(record.get("other").to_string(), "");
    }

    #[test]
    fn deserializes_heterogeneous_json() {
        let record: Record =
            serde_json::from_str(r#"{"name":"SPY","strike":440,"note":null}"#).unwrap();
        assert_eq!(record.get("name"), &CellValue::Text("SPY".into()));
        assert_eq!(record.get("strike"), &CellValue::Number(440.0));
        assert!(record.get("note").is_absent());
        assert_eq!(record.fields.len(), 3);
    }
}
