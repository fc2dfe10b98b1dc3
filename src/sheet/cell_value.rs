use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed cell content as exchanged with the orchestrator.
///
/// Serialised untagged so values travel as plain JSON scalars; `Empty` is
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Boolean(bool),
    Number(f64),
    String(String),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Strips surrounding whitespace of string values; other kinds pass through.
    pub fn trimmed(self) -> Self {
        match self {
            CellValue::String(text) => CellValue::String(text.trim().to_string()),
            other => other,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(v) => f.write_str(v),
            // f64 Display already drops the trailing ".0" of integral numbers.
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Boolean(true) => f.write_str("TRUE"),
            CellValue::Boolean(false) => f.write_str("FALSE"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}
