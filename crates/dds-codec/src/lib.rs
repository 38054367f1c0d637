//! dds-codec
//!
//! Textual encodings of monitor sets. Two interchangeable formats, YAML and
//! JSON, both carrying the same flattened monitor shape the service uses.
//!
//! Round-trip guarantee: `unmarshal(marshal(m, f), f) == m` for every
//! well-formed set `m` and both formats. Callers that do not want to expose
//! identifiers call [`strip_ids`] before marshaling.

use dds_model::Monitor;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            other => Err(CodecError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("unsupported format '{0}'. expected one of: yaml | json")]
    UnsupportedFormat(String),

    #[error("{format} encode failed: {message}")]
    Encode { format: Format, message: String },

    #[error("{format} decode failed: {message}")]
    Decode { format: Format, message: String },

    #[error("input must be UTF-8 text")]
    NotUtf8,
}

/// Encode a monitor set.
pub fn marshal(monitors: &[Monitor], format: Format) -> Result<String, CodecError> {
    encode(&monitors, format)
}

/// Encode one monitor. Used by the plan reporter for full-content output.
pub fn marshal_one(monitor: &Monitor, format: Format) -> Result<String, CodecError> {
    encode(monitor, format)
}

fn encode<T: serde::Serialize + ?Sized>(value: &T, format: Format) -> Result<String, CodecError> {
    let encoded = match format {
        Format::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        Format::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
    };
    encoded.map_err(|message| CodecError::Encode { format, message })
}

/// Decode a monitor set. Blank input (or an explicit `null`) is an empty set.
pub fn unmarshal(text: &str, format: Format) -> Result<Vec<Monitor>, CodecError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let decoded: Result<Option<Vec<Monitor>>, String> = match format {
        Format::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        Format::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
    };
    decoded
        .map(Option::unwrap_or_default)
        .map_err(|message| CodecError::Decode { format, message })
}

/// Decode raw bytes, tolerating a leading UTF-8 BOM (editors on Windows add one).
pub fn unmarshal_bytes(bytes: &[u8], format: Format) -> Result<Vec<Monitor>, CodecError> {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|_| CodecError::NotUtf8)?;
    unmarshal(text, format)
}

/// Drop remote identifiers in place.
pub fn strip_ids(monitors: &mut [Monitor]) {
    for m in monitors.iter_mut() {
        m.id = None;
    }
}
