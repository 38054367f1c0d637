//! dds-model
//!
//! Canonical in-memory representation of a monitor and its identity.
//!
//! - Identity is the monitor `name` (case-sensitive, exact).
//! - Content is the [`Definition`]; the remote `id` never takes part in
//!   content comparison.
//! - Server-managed read-only fields (`created`, `modified`, `overall_state`,
//!   ...) are not modelled and are dropped on decode.
//!
//! Pure types. No IO.

pub mod filter;

pub use filter::{filter_by_name, FilterError, NameFilter};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Remote identifier, assigned by the monitoring service exclusively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonitorId(pub i64);

impl fmt::Display for MonitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MonitorId {
    fn from(v: i64) -> Self {
        MonitorId(v)
    }
}

// ---------------------------------------------------------------------------
// Definition
// ---------------------------------------------------------------------------

/// Everything about a monitor except its identity.
///
/// Compared field-for-field to decide whether an update is needed.
/// `options` is kept free-form: the service accepts a large, evolving set of
/// keys (thresholds, notify flags, renotify intervals, ...) and this tool
/// only needs to carry them through unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub options: Map<String, Value>,
}

impl Definition {
    pub fn new(kind: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Copy with `null` option values removed. The service echoes unset
    /// options back as `null`; locally they are usually just omitted.
    fn normalized(&self) -> Definition {
        let mut out = self.clone();
        out.options.retain(|_, v| !v.is_null());
        out
    }
}

// ---------------------------------------------------------------------------
// Monitor
// ---------------------------------------------------------------------------

/// A single monitoring rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    /// `None` until the monitor has been created remotely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MonitorId>,

    pub name: String,

    #[serde(flatten)]
    pub definition: Definition,
}

impl Monitor {
    pub fn new(name: impl Into<String>, definition: Definition) -> Self {
        Self {
            id: None,
            name: name.into(),
            definition,
        }
    }

    pub fn with_id(mut self, id: impl Into<MonitorId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Same monitor without its remote identifier.
    pub fn without_id(&self) -> Monitor {
        Monitor {
            id: None,
            ..self.clone()
        }
    }

    /// Identity comparison: names equal, exact and case-sensitive.
    pub fn same_identity(&self, other: &Monitor) -> bool {
        self.name == other.name
    }
}

/// Content comparison used by the matcher.
///
/// Deep equality of the definitions; `id` and `name` are not consulted.
pub fn same_definition(a: &Monitor, b: &Monitor) -> bool {
    a.definition.normalized() == b.definition.normalized()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
