//! # Shared Trace Model (Tracer ↔ Playback)
//!
//! Defines the event types recorded by the call interceptor and consumed by
//! everything downstream of it: the tree and stack reconstructors, the
//! playback cursor, exporters, and any tool reading a saved trace file.
//!
//! ## Key Types
//!
//! - [`Value`] - Closed, tagged payload for arguments and return values
//! - [`CallId`] - Per-trace call identifier (assigned from 0, monotonically)
//! - [`CallEvent`] / [`ReturnEvent`] - Entry and exit of one invocation
//! - [`TraceEvent`] - The `call` / `return` union stored in a trace
//!
//! ## Wire Format
//!
//! With the `serde` feature enabled, events serialize as tagged JSON objects:
//!
//! ```text
//! {"type":"call","id":1,"parentId":0,"functionName":"fibonacci","arguments":[2]}
//! {"type":"return","id":1,"value":1}
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Values
// ============================================================================

/// Argument or return payload of a traced call.
///
/// Serializes untagged, so a trace file holds plain JSON scalars and arrays.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    /// Integer view of the value. Floats with no fractional part convert.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Largest integer not above the value; `None` for non-numbers
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn floor_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(f) if f.is_finite() => Some(f.floor() as i64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// True for `Int` and `Float`
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Short type label used in error messages
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Render an argument list as `a, b, c`
#[must_use]
pub fn join_values(values: &[Value]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

// ============================================================================
// Events
// ============================================================================

/// Call identifier, unique within one trace.
///
/// Assigned from 0 in entry order; the root call of every trace is `CallId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct CallId(pub u64);

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Emitted the instant an intercepted invocation is entered
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub struct CallEvent {
    pub id: CallId,
    /// Call on top of the shadow stack at entry; `None` for the root
    pub parent_id: Option<CallId>,
    pub function_name: String,
    pub arguments: Vec<Value>,
}

impl CallEvent {
    /// `name(a, b)` rendering used by every view
    #[must_use]
    pub fn signature(&self) -> String {
        format!("{}({})", self.function_name, join_values(&self.arguments))
    }
}

/// Emitted when an invocation produces a result.
///
/// Failing invocations never get one.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReturnEvent {
    pub id: CallId,
    pub value: Value,
}

/// One entry of a trace, in chronological order of entry/exit
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(tag = "type", rename_all = "lowercase")
)]
pub enum TraceEvent {
    Call(CallEvent),
    Return(ReturnEvent),
}

impl TraceEvent {
    /// Id of the call this event belongs to
    #[must_use]
    pub fn id(&self) -> CallId {
        match self {
            TraceEvent::Call(call) => call.id,
            TraceEvent::Return(ret) => ret.id,
        }
    }

    #[must_use]
    pub fn as_call(&self) -> Option<&CallEvent> {
        match self {
            TraceEvent::Call(call) => Some(call),
            TraceEvent::Return(_) => None,
        }
    }

    #[must_use]
    pub fn as_return(&self) -> Option<&ReturnEvent> {
        match self {
            TraceEvent::Return(ret) => Some(ret),
            TraceEvent::Call(_) => None,
        }
    }

    #[must_use]
    pub fn is_call(&self) -> bool {
        matches!(self, TraceEvent::Call(_))
    }
}
