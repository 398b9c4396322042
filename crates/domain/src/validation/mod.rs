//! Structural validation of decoded JSON responses
//!
//! Checks go through [`JsonKind`] and [`FieldCheck`] so that a missing
//! field and a field of the wrong kind stay distinguishable.

mod models;

use std::fmt;

use serde_json::{Map, Value};

pub use models::validate_model_catalogue;

/// The kind of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Any number
    Number,
    /// A string
    String,
    /// An array
    Array,
    /// An object
    Object,
}

impl JsonKind {
    /// Kind of the given value.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Lower-case name used in validation messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of looking up a typed field in a JSON object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldCheck<'a> {
    /// Present with the expected kind.
    Present(&'a Value),
    /// Absent from the object.
    Missing,
    /// Present with another kind.
    WrongKind(JsonKind),
}

/// Looks up `field` in `object` and compares its kind with `expected`.
#[must_use]
pub fn check_field<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    expected: JsonKind,
) -> FieldCheck<'a> {
    match object.get(field) {
        None => FieldCheck::Missing,
        Some(value) if JsonKind::of(value) == expected => FieldCheck::Present(value),
        Some(value) => FieldCheck::WrongKind(JsonKind::of(value)),
    }
}
