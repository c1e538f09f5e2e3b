//! Leaf values and the "value or named reference" indirection.
//!
//! Every indirectable leaf in a policy is a [`ScalarVariable`]: a literal,
//! a reference to a policy [`Variable`](crate::Variable) by name, or both (the
//! literal then acts as the default when the variable is not supplied).

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// ScalarKind
// ---------------------------------------------------------------------------

/// Semantic type of a leaf slot, as recorded in attribute layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Integer,
    Number,
    String,
}

impl ScalarKind {
    /// Lowercase name used in error messages and layouts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Scalar
// ---------------------------------------------------------------------------

/// A plain value that can live in a leaf slot.
///
/// The flat form stores every literal as text regardless of its semantic
/// type; the JSON form stores it natively.
pub trait Scalar: Clone + PartialEq + fmt::Debug + 'static {
    /// How the slot is described in attribute layouts.
    const KIND: ScalarKind;

    /// Name reported when a literal fails to parse.
    const EXPECTED: &'static str;

    /// Parse the flat text form. `None` means the text is not a valid literal.
    fn parse_text(raw: &str) -> Option<Self>;

    /// Render the flat text form; the exact inverse of [`parse_text`](Scalar::parse_text).
    fn to_text(&self) -> String;

    /// Read the JSON form. `None` means the value has the wrong JSON type.
    fn from_json(value: &Value) -> Option<Self>;

    /// Render the JSON form.
    fn to_json(&self) -> Value;
}

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;
    const EXPECTED: &'static str = "boolean";

    fn parse_text(raw: &str) -> Option<Self> {
        match raw {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Scalar for i64 {
    const KIND: ScalarKind = ScalarKind::Integer;
    const EXPECTED: &'static str = "integer";

    fn parse_text(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64()
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl Scalar for f64 {
    const KIND: ScalarKind = ScalarKind::Number;
    const EXPECTED: &'static str = "number";

    fn parse_text(raw: &str) -> Option<Self> {
        raw.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn to_text(&self) -> String {
        self.to_string()
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64()
    }

    fn to_json(&self) -> Value {
        serde_json::Number::from_f64(*self)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::String;
    const EXPECTED: &'static str = "string";

    fn parse_text(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn to_text(&self) -> String {
        self.clone()
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

// ---------------------------------------------------------------------------
// ScalarVariable
// ---------------------------------------------------------------------------

/// A leaf that holds a literal, a variable reference, or both.
///
/// Instances always have at least one slot populated; an empty pair is
/// represented by the enclosing `Option` being `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarVariable<T> {
    /// The literal value (the default when `name` is also set).
    pub value: Option<T>,
    /// Name of the referenced policy variable.
    pub name: Option<String>,
}

impl<T: Scalar> ScalarVariable<T> {
    /// A literal-only leaf.
    pub fn literal(value: T) -> Self {
        Self {
            value: Some(value),
            name: None,
        }
    }

    /// A reference-only leaf, or `None` for an empty name.
    pub fn reference(name: impl Into<String>) -> Option<Self> {
        Self::from_parts(None, Some(name.into()))
    }

    /// A reference with a literal fallback. An empty name leaves a
    /// literal-only leaf.
    pub fn with_default(value: T, name: impl Into<String>) -> Self {
        let name = Some(name.into()).filter(|n| !n.is_empty());
        Self {
            value: Some(value),
            name,
        }
    }

    /// Assemble a leaf from its two slots.
    ///
    /// Empty names count as unpopulated. Returns `None` when neither slot
    /// is populated.
    pub fn from_parts(value: Option<T>, name: Option<String>) -> Option<Self> {
        let name = name.filter(|n| !n.is_empty());
        if value.is_none() && name.is_none() {
            return None;
        }
        Some(Self { value, name })
    }

    /// Whether this leaf refers to a policy variable.
    pub fn is_reference(&self) -> bool {
        self.name.is_some()
    }

    /// Render the two-slot `{"name": .., "value": ..}` JSON form.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        if let Some(name) = &self.name {
            map.insert("name".into(), Value::String(name.clone()));
        }
        if let Some(value) = &self.value {
            map.insert("value".into(), value.to_json());
        }
        Value::Object(map)
    }

    /// Read the JSON form found at `pointer`.
    ///
    /// Accepts the two-slot object, `null`, or a bare literal.
    pub fn from_json(value: &Value, pointer: &str) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Object(map) => {
                let name = match map.get("name") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(s)) => Some(s.clone()),
                    Some(other) => {
                        return Err(Error::malformed(
                            format!("{pointer}/name"),
                            "variable name",
                            other.to_string(),
                        ))
                    }
                };
                let literal = match map.get("value") {
                    None | Some(Value::Null) => None,
                    Some(raw) => Some(T::from_json(raw).ok_or_else(|| {
                        Error::malformed(format!("{pointer}/value"), T::EXPECTED, raw.to_string())
                    })?),
                };
                Ok(Self::from_parts(literal, name))
            }
            raw => T::from_json(raw)
                .map(|v| Some(Self::literal(v)))
                .ok_or_else(|| Error::malformed(pointer, T::EXPECTED, raw.to_string())),
        }
    }
}

impl<T: Scalar> From<T> for ScalarVariable<T> {
    fn from(value: T) -> Self {
        Self::literal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bool_accepts_only_canonical_text() {
        assert_eq!(bool::parse_text("true"), Some(true));
        assert_eq!(bool::parse_text("false"), Some(false));
        assert_eq!(bool::parse_text("maybe"), None);
        assert_eq!(bool::parse_text("True"), None);
        assert_eq!(bool::parse_text("1"), None);
    }

    #[test]
    fn integer_and_number_text() {
        assert_eq!(i64::parse_text("-42"), Some(-42));
        assert_eq!(i64::parse_text("4.2"), None);
        assert_eq!(f64::parse_text("4.25"), Some(4.25));
        assert_eq!(f64::parse_text("NaN"), None);
        assert_eq!(f64::parse_text(&0.1f64.to_text()), Some(0.1));
    }

    #[test]
    fn from_parts_empty_is_absent() {
        assert_eq!(ScalarVariable::<i64>::from_parts(None, None), None);
        assert_eq!(
            ScalarVariable::<i64>::from_parts(None, Some(String::new())),
            None
        );
        let only_ref = ScalarVariable::<i64>::from_parts(None, Some("w".into())).unwrap();
        assert_eq!(Some(only_ref.clone()), ScalarVariable::reference("w"));
        assert!(only_ref.is_reference());
    }

    #[test]
    fn constructors_never_hold_an_empty_name() {
        assert_eq!(ScalarVariable::<i64>::reference(""), None);
        assert_eq!(ScalarVariable::<i64>::reference(String::new()), None);

        let sv = ScalarVariable::with_default(3i64, "");
        assert_eq!(sv, ScalarVariable::literal(3));
        assert!(!sv.is_reference());
        assert_eq!(sv.to_json(), json!({"value": 3}));

        let sv = ScalarVariable::with_default(3i64, "n");
        assert_eq!(sv.name.as_deref(), Some("n"));
    }

    #[test]
    fn json_two_slot_form() {
        let sv = ScalarVariable::with_default(300i64, "width");
        assert_eq!(sv.to_json(), json!({"name": "width", "value": 300}));
        let back = ScalarVariable::<i64>::from_json(&sv.to_json(), "/w").unwrap();
        assert_eq!(back, Some(sv));
    }

    #[test]
    fn json_null_and_empty_object_are_absent() {
        assert_eq!(ScalarVariable::<f64>::from_json(&json!(null), "/x").unwrap(), None);
        assert_eq!(ScalarVariable::<f64>::from_json(&json!({}), "/x").unwrap(), None);
        assert_eq!(
            ScalarVariable::<f64>::from_json(&json!({"value": null}), "/x").unwrap(),
            None
        );
    }

    #[test]
    fn json_bare_literal() {
        let sv = ScalarVariable::<f64>::from_json(&json!(2.5), "/x").unwrap();
        assert_eq!(sv, Some(ScalarVariable::literal(2.5)));
    }

    #[test]
    fn json_wrong_type_is_malformed() {
        let err = ScalarVariable::<bool>::from_json(&json!({"value": "yes"}), "/m/horizontal")
            .unwrap_err();
        assert_eq!(
            err,
            Error::malformed("/m/horizontal/value", "boolean", "\"yes\"")
        );
    }
}
