//! Policy variables: named values that leaves may reference.
//!
//! Variables are declared once per policy. Nothing here checks that a
//! referenced name is actually declared; that cross-tree check belongs to
//! the caller.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::Result;
use crate::scalar::{Scalar, ScalarKind};
use crate::visit::{FieldVisitor, Fields};

// ---------------------------------------------------------------------------
// VariableType
// ---------------------------------------------------------------------------

/// The semantic type of a policy variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VariableType {
    Bool,
    Number,
    Url,
    Color,
    Gravity,
    Placement,
    ScaleDimension,
    GrayscaleType,
    Aspect,
    ResizeType,
    Dimension,
    PerceptualQuality,
    #[default]
    String,
    Focus,
}

impl VariableType {
    /// Every variable type, in API order.
    pub const ALL: [VariableType; 14] = [
        Self::Bool,
        Self::Number,
        Self::Url,
        Self::Color,
        Self::Gravity,
        Self::Placement,
        Self::ScaleDimension,
        Self::GrayscaleType,
        Self::Aspect,
        Self::ResizeType,
        Self::Dimension,
        Self::PerceptualQuality,
        Self::String,
        Self::Focus,
    ];

    /// The API spelling of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Number => "number",
            Self::Url => "url",
            Self::Color => "color",
            Self::Gravity => "gravity",
            Self::Placement => "placement",
            Self::ScaleDimension => "scaleDimension",
            Self::GrayscaleType => "grayscaleType",
            Self::Aspect => "aspect",
            Self::ResizeType => "resizeType",
            Self::Dimension => "dimension",
            Self::PerceptualQuality => "perceptualQuality",
            Self::String => "string",
            Self::Focus => "focus",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown variable type: {s}"))
    }
}

impl Scalar for VariableType {
    const KIND: ScalarKind = ScalarKind::String;
    const EXPECTED: &'static str = "variable type";

    fn parse_text(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    fn to_text(&self) -> String {
        self.as_str().to_string()
    }

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().and_then(|s| s.parse().ok())
    }

    fn to_json(&self) -> Value {
        Value::String(self.as_str().to_string())
    }
}

// ---------------------------------------------------------------------------
// Variable
// ---------------------------------------------------------------------------

/// One allowed value of an enumerated variable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnumOption {
    pub id: String,
    pub value: String,
}

impl Fields for EnumOption {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.required("id", &mut self.id)?;
        v.required("value", &mut self.value)
    }
}

/// A named value declared on the policy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Variable {
    /// Unique within the policy.
    pub name: String,
    pub var_type: VariableType,
    pub default_value: String,
    pub prefix: Option<String>,
    pub postfix: Option<String>,
    pub enum_options: Vec<EnumOption>,
}

impl Variable {
    /// A variable with no prefix, postfix or enumerated options.
    pub fn new(name: impl Into<String>, var_type: VariableType, default_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            var_type,
            default_value: default_value.into(),
            ..Default::default()
        }
    }
}

impl Fields for Variable {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.required("default_value", &mut self.default_value)?;
        v.records("enum_options", &mut self.enum_options)?;
        v.required("name", &mut self.name)?;
        v.literal("postfix", &mut self.postfix)?;
        v.literal("prefix", &mut self.prefix)?;
        v.required("type", &mut self.var_type)
    }
}
