//! The top-level policy aggregate.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::scalar::ScalarVariable;
use crate::transformation::{PostBreakpointTransformation, Transformation};
use crate::variable::Variable;
use crate::visit::{FieldVisitor, Fields};

/// Widths (in pixels) at which the image is split into derivatives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Breakpoints {
    pub widths: Vec<i64>,
}

impl Fields for Breakpoints {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.list("widths", &mut self.widths)
    }
}

/// Output format and quality settings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputImage {
    pub adaptive_quality: Option<i64>,
    pub allow_pristine_on_downsize: Option<bool>,
    pub allowed_formats: Vec<String>,
    pub forced_formats: Vec<String>,
    pub perceptual_quality: Option<ScalarVariable<String>>,
    pub perceptual_quality_floor: Option<i64>,
    pub prefer_modern_formats: Option<bool>,
    pub quality: Option<ScalarVariable<i64>>,
}

impl Fields for OutputImage {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.literal("adaptive_quality", &mut self.adaptive_quality)?;
        v.literal("allow_pristine_on_downsize", &mut self.allow_pristine_on_downsize)?;
        v.list("allowed_formats", &mut self.allowed_formats)?;
        v.list("forced_formats", &mut self.forced_formats)?;
        v.scalar("perceptual_quality", &mut self.perceptual_quality)?;
        v.literal("perceptual_quality_floor", &mut self.perceptual_quality_floor)?;
        v.literal("prefer_modern_formats", &mut self.prefer_modern_formats)?;
        v.scalar("quality", &mut self.quality)
    }
}

/// An image transformation policy.
///
/// Serializes to and from the canonical JSON document form (see
/// [`crate::json`]); the impls go through [`serde_json::Value`] so the
/// recursive transformation types never reach serde's generic machinery.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Policy {
    pub breakpoints: Option<Breakpoints>,
    pub hosts: Vec<String>,
    pub output: Option<OutputImage>,
    pub post_breakpoint_transformations: Vec<PostBreakpointTransformation>,
    pub rollout_duration: Option<i64>,
    pub serve_stale_duration: Option<i64>,
    pub transformations: Vec<Transformation>,
    pub variables: Vec<Variable>,
}

impl Policy {
    /// A policy consisting only of the given pipeline.
    pub fn with_transformations(transformations: Vec<Transformation>) -> Self {
        Self {
            transformations,
            ..Self::default()
        }
    }

    /// Look up a declared variable by name.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

impl Fields for Policy {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.record("breakpoints", &mut self.breakpoints)?;
        v.list("hosts", &mut self.hosts)?;
        v.record("output", &mut self.output)?;
        v.nodes("post_breakpoint_transformations", &mut self.post_breakpoint_transformations)?;
        v.literal("rollout_duration", &mut self.rollout_duration)?;
        v.literal("serve_stale_duration", &mut self.serve_stale_duration)?;
        v.nodes("transformations", &mut self.transformations)?;
        v.records("variables", &mut self.variables)
    }
}

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let value = crate::json::policy_to_value(self).map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        crate::json::policy_from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::VariableType;

    #[test]
    fn serde_roundtrip_through_value() {
        let mut policy = Policy::with_transformations(vec![
            Transformation::max_colors(2),
            Transformation::blur(1.5),
        ]);
        policy.hosts = vec!["images.example.com".into()];
        policy.rollout_duration = Some(3600);

        let json = serde_json::to_string(&policy).unwrap();
        let back: Policy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, policy);
    }

    #[test]
    fn deserialize_reports_codec_errors() {
        let err = serde_json::from_str::<Policy>(r#"{"transformations":[{"transformation":"Nope"}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("unsupported transformation variant"));
    }

    #[test]
    fn variable_lookup() {
        let mut policy = Policy::default();
        policy.variables.push(Variable::new("width", VariableType::Number, "100"));
        assert!(policy.variable("width").is_some());
        assert!(policy.variable("height").is_none());
    }
}
