//! Color, tone and orientation operators.
//!
//! These carry no nested nodes and are valid in both the pre- and
//! post-breakpoint families.

use crate::error::Result;
use crate::scalar::ScalarVariable;
use crate::visit::{FieldVisitor, Fields};

/// Fill transparent areas with a solid color.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BackgroundColor {
    pub color: Option<ScalarVariable<String>>,
}

impl Fields for BackgroundColor {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("color", &mut self.color)
    }
}

/// Gaussian blur.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Blur {
    pub sigma: Option<ScalarVariable<f64>>,
}

impl Fields for Blur {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("sigma", &mut self.sigma)
    }
}

/// Make pixels of a hue range transparent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChromaKey {
    pub hue: Option<ScalarVariable<f64>>,
    pub hue_feather: Option<ScalarVariable<f64>>,
    pub hue_tolerance: Option<ScalarVariable<f64>>,
    pub lightness_feather: Option<ScalarVariable<f64>>,
    pub lightness_tolerance: Option<ScalarVariable<f64>>,
    pub saturation_feather: Option<ScalarVariable<f64>>,
    pub saturation_tolerance: Option<ScalarVariable<f64>>,
}

impl Fields for ChromaKey {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("hue", &mut self.hue)?;
        v.scalar("hue_feather", &mut self.hue_feather)?;
        v.scalar("hue_tolerance", &mut self.hue_tolerance)?;
        v.scalar("lightness_feather", &mut self.lightness_feather)?;
        v.scalar("lightness_tolerance", &mut self.lightness_tolerance)?;
        v.scalar("saturation_feather", &mut self.saturation_feather)?;
        v.scalar("saturation_tolerance", &mut self.saturation_tolerance)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contrast {
    pub brightness: Option<ScalarVariable<f64>>,
    pub contrast: Option<ScalarVariable<f64>>,
}

impl Fields for Contrast {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("brightness", &mut self.brightness)?;
        v.scalar("contrast", &mut self.contrast)
    }
}

/// Randomized distortion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Goop {
    pub chaos: Option<ScalarVariable<f64>>,
    pub density: Option<ScalarVariable<i64>>,
    pub power: Option<ScalarVariable<f64>>,
    pub seed: Option<ScalarVariable<i64>>,
}

impl Fields for Goop {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("chaos", &mut self.chaos)?;
        v.scalar("density", &mut self.density)?;
        v.scalar("power", &mut self.power)?;
        v.scalar("seed", &mut self.seed)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grayscale {
    pub grayscale_type: Option<ScalarVariable<String>>,
}

impl Fields for Grayscale {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("type", &mut self.grayscale_type)
    }
}

/// Adjust hue, saturation and lightness.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hsl {
    pub hue: Option<ScalarVariable<f64>>,
    pub lightness: Option<ScalarVariable<f64>>,
    pub saturation: Option<ScalarVariable<f64>>,
}

impl Fields for Hsl {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("hue", &mut self.hue)?;
        v.scalar("lightness", &mut self.lightness)?;
        v.scalar("saturation", &mut self.saturation)
    }
}

/// Adjust hue, saturation and value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hsv {
    pub hue: Option<ScalarVariable<f64>>,
    pub saturation: Option<ScalarVariable<f64>>,
    pub value: Option<ScalarVariable<f64>>,
}

impl Fields for Hsv {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("hue", &mut self.hue)?;
        v.scalar("saturation", &mut self.saturation)?;
        v.scalar("value", &mut self.value)
    }
}

/// Reduce the palette to at most `colors` entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MaxColors {
    pub colors: Option<ScalarVariable<i64>>,
}

impl Fields for MaxColors {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("colors", &mut self.colors)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mirror {
    pub horizontal: Option<ScalarVariable<bool>>,
    pub vertical: Option<ScalarVariable<bool>>,
}

impl Fields for Mirror {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("horizontal", &mut self.horizontal)?;
        v.scalar("vertical", &mut self.vertical)
    }
}

/// Recolor the image with a single hue.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonoHue {
    pub hue: Option<ScalarVariable<f64>>,
}

impl Fields for MonoHue {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("hue", &mut self.hue)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Opacity {
    pub opacity: Option<ScalarVariable<f64>>,
}

impl Fields for Opacity {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("opacity", &mut self.opacity)
    }
}

/// Make pixels close to `color` transparent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoveColor {
    pub color: Option<ScalarVariable<String>>,
    pub feather: Option<ScalarVariable<f64>>,
    pub tolerance: Option<ScalarVariable<f64>>,
}

impl Fields for RemoveColor {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("color", &mut self.color)?;
        v.scalar("feather", &mut self.feather)?;
        v.scalar("tolerance", &mut self.tolerance)
    }
}

/// Sharpen edges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnsharpMask {
    pub gain: Option<ScalarVariable<f64>>,
    pub sigma: Option<ScalarVariable<f64>>,
    pub threshold: Option<ScalarVariable<f64>>,
}

impl Fields for UnsharpMask {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("gain", &mut self.gain)?;
        v.scalar("sigma", &mut self.sigma)?;
        v.scalar("threshold", &mut self.threshold)
    }
}
