//! Operators that change the image geometry.
//!
//! None of these is valid after breakpoint splitting, so they appear only
//! in [`Transformation`](crate::Transformation).

use crate::error::Result;
use crate::scalar::ScalarVariable;
use crate::shape::Shape;
use crate::visit::{FieldVisitor, Fields};

/// Crop to an aspect ratio.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AspectCrop {
    pub allow_expansion: Option<ScalarVariable<bool>>,
    pub height: Option<ScalarVariable<f64>>,
    pub width: Option<ScalarVariable<f64>>,
    pub x_position: Option<ScalarVariable<f64>>,
    pub y_position: Option<ScalarVariable<f64>>,
}

impl Fields for AspectCrop {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("allow_expansion", &mut self.allow_expansion)?;
        v.scalar("height", &mut self.height)?;
        v.scalar("width", &mut self.width)?;
        v.scalar("x_position", &mut self.x_position)?;
        v.scalar("y_position", &mut self.y_position)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Crop {
    pub allow_expansion: Option<ScalarVariable<bool>>,
    pub gravity: Option<ScalarVariable<String>>,
    pub height: Option<ScalarVariable<i64>>,
    pub width: Option<ScalarVariable<i64>>,
    pub x_position: Option<ScalarVariable<i64>>,
    pub y_position: Option<ScalarVariable<i64>>,
}

impl Fields for Crop {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("allow_expansion", &mut self.allow_expansion)?;
        v.scalar("gravity", &mut self.gravity)?;
        v.scalar("height", &mut self.height)?;
        v.scalar("width", &mut self.width)?;
        v.scalar("x_position", &mut self.x_position)?;
        v.scalar("y_position", &mut self.y_position)
    }
}

/// Crop around detected faces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceCrop {
    pub algorithm: Option<ScalarVariable<String>>,
    pub bounding_box: Option<ScalarVariable<String>>,
    pub confidence: Option<ScalarVariable<f64>>,
    pub fail_gravity: Option<ScalarVariable<String>>,
    pub focus: Option<ScalarVariable<String>>,
    pub gravity: Option<ScalarVariable<String>>,
    pub height: Option<ScalarVariable<i64>>,
    pub padding: Option<ScalarVariable<i64>>,
    pub style: Option<ScalarVariable<String>>,
    pub width: Option<ScalarVariable<i64>>,
}

impl Fields for FaceCrop {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("algorithm", &mut self.algorithm)?;
        v.scalar("bounding_box", &mut self.bounding_box)?;
        v.scalar("confidence", &mut self.confidence)?;
        v.scalar("fail_gravity", &mut self.fail_gravity)?;
        v.scalar("focus", &mut self.focus)?;
        v.scalar("gravity", &mut self.gravity)?;
        v.scalar("height", &mut self.height)?;
        v.scalar("padding", &mut self.padding)?;
        v.scalar("style", &mut self.style)?;
        v.scalar("width", &mut self.width)
    }
}

/// Crop around high-contrast features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCrop {
    pub fail_gravity: Option<ScalarVariable<String>>,
    pub feature_radius: Option<ScalarVariable<i64>>,
    pub gravity: Option<ScalarVariable<String>>,
    pub height: Option<ScalarVariable<i64>>,
    pub max_features: Option<ScalarVariable<i64>>,
    pub min_feature_quality: Option<ScalarVariable<f64>>,
    pub padding: Option<ScalarVariable<i64>>,
    pub style: Option<ScalarVariable<String>>,
    pub width: Option<ScalarVariable<i64>>,
}

impl Fields for FeatureCrop {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("fail_gravity", &mut self.fail_gravity)?;
        v.scalar("feature_radius", &mut self.feature_radius)?;
        v.scalar("gravity", &mut self.gravity)?;
        v.scalar("height", &mut self.height)?;
        v.scalar("max_features", &mut self.max_features)?;
        v.scalar("min_feature_quality", &mut self.min_feature_quality)?;
        v.scalar("padding", &mut self.padding)?;
        v.scalar("style", &mut self.style)?;
        v.scalar("width", &mut self.width)
    }
}

/// Crop to a shape-described region.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionOfInterestCrop {
    pub gravity: Option<ScalarVariable<String>>,
    pub height: Option<ScalarVariable<i64>>,
    pub region_of_interest: Option<Box<Shape>>,
    pub style: Option<ScalarVariable<String>>,
    pub width: Option<ScalarVariable<i64>>,
}

impl Fields for RegionOfInterestCrop {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("gravity", &mut self.gravity)?;
        v.scalar("height", &mut self.height)?;
        v.node("region_of_interest", &mut self.region_of_interest)?;
        v.scalar("style", &mut self.style)?;
        v.scalar("width", &mut self.width)
    }
}

/// Shrink or grow each edge by a number of pixels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RelativeCrop {
    pub east: Option<ScalarVariable<i64>>,
    pub north: Option<ScalarVariable<i64>>,
    pub south: Option<ScalarVariable<i64>>,
    pub west: Option<ScalarVariable<i64>>,
}

impl Fields for RelativeCrop {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("east", &mut self.east)?;
        v.scalar("north", &mut self.north)?;
        v.scalar("south", &mut self.south)?;
        v.scalar("west", &mut self.west)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resize {
    pub aspect: Option<ScalarVariable<String>>,
    pub height: Option<ScalarVariable<i64>>,
    pub resize_type: Option<ScalarVariable<String>>,
    pub width: Option<ScalarVariable<i64>>,
}

impl Fields for Resize {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("aspect", &mut self.aspect)?;
        v.scalar("height", &mut self.height)?;
        v.scalar("type", &mut self.resize_type)?;
        v.scalar("width", &mut self.width)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rotate {
    pub degrees: Option<ScalarVariable<f64>>,
}

impl Fields for Rotate {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("degrees", &mut self.degrees)
    }
}

/// Scale by a factor in each dimension.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scale {
    pub height: Option<ScalarVariable<f64>>,
    pub width: Option<ScalarVariable<f64>>,
}

impl Fields for Scale {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("height", &mut self.height)?;
        v.scalar("width", &mut self.width)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shear {
    pub x_shear: Option<ScalarVariable<f64>>,
    pub y_shear: Option<ScalarVariable<f64>>,
}

impl Fields for Shear {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("x_shear", &mut self.x_shear)?;
        v.scalar("y_shear", &mut self.y_shear)
    }
}

/// Remove uniform borders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trim {
    pub fuzz: Option<ScalarVariable<f64>>,
    pub padding: Option<ScalarVariable<i64>>,
}

impl Fields for Trim {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("fuzz", &mut self.fuzz)?;
        v.scalar("padding", &mut self.padding)
    }
}
