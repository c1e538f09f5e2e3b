//! Operators that nest other transformations, images or shapes.
//!
//! The generic ones take a [`Family`] so a composite inside the
//! post-breakpoint pipeline can only ever reach post-breakpoint operators.

use crate::error::Result;
use crate::image::{Image, ImageNode};
use crate::scalar::ScalarVariable;
use crate::visit::{FieldVisitor, Fields};

use super::{Family, Transformation, TransformationOf};

/// Place another image next to the current one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Append {
    pub gravity: Option<ScalarVariable<String>>,
    pub gravity_priority: Option<ScalarVariable<String>>,
    pub image: Option<Box<Image>>,
    pub preserve_minor_dimension: Option<ScalarVariable<bool>>,
}

impl Fields for Append {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("gravity", &mut self.gravity)?;
        v.scalar("gravity_priority", &mut self.gravity_priority)?;
        v.node("image", &mut self.image)?;
        v.scalar("preserve_minor_dimension", &mut self.preserve_minor_dimension)
    }
}

/// Overlay another image on the current one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Composite<F: Family> {
    pub gravity: Option<ScalarVariable<String>>,
    pub image: Option<Box<ImageNode<F>>>,
    pub placement: Option<ScalarVariable<String>>,
    pub scale: Option<ScalarVariable<f64>>,
    pub scale_dimension: Option<ScalarVariable<String>>,
    pub x_position: Option<ScalarVariable<i64>>,
    pub y_position: Option<ScalarVariable<i64>>,
}

impl<F: Family> Fields for Composite<F> {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("gravity", &mut self.gravity)?;
        v.node("image", &mut self.image)?;
        v.scalar("placement", &mut self.placement)?;
        v.scalar("scale", &mut self.scale)?;
        v.scalar("scale_dimension", &mut self.scale_dimension)?;
        v.scalar("x_position", &mut self.x_position)?;
        v.scalar("y_position", &mut self.y_position)
    }
}

/// A sub-pipeline applied in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound<F: Family> {
    pub transformations: Vec<TransformationOf<F>>,
}

impl<F: Family> Compound<F> {
    pub fn new(transformations: Vec<TransformationOf<F>>) -> Self {
        Self { transformations }
    }
}

impl<F: Family> Fields for Compound<F> {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.nodes("transformations", &mut self.transformations)
    }
}

/// Resize to fit, then fill the remaining area with a transformed copy.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FitAndFill {
    pub fill_transformation: Option<Box<Transformation>>,
    pub height: Option<ScalarVariable<i64>>,
    pub width: Option<ScalarVariable<i64>>,
}

impl Fields for FitAndFill {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.node("fill_transformation", &mut self.fill_transformation)?;
        v.scalar("height", &mut self.height)?;
        v.scalar("width", &mut self.width)
    }
}

/// Branch on how an image dimension compares to `value`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IfDimension<F: Family> {
    pub default: Option<Box<TransformationOf<F>>>,
    pub dimension: Option<ScalarVariable<String>>,
    pub equal: Option<Box<TransformationOf<F>>>,
    pub greater_than: Option<Box<TransformationOf<F>>>,
    pub less_than: Option<Box<TransformationOf<F>>>,
    pub value: Option<ScalarVariable<i64>>,
}

impl<F: Family> Fields for IfDimension<F> {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.node("default", &mut self.default)?;
        v.scalar("dimension", &mut self.dimension)?;
        v.node("equal", &mut self.equal)?;
        v.node("greater_than", &mut self.greater_than)?;
        v.node("less_than", &mut self.less_than)?;
        v.scalar("value", &mut self.value)
    }
}

/// Branch on the image orientation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IfOrientation<F: Family> {
    pub default: Option<Box<TransformationOf<F>>>,
    pub landscape: Option<Box<TransformationOf<F>>>,
    pub portrait: Option<Box<TransformationOf<F>>>,
    pub square: Option<Box<TransformationOf<F>>>,
}

impl<F: Family> Fields for IfOrientation<F> {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.node("default", &mut self.default)?;
        v.node("landscape", &mut self.landscape)?;
        v.node("portrait", &mut self.portrait)?;
        v.node("square", &mut self.square)
    }
}

/// Apply operators named in the request query string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImQuery {
    pub allowed_transformations: Vec<String>,
    pub query: Option<ScalarVariable<String>>,
}

impl Fields for ImQuery {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.list("allowed_transformations", &mut self.allowed_transformations)?;
        v.scalar("query", &mut self.query)
    }
}
