//! Geometry used by region-of-interest cropping.
//!
//! [`Shape`] is recursive through [`UnionShape`]. Points are plain records;
//! only the shape union itself consumes depth.

use crate::error::Result;
use crate::scalar::ScalarVariable;
use crate::visit::{tagged_union, FieldVisitor, Fields};

/// A point in image coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointShape {
    pub x: Option<ScalarVariable<f64>>,
    pub y: Option<ScalarVariable<f64>>,
}

impl PointShape {
    /// A point with literal coordinates.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x: Some(ScalarVariable::literal(x)),
            y: Some(ScalarVariable::literal(y)),
        }
    }
}

impl Fields for PointShape {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("x", &mut self.x)?;
        v.scalar("y", &mut self.y)
    }
}

/// A circle around a center point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircleShape {
    pub center: Option<PointShape>,
    pub radius: Option<ScalarVariable<f64>>,
}

impl Fields for CircleShape {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.record("center", &mut self.center)?;
        v.scalar("radius", &mut self.radius)
    }
}

/// A closed polygon; point order is winding order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonShape {
    pub points: Vec<PointShape>,
}

impl Fields for PolygonShape {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.records("points", &mut self.points)
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RectangleShape {
    pub anchor: Option<PointShape>,
    pub height: Option<ScalarVariable<f64>>,
    pub width: Option<ScalarVariable<f64>>,
}

impl Fields for RectangleShape {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.record("anchor", &mut self.anchor)?;
        v.scalar("height", &mut self.height)?;
        v.scalar("width", &mut self.width)
    }
}

/// The union of several shapes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnionShape {
    pub shapes: Vec<Shape>,
}

impl Fields for UnionShape {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.nodes("shapes", &mut self.shapes)
    }
}

tagged_union! {
    /// A region of an image.
    pub enum Shape {
        kind: "shape",
        tag: None,
        variants: {
            Circle(CircleShape) = "circle_shape" / "Circle",
            Point(PointShape) = "point_shape" / "Point",
            Polygon(PolygonShape) = "polygon_shape" / "Polygon",
            Rectangle(RectangleShape) = "rectangle_shape" / "Rectangle",
            Union(UnionShape) = "union_shape" / "Union",
        }
    }
}
