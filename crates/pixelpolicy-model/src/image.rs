//! Sub-images used by `Append` and `Composite`.
//!
//! Every image kind may carry one transformation that is applied to the
//! image before it is placed. The [`Family`] parameter fixes which
//! transformation union that is.

use crate::error::Result;
use crate::scalar::ScalarVariable;
use crate::transformation::{Family, PostBreakpoint, PreBreakpoint, TransformationOf};
use crate::visit::{tagged_union, FieldVisitor, Fields};

/// A solid rectangle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxImage<F: Family> {
    pub color: Option<ScalarVariable<String>>,
    pub height: Option<ScalarVariable<i64>>,
    pub transformation: Option<Box<TransformationOf<F>>>,
    pub width: Option<ScalarVariable<i64>>,
}

impl<F: Family> Fields for BoxImage<F> {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("color", &mut self.color)?;
        v.scalar("height", &mut self.height)?;
        v.node("transformation", &mut self.transformation)?;
        v.scalar("width", &mut self.width)
    }
}

/// A solid circle.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircleImage<F: Family> {
    pub color: Option<ScalarVariable<String>>,
    pub diameter: Option<ScalarVariable<i64>>,
    pub transformation: Option<Box<TransformationOf<F>>>,
    pub width: Option<ScalarVariable<i64>>,
}

impl<F: Family> Fields for CircleImage<F> {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("color", &mut self.color)?;
        v.scalar("diameter", &mut self.diameter)?;
        v.node("transformation", &mut self.transformation)?;
        v.scalar("width", &mut self.width)
    }
}

/// Rendered text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextImage<F: Family> {
    pub fill: Option<ScalarVariable<String>>,
    pub size: Option<ScalarVariable<f64>>,
    pub stroke: Option<ScalarVariable<String>>,
    pub stroke_size: Option<ScalarVariable<f64>>,
    pub text: Option<ScalarVariable<String>>,
    pub transformation: Option<Box<TransformationOf<F>>>,
    pub typeface: Option<ScalarVariable<String>>,
}

impl<F: Family> Fields for TextImage<F> {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.scalar("fill", &mut self.fill)?;
        v.scalar("size", &mut self.size)?;
        v.scalar("stroke", &mut self.stroke)?;
        v.scalar("stroke_size", &mut self.stroke_size)?;
        v.scalar("text", &mut self.text)?;
        v.node("transformation", &mut self.transformation)?;
        v.scalar("typeface", &mut self.typeface)
    }
}

/// An image fetched from a URL.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UrlImage<F: Family> {
    pub transformation: Option<Box<TransformationOf<F>>>,
    pub url: Option<ScalarVariable<String>>,
}

impl<F: Family> Fields for UrlImage<F> {
    fn visit_fields<V: FieldVisitor>(&mut self, v: &mut V) -> Result<()> {
        v.node("transformation", &mut self.transformation)?;
        v.scalar("url", &mut self.url)
    }
}

tagged_union! {
    /// A sub-image of family `F`.
    pub enum ImageNode<F: Family> {
        kind: "image",
        tag: Some("type"),
        variants: {
            Box(BoxImage<F>) = "box_image" / "Box",
            Circle(CircleImage<F>) = "circle_image" / "Circle",
            Text(TextImage<F>) = "text_image" / "Text",
            Url(UrlImage<F>) = "url_image" / "URL",
        }
    }
}

impl<F: Family> ImageNode<F> {
    /// The transformation carried by the image, if any.
    pub fn transformation(&self) -> Option<&TransformationOf<F>> {
        match self {
            ImageNode::Box(i) => i.transformation.as_deref(),
            ImageNode::Circle(i) => i.transformation.as_deref(),
            ImageNode::Text(i) => i.transformation.as_deref(),
            ImageNode::Url(i) => i.transformation.as_deref(),
        }
    }

    /// A URL image without a transformation.
    pub fn url(url: impl Into<String>) -> Self {
        ImageNode::Url(UrlImage {
            transformation: None,
            url: Some(ScalarVariable::literal(url.into())),
        })
    }
}

/// An image inside the main pipeline.
pub type Image = ImageNode<PreBreakpoint>;

/// An image inside the post-breakpoint pipeline.
pub type PostBreakpointImage = ImageNode<PostBreakpoint>;
