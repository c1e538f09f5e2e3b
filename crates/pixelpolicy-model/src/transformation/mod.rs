//! The transformation tagged unions.
//!
//! Two sibling unions exist: [`Transformation`] for the main pipeline and
//! [`PostBreakpointTransformation`] for operators applied after the image is
//! split per breakpoint. Generic variants are parameterised by a [`Family`]
//! marker so their nested children stay inside the same union.

use std::fmt;

use crate::visit::{tagged_union, Node};

mod adjust;
mod geometry;
mod structural;

pub use adjust::{
    BackgroundColor, Blur, ChromaKey, Contrast, Goop, Grayscale, Hsl, Hsv, MaxColors, Mirror,
    MonoHue, Opacity, RemoveColor, UnsharpMask,
};
pub use geometry::{
    AspectCrop, Crop, FaceCrop, FeatureCrop, RegionOfInterestCrop, RelativeCrop, Resize, Rotate,
    Scale, Shear, Trim,
};
pub use structural::{
    Append, Composite, Compound, FitAndFill, IfDimension, IfOrientation, ImQuery,
};

/// Selects which transformation union nested children belong to.
pub trait Family: fmt::Debug + Clone + Copy + PartialEq + Default + 'static {
    type Transformation: Node;
}

/// Marker for the main pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreBreakpoint;

/// Marker for the restricted post-breakpoint pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostBreakpoint;

impl Family for PreBreakpoint {
    type Transformation = Transformation;
}

impl Family for PostBreakpoint {
    type Transformation = PostBreakpointTransformation;
}

/// The transformation union of family `F`.
pub type TransformationOf<F> = <F as Family>::Transformation;

tagged_union! {
    /// One operation of the main pipeline.
    pub enum Transformation {
        kind: "transformation",
        tag: Some("transformation"),
        variants: {
            Append(Append) = "append" / "Append",
            AspectCrop(AspectCrop) = "aspect_crop" / "AspectCrop",
            BackgroundColor(BackgroundColor) = "background_color" / "BackgroundColor",
            Blur(Blur) = "blur" / "Blur",
            ChromaKey(ChromaKey) = "chroma_key" / "ChromaKey",
            Composite(Composite<PreBreakpoint>) = "composite" / "Composite",
            Compound(Compound<PreBreakpoint>) = "compound" / "Compound",
            Contrast(Contrast) = "contrast" / "Contrast",
            Crop(Crop) = "crop" / "Crop",
            FaceCrop(FaceCrop) = "face_crop" / "FaceCrop",
            FeatureCrop(FeatureCrop) = "feature_crop" / "FeatureCrop",
            FitAndFill(FitAndFill) = "fit_and_fill" / "FitAndFill",
            Goop(Goop) = "goop" / "Goop",
            Grayscale(Grayscale) = "grayscale" / "Grayscale",
            Hsl(Hsl) = "hsl" / "HSL",
            Hsv(Hsv) = "hsv" / "HSV",
            IfDimension(IfDimension<PreBreakpoint>) = "if_dimension" / "IfDimension",
            IfOrientation(IfOrientation<PreBreakpoint>) = "if_orientation" / "IfOrientation",
            ImQuery(ImQuery) = "im_query" / "ImQuery",
            MaxColors(MaxColors) = "max_colors" / "MaxColors",
            Mirror(Mirror) = "mirror" / "Mirror",
            MonoHue(MonoHue) = "mono_hue" / "MonoHue",
            Opacity(Opacity) = "opacity" / "Opacity",
            RegionOfInterestCrop(RegionOfInterestCrop) = "region_of_interest_crop" / "RegionOfInterestCrop",
            RelativeCrop(RelativeCrop) = "relative_crop" / "RelativeCrop",
            RemoveColor(RemoveColor) = "remove_color" / "RemoveColor",
            Resize(Resize) = "resize" / "Resize",
            Rotate(Rotate) = "rotate" / "Rotate",
            Scale(Scale) = "scale" / "Scale",
            Shear(Shear) = "shear" / "Shear",
            Trim(Trim) = "trim" / "Trim",
            UnsharpMask(UnsharpMask) = "unsharp_mask" / "UnsharpMask",
        }
    }
}

tagged_union! {
    /// One operation of the post-breakpoint pipeline.
    pub enum PostBreakpointTransformation {
        kind: "post-breakpoint transformation",
        tag: Some("transformation"),
        variants: {
            BackgroundColor(BackgroundColor) = "background_color" / "BackgroundColor",
            Blur(Blur) = "blur" / "Blur",
            ChromaKey(ChromaKey) = "chroma_key" / "ChromaKey",
            Composite(Composite<PostBreakpoint>) = "composite" / "Composite",
            Compound(Compound<PostBreakpoint>) = "compound" / "Compound",
            Contrast(Contrast) = "contrast" / "Contrast",
            Goop(Goop) = "goop" / "Goop",
            Grayscale(Grayscale) = "grayscale" / "Grayscale",
            Hsl(Hsl) = "hsl" / "HSL",
            Hsv(Hsv) = "hsv" / "HSV",
            IfDimension(IfDimension<PostBreakpoint>) = "if_dimension" / "IfDimension",
            IfOrientation(IfOrientation<PostBreakpoint>) = "if_orientation" / "IfOrientation",
            MaxColors(MaxColors) = "max_colors" / "MaxColors",
            Mirror(Mirror) = "mirror" / "Mirror",
            MonoHue(MonoHue) = "mono_hue" / "MonoHue",
            Opacity(Opacity) = "opacity" / "Opacity",
            RemoveColor(RemoveColor) = "remove_color" / "RemoveColor",
            UnsharpMask(UnsharpMask) = "unsharp_mask" / "UnsharpMask",
        }
    }
}

impl Transformation {
    /// Shorthand for a literal `MaxColors` node.
    pub fn max_colors(colors: i64) -> Self {
        Transformation::MaxColors(MaxColors {
            colors: Some(colors.into()),
        })
    }

    /// Shorthand for a literal `Blur` node.
    pub fn blur(sigma: f64) -> Self {
        Transformation::Blur(Blur {
            sigma: Some(sigma.into()),
        })
    }

    /// Shorthand for a `Compound` node.
    pub fn compound(transformations: Vec<Transformation>) -> Self {
        Transformation::Compound(Compound::new(transformations))
    }
}
