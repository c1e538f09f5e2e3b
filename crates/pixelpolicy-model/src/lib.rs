//! pixelpolicy-model: the policy tree, its JSON document codec and
//! structural equivalence.
//!
//! The tree is an ordinary owned recursive structure: [`Transformation`]
//! nodes may nest further transformations, [`ImageNode`]s and [`Shape`]s.
//! Every struct describes its fields once through [`visit::Fields`], and
//! all codecs (here and in `pixelpolicy-flat`) walk that single listing.
//!
//! ## Overview
//!
//! - [`ScalarVariable`] -- a literal, a variable reference, or both.
//! - [`Policy`] -- the top-level aggregate.
//! - [`decode_json`] / [`encode_json`] -- the canonical document form.
//! - [`equivalent`] / [`compare`] -- change detection over documents.

pub mod equivalence;
pub mod error;
pub mod image;
pub mod json;
pub mod policy;
pub mod scalar;
pub mod shape;
pub mod transformation;
pub mod variable;
pub mod visit;

pub use equivalence::{compare, equivalent, Comparison};
pub use error::{Error, Result};
pub use image::{BoxImage, CircleImage, Image, ImageNode, PostBreakpointImage, TextImage, UrlImage};
pub use json::{decode_json, encode_json, encode_json_pretty, policy_from_value, policy_to_value};
pub use policy::{Breakpoints, OutputImage, Policy};
pub use scalar::{Scalar, ScalarKind, ScalarVariable};
pub use shape::{CircleShape, PointShape, PolygonShape, RectangleShape, Shape, UnionShape};
pub use transformation::*;
pub use variable::{EnumOption, Variable, VariableType};
pub use visit::{FieldVisitor, Fields, Node, Record, VariantInfo};
