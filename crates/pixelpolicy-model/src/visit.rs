//! The variant table shared by every codec direction.
//!
//! Each record or variant struct implements [`Fields`] once, listing its
//! fields in a fixed order. Decoders, encoders and the schema generator are
//! all [`FieldVisitor`]s walking that same listing, so adding or removing a
//! field is a single change that every direction picks up.
//!
//! Tagged unions are declared with [`tagged_union!`], which records each
//! variant's flat slot name and API name in declaration (= probe) order.

use std::fmt;

use crate::error::Result;
use crate::scalar::{Scalar, ScalarVariable};

/// Walks the fields of a record or variant.
///
/// Field names are the flat (snake_case) names; JSON visitors derive the
/// camelCase API name with [`camel_case`].
pub trait FieldVisitor {
    /// An indirectable leaf.
    fn scalar<T: Scalar>(
        &mut self,
        name: &'static str,
        slot: &mut Option<ScalarVariable<T>>,
    ) -> Result<()>;

    /// An optional plain leaf.
    fn literal<T: Scalar>(&mut self, name: &'static str, slot: &mut Option<T>) -> Result<()>;

    /// A mandatory plain leaf.
    fn required<T: Scalar>(&mut self, name: &'static str, slot: &mut T) -> Result<()>;

    /// An ordered list of plain leaves.
    fn list<T: Scalar>(&mut self, name: &'static str, slot: &mut Vec<T>) -> Result<()>;

    /// A nested non-polymorphic struct.
    fn record<R: Record>(&mut self, name: &'static str, slot: &mut Option<R>) -> Result<()>;

    /// An ordered list of nested non-polymorphic structs.
    fn records<R: Record>(&mut self, name: &'static str, slot: &mut Vec<R>) -> Result<()>;

    /// A nested tagged-union child. Consumes one level of depth.
    fn node<N: Node>(&mut self, name: &'static str, slot: &mut Option<Box<N>>) -> Result<()>;

    /// An ordered list of tagged-union children. Consumes one level of depth.
    fn nodes<N: Node>(&mut self, name: &'static str, slot: &mut Vec<N>) -> Result<()>;
}

/// A struct whose fields can be walked by a [`FieldVisitor`].
///
/// Visiting takes `&mut self` so decoders can fill slots in place; encoders
/// only read through the references they are handed.
pub trait Fields {
    fn visit_fields<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<()>;
}

/// A non-polymorphic struct usable as a nested field.
pub trait Record: Fields + Default + Clone + PartialEq + fmt::Debug + 'static {}

impl<T> Record for T where T: Fields + Default + Clone + PartialEq + fmt::Debug + 'static {}

/// Names of one variant of a tagged union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariantInfo {
    /// Flat slot name (e.g. `max_colors`).
    pub slot: &'static str,
    /// API discriminator value (e.g. `MaxColors`).
    pub api: &'static str,
}

/// A tagged union: exactly one variant is active per instance.
pub trait Node: Clone + PartialEq + fmt::Debug + Sized + 'static {
    /// Name of the union, used in errors (e.g. "transformation").
    const KIND: &'static str;

    /// JSON discriminator key, or `None` when variants are recognised by
    /// which fields they carry.
    const TAG: Option<&'static str>;

    /// Every variant, in probe order.
    const VARIANTS: &'static [VariantInfo];

    /// Names of the active variant.
    fn variant(&self) -> VariantInfo;

    /// Build a fresh instance of the variant with the given slot name and
    /// let `visitor` walk its fields. `None` for an unknown slot name.
    fn build<V: FieldVisitor>(slot: &str, visitor: &mut V) -> Result<Option<Self>>;

    /// Walk the fields of the active variant.
    fn visit_variant<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<()>;

    /// Look a variant up by its API discriminator value.
    fn variant_by_api(api: &str) -> Option<VariantInfo> {
        Self::VARIANTS.iter().copied().find(|v| v.api == api)
    }

    /// Look a variant up by its flat slot name.
    fn variant_by_slot(slot: &str) -> Option<VariantInfo> {
        Self::VARIANTS.iter().copied().find(|v| v.slot == slot)
    }
}

/// Declare a tagged union and its [`Node`] implementation.
///
/// ```ignore
/// tagged_union! {
///     pub enum Shape {
///         kind: "shape",
///         tag: None,
///         variants: {
///             Circle(CircleShape) = "circle_shape" / "Circle",
///             Point(PointShape) = "point_shape" / "Point",
///         }
///     }
/// }
/// ```
macro_rules! tagged_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident $(<$gen:ident: $bound:ident>)? {
            kind: $kind:literal,
            tag: $tag:expr,
            variants: {
                $($(#[$vmeta:meta])* $variant:ident($ty:ty) = $slot:literal / $api:literal,)+
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name $(<$gen: $bound>)? {
            $($(#[$vmeta])* $variant($ty),)+
        }

        impl $(<$gen: $bound>)? $crate::visit::Node for $name $(<$gen>)? {
            const KIND: &'static str = $kind;
            const TAG: ::std::option::Option<&'static str> = $tag;
            const VARIANTS: &'static [$crate::visit::VariantInfo] = &[
                $($crate::visit::VariantInfo { slot: $slot, api: $api },)+
            ];

            fn variant(&self) -> $crate::visit::VariantInfo {
                match self {
                    $(Self::$variant(_) => $crate::visit::VariantInfo { slot: $slot, api: $api },)+
                }
            }

            fn build<V: $crate::visit::FieldVisitor>(
                slot: &str,
                visitor: &mut V,
            ) -> $crate::Result<::std::option::Option<Self>> {
                match slot {
                    $($slot => {
                        let mut inner = <$ty as ::std::default::Default>::default();
                        $crate::visit::Fields::visit_fields(&mut inner, visitor)?;
                        Ok(Some(Self::$variant(inner)))
                    })+
                    _ => Ok(None),
                }
            }

            fn visit_variant<V: $crate::visit::FieldVisitor>(
                &mut self,
                visitor: &mut V,
            ) -> $crate::Result<()> {
                match self {
                    $(Self::$variant(inner) => $crate::visit::Fields::visit_fields(inner, visitor),)+
                }
            }
        }
    };
}

pub(crate) use tagged_union;

/// Convert a flat snake_case field name to its camelCase API name.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for ch in name.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}
