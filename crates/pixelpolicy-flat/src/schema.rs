//! Depth-bounded attribute layouts.
//!
//! A layout is the static set of attribute paths the flat form can use for
//! a given nesting depth. It is generated from the same field listings the
//! codec walks, so the two cannot disagree about which paths exist.
//!
//! Layout size grows by roughly the variant branching factor per level.
//! Sub-layouts for the same (union, depth) pair are therefore built once
//! and shared.

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use pixelpolicy_model::{
    FieldVisitor, Fields, Image, Node, Policy, PostBreakpointTransformation, Record, Result,
    Scalar, ScalarKind, ScalarVariable, Shape, Transformation,
};

use crate::bag::join;

// ---------------------------------------------------------------------------
// SchemaKind
// ---------------------------------------------------------------------------

/// A tagged union whose layout can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Transformation,
    /// The post-breakpoint transformation family.
    TransformationRestricted,
    Image,
    Shape,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 4] = [
        Self::Transformation,
        Self::TransformationRestricted,
        Self::Image,
        Self::Shape,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transformation => "transformation",
            Self::TransformationRestricted => "transformation-restricted",
            Self::Image => "image",
            Self::Shape => "shape",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown schema kind: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// One named attribute of a layout.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    /// A leaf. `variable` leaves also own a `<name>_var` sibling.
    Scalar {
        kind: ScalarKind,
        variable: bool,
        required: bool,
    },
    /// Indexed leaves (`<name>.N`).
    List { kind: ScalarKind },
    /// A nested struct.
    Record(Arc<AttributeLayout>),
    /// Indexed nested structs.
    RecordList(Arc<AttributeLayout>),
    /// A tagged-union child; its layout holds one record per variant slot.
    Node(Arc<AttributeLayout>),
    /// Indexed tagged-union children.
    NodeList(Arc<AttributeLayout>),
}

impl Attribute {
    fn nested(&self) -> Option<(&AttributeLayout, bool)> {
        match self {
            Attribute::Record(l) | Attribute::Node(l) => Some((l, false)),
            Attribute::RecordList(l) | Attribute::NodeList(l) => Some((l, true)),
            _ => None,
        }
    }
}

/// The attributes available at one level of the flat form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeLayout {
    attributes: BTreeMap<&'static str, Attribute>,
}

impl AttributeLayout {
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Number of attributes at this level.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attributes.keys().copied()
    }

    /// Resolve a concrete bag path (`transformations.0.crop.width_var`).
    ///
    /// Returns the leaf or nested attribute the path ends at, or `None` if
    /// the path is not part of this layout.
    pub fn lookup(&self, path: &str) -> Option<&Attribute> {
        let mut layout = self;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            let attr = match layout.get(segment) {
                Some(attr) => attr,
                None => {
                    let base = segment.strip_suffix("_var")?;
                    let attr = layout.get(base)?;
                    let is_variable = matches!(attr, Attribute::Scalar { variable: true, .. });
                    return (is_variable && segments.peek().is_none()).then_some(attr);
                }
            };
            if segments.peek().is_none() {
                return Some(attr);
            }
            match attr {
                Attribute::List { .. } => {
                    let index = segments.next()?;
                    index.parse::<usize>().ok()?;
                    return segments.peek().is_none().then_some(attr);
                }
                Attribute::Scalar { .. } => return None,
                _ => {
                    let (nested, indexed) = attr.nested()?;
                    if indexed {
                        segments.next()?.parse::<usize>().ok()?;
                        if segments.peek().is_none() {
                            return Some(attr);
                        }
                    }
                    layout = nested;
                }
            }
        }
        None
    }

    /// Every leaf path, with `*` standing for list indices.
    ///
    /// The listing is exponential in depth; keep the depth small when
    /// enumerating.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_paths("", &mut out);
        out.sort_unstable();
        out
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        for (name, attr) in &self.attributes {
            let path = join(prefix, name);
            match attr {
                Attribute::Scalar { variable, .. } => {
                    if *variable {
                        out.push(format!("{path}_var"));
                    }
                    out.push(path);
                }
                Attribute::List { .. } => out.push(join(&path, "*")),
                Attribute::Record(l) | Attribute::Node(l) => l.collect_paths(&path, out),
                Attribute::RecordList(l) | Attribute::NodeList(l) => {
                    l.collect_paths(&join(&path, "*"), out)
                }
            }
        }
    }

    /// Number of leaf paths, counting each `_var` sibling.
    pub fn leaf_count(&self) -> u64 {
        let mut memo = HashMap::new();
        self.count_leaves(&mut memo)
    }

    fn count_leaves(&self, memo: &mut HashMap<*const AttributeLayout, u64>) -> u64 {
        let key = self as *const AttributeLayout;
        if let Some(count) = memo.get(&key) {
            return *count;
        }
        let count = self.attributes.values().fold(0u64, |acc, attr| {
            let n = match attr {
                Attribute::Scalar { variable: true, .. } => 2,
                Attribute::Scalar { .. } | Attribute::List { .. } => 1,
                Attribute::Record(l)
                | Attribute::RecordList(l)
                | Attribute::Node(l)
                | Attribute::NodeList(l) => l.count_leaves(memo),
            };
            acc.saturating_add(n)
        });
        memo.insert(key, count);
        count
    }

    fn insert(&mut self, name: &'static str, attr: Attribute) -> Result<()> {
        self.attributes.insert(name, attr);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

type Memo = HashMap<(TypeId, usize), Arc<AttributeLayout>>;

/// The layout of one tagged union at `depth`.
///
/// Depth 0 yields an empty layout.
pub fn generate_schema(kind: SchemaKind, depth: usize) -> Result<AttributeLayout> {
    let mut memo = Memo::new();
    let layout = match kind {
        SchemaKind::Transformation => node_layout::<Transformation>(depth, &mut memo)?,
        SchemaKind::TransformationRestricted => {
            node_layout::<PostBreakpointTransformation>(depth, &mut memo)?
        }
        SchemaKind::Image => node_layout::<Image>(depth, &mut memo)?,
        SchemaKind::Shape => node_layout::<Shape>(depth, &mut memo)?,
    };
    Ok(Arc::unwrap_or_clone(layout))
}

/// The layout of a whole policy whose pipelines nest up to `depth` levels.
pub fn policy_schema(depth: usize) -> Result<AttributeLayout> {
    let mut memo = Memo::new();
    let mut builder = SchemaBuilder::new(depth, &mut memo);
    Policy::default().visit_fields(&mut builder)?;
    Ok(builder.layout)
}

fn node_layout<N: Node>(depth: usize, memo: &mut Memo) -> Result<Arc<AttributeLayout>> {
    if depth == 0 {
        return Ok(Arc::default());
    }
    let key = (TypeId::of::<N>(), depth);
    if let Some(layout) = memo.get(&key) {
        return Ok(Arc::clone(layout));
    }

    let mut layout = AttributeLayout::default();
    for info in N::VARIANTS {
        let mut builder = SchemaBuilder::new(depth - 1, memo);
        N::build(info.slot, &mut builder)?;
        layout.insert(info.slot, Attribute::Record(Arc::new(builder.layout)))?;
    }

    let layout = Arc::new(layout);
    memo.insert(key, Arc::clone(&layout));
    Ok(layout)
}

/// Records the attributes of one record or variant.
struct SchemaBuilder<'m> {
    layout: AttributeLayout,
    depth: usize,
    memo: &'m mut Memo,
}

impl<'m> SchemaBuilder<'m> {
    fn new(depth: usize, memo: &'m mut Memo) -> Self {
        Self {
            layout: AttributeLayout::default(),
            depth,
            memo,
        }
    }

    fn record_layout<R: Record>(&mut self) -> Result<Arc<AttributeLayout>> {
        let mut builder = SchemaBuilder::new(self.depth, self.memo);
        R::default().visit_fields(&mut builder)?;
        Ok(Arc::new(builder.layout))
    }
}

impl FieldVisitor for SchemaBuilder<'_> {
    fn scalar<T: Scalar>(&mut self, name: &'static str, _: &mut Option<ScalarVariable<T>>) -> Result<()> {
        self.layout.insert(
            name,
            Attribute::Scalar {
                kind: T::KIND,
                variable: true,
                required: false,
            },
        )
    }

    fn literal<T: Scalar>(&mut self, name: &'static str, _: &mut Option<T>) -> Result<()> {
        self.layout.insert(
            name,
            Attribute::Scalar {
                kind: T::KIND,
                variable: false,
                required: false,
            },
        )
    }

    fn required<T: Scalar>(&mut self, name: &'static str, _: &mut T) -> Result<()> {
        self.layout.insert(
            name,
            Attribute::Scalar {
                kind: T::KIND,
                variable: false,
                required: true,
            },
        )
    }

    fn list<T: Scalar>(&mut self, name: &'static str, _: &mut Vec<T>) -> Result<()> {
        self.layout.insert(name, Attribute::List { kind: T::KIND })
    }

    fn record<R: Record>(&mut self, name: &'static str, _: &mut Option<R>) -> Result<()> {
        let layout = self.record_layout::<R>()?;
        self.layout.insert(name, Attribute::Record(layout))
    }

    fn records<R: Record>(&mut self, name: &'static str, _: &mut Vec<R>) -> Result<()> {
        let layout = self.record_layout::<R>()?;
        self.layout.insert(name, Attribute::RecordList(layout))
    }

    fn node<N: Node>(&mut self, name: &'static str, _: &mut Option<Box<N>>) -> Result<()> {
        let layout = node_layout::<N>(self.depth, self.memo)?;
        if layout.is_empty() {
            return Ok(());
        }
        self.layout.insert(name, Attribute::Node(layout))
    }

    fn nodes<N: Node>(&mut self, name: &'static str, _: &mut Vec<N>) -> Result<()> {
        let layout = node_layout::<N>(self.depth, self.memo)?;
        if layout.is_empty() {
            return Ok(());
        }
        self.layout.insert(name, Attribute::NodeList(layout))
    }
}
