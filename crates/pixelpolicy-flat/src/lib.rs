//! pixelpolicy-flat: the depth-bounded flat attribute form of a policy.
//!
//! Hosts that can only store a finite, statically declared attribute set
//! keep a policy as a [`FlatBag`] of dotted paths. Tagged-union nesting is
//! cut off at a fixed depth (at most [`MAX_DEPTH`]); the matching attribute
//! layout comes from [`generate_schema`] / [`policy_schema`].
//!
//! ```
//! use pixelpolicy_flat::{decode_flat, FlatBag};
//!
//! let bag = FlatBag::from_iter([("transformations.0.max_colors.colors", "2")]);
//! let policy = decode_flat(&bag).unwrap();
//! assert_eq!(policy.transformations.len(), 1);
//! ```

pub mod bag;
mod decode;
pub mod depth;
mod encode;
pub mod schema;

pub use bag::{FlatBag, FlatValue};
pub use depth::{clamp_depth, MAX_DEPTH};
pub use schema::{generate_schema, policy_schema, Attribute, AttributeLayout, SchemaKind};

use pixelpolicy_model::{Policy, Result};

/// Flat codec bound to one nesting depth.
///
/// Both directions and the layout must use the same depth for the same
/// bag, which holding it here guarantees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatCodec {
    depth: usize,
}

impl FlatCodec {
    /// A codec for `depth` levels, clamped to [`MAX_DEPTH`].
    pub fn new(depth: usize) -> Self {
        Self {
            depth: clamp_depth(depth),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn decode(&self, bag: &FlatBag) -> Result<Policy> {
        decode::decode_policy(bag, self.depth)
    }

    pub fn encode(&self, policy: &Policy) -> Result<FlatBag> {
        encode::encode_policy(policy, self.depth)
    }

    /// The policy layout for this codec's depth.
    pub fn schema(&self) -> Result<AttributeLayout> {
        policy_schema(self.depth)
    }
}

impl Default for FlatCodec {
    fn default() -> Self {
        Self { depth: MAX_DEPTH }
    }
}

/// Decode a bag at [`MAX_DEPTH`].
pub fn decode_flat(bag: &FlatBag) -> Result<Policy> {
    FlatCodec::default().decode(bag)
}

/// Encode a policy at [`MAX_DEPTH`].
pub fn encode_flat(policy: &Policy) -> Result<FlatBag> {
    FlatCodec::default().encode(policy)
}
