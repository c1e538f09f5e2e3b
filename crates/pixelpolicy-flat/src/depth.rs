//! The nesting depth cap.

use tracing::warn;

/// Deepest tagged-union nesting the flat form carries.
///
/// The attribute layout grows by roughly the variant branching factor per
/// level; seven levels keeps it within what hosts accept.
pub const MAX_DEPTH: usize = 7;

/// Clamp a requested depth to [`MAX_DEPTH`].
pub fn clamp_depth(requested: usize) -> usize {
    if requested > MAX_DEPTH {
        warn!(requested, max = MAX_DEPTH, "policy depth above maximum, clamping");
        MAX_DEPTH
    } else {
        requested
    }
}
