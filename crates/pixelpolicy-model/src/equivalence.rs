//! Structural equivalence of policy documents.
//!
//! Two documents are equivalent when they decode to equal policy trees.
//! That ignores whitespace, key order and the `null` versus absent
//! distinction, while list order stays significant since it is pipeline
//! order.

use tracing::debug;

use crate::error::Error;
use crate::json::decode_json;

/// Outcome of comparing two documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Equivalent,
    Different,
    /// One of the documents could not be decoded.
    Undecidable(Error),
}

impl Comparison {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Comparison::Equivalent)
    }
}

/// Compare two JSON policy documents.
pub fn compare(a: &str, b: &str) -> Comparison {
    if a == b {
        return Comparison::Equivalent;
    }
    let left = match decode_json(a) {
        Ok(policy) => policy,
        Err(err) => return Comparison::Undecidable(err),
    };
    let right = match decode_json(b) {
        Ok(policy) => policy,
        Err(err) => return Comparison::Undecidable(err),
    };
    if left == right {
        Comparison::Equivalent
    } else {
        Comparison::Different
    }
}

/// Whether two JSON policy documents describe the same policy.
///
/// Fails closed: a document that cannot be decoded is never equivalent to
/// anything but its own exact bytes.
pub fn equivalent(a: &str, b: &str) -> bool {
    match compare(a, b) {
        Comparison::Equivalent => true,
        Comparison::Different => false,
        Comparison::Undecidable(err) => {
            debug!(error = %err, "policy documents not comparable, treating as changed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const BLUR_THEN_MAX: &str =
        r#"{"transformations":[{"blur":{"sigma":{"value":5}}},{"maxColors":{"colors":{"value":3}}}]}"#;
    const MAX_THEN_BLUR: &str =
        r#"{"transformations":[{"maxColors":{"colors":{"value":3}}},{"blur":{"sigma":{"value":5}}}]}"#;

    #[test]
    fn list_order_matters() {
        assert!(!equivalent(BLUR_THEN_MAX, MAX_THEN_BLUR));
        assert_eq!(compare(BLUR_THEN_MAX, MAX_THEN_BLUR), Comparison::Different);
    }

    #[test]
    fn formatting_and_key_order_do_not_matter() {
        let reformatted = r#"
        {
            "transformations": [
                { "blur": { "sigma": { "value": 5 } } },
                { "maxColors": { "colors": { "value": 3 } } }
            ]
        }"#;
        assert!(equivalent(BLUR_THEN_MAX, reformatted));

        let a = r#"{"hosts":["a.example"],"rolloutDuration":3600}"#;
        let b = r#"{"rolloutDuration":3600,"hosts":["a.example"]}"#;
        assert!(equivalent(a, b));
    }

    #[test]
    fn null_and_absent_are_the_same() {
        let a = r#"{"transformations":[{"transformation":"Crop","width":{"value":10},"gravity":null}]}"#;
        let b = r#"{"transformations":[{"transformation":"Crop","width":{"value":10}}]}"#;
        assert!(equivalent(a, b));
    }

    #[test]
    fn tagged_and_externally_tagged_forms_agree() {
        let tagged = r#"{"transformations":[{"transformation":"MaxColors","colors":{"value":3}}]}"#;
        let external = r#"{"transformations":[{"maxColors":{"colors":{"value":3}}}]}"#;
        assert!(equivalent(tagged, external));
    }

    #[test]
    fn scalar_slots_compare_pairwise() {
        let literal = r#"{"transformations":[{"maxColors":{"colors":{"value":3}}}]}"#;
        let both = r#"{"transformations":[{"maxColors":{"colors":{"value":3,"name":"c"}}}]}"#;
        assert!(!equivalent(literal, both));
    }

    #[test]
    fn byte_identical_short_circuits_even_when_malformed() {
        assert!(equivalent("{not json", "{not json"));
    }

    #[test]
    fn malformed_side_fails_closed() {
        assert!(!equivalent(BLUR_THEN_MAX, "{not json"));
        assert_matches!(
            compare("{not json", BLUR_THEN_MAX),
            Comparison::Undecidable(Error::MalformedDocument(_))
        );
    }
}
