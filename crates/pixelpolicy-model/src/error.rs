//! Error type shared by every codec direction.
//!
//! All failures are local and structured: a decode either produces a whole
//! tree or one of these errors, never a partially populated result.

/// Failure modes of the policy codecs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A polymorphic node had no recognized variant populated.
    #[error("unsupported {kind} variant at {path}")]
    UnsupportedVariant {
        /// The tagged union being decoded (e.g. "transformation").
        kind: &'static str,
        /// The unresolved path.
        path: String,
    },

    /// A literal was present but could not be parsed as its declared type.
    #[error("malformed {expected} at {path}: {raw:?}")]
    MalformedScalar {
        /// Where the literal was found.
        path: String,
        /// The declared type of the slot.
        expected: &'static str,
        /// The raw text that failed to parse.
        raw: String,
    },

    /// A mandatory plain field was not supplied.
    #[error("missing required field at {path}")]
    MissingField {
        /// Path of the missing field.
        path: String,
    },

    /// The JSON input was not well-formed or had the wrong shape.
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

impl Error {
    /// Convenience constructor for [`Error::UnsupportedVariant`].
    pub fn unsupported(kind: &'static str, path: impl Into<String>) -> Self {
        Error::UnsupportedVariant {
            kind,
            path: path.into(),
        }
    }

    /// Convenience constructor for [`Error::MalformedScalar`].
    pub fn malformed(path: impl Into<String>, expected: &'static str, raw: impl Into<String>) -> Self {
        Error::MalformedScalar {
            path: path.into(),
            expected,
            raw: raw.into(),
        }
    }

    /// Convenience constructor for [`Error::MissingField`].
    pub fn missing(path: impl Into<String>) -> Self {
        Error::MissingField { path: path.into() }
    }

    /// Convenience constructor for [`Error::MalformedDocument`].
    pub fn document(message: impl Into<String>) -> Self {
        Error::MalformedDocument(message.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedDocument(err.to_string())
    }
}

/// Result alias using the codec [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
