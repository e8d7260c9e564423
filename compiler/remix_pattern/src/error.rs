//! Pattern construction errors.

use thiserror::Error;

/// Failure to build a [`Pattern`](crate::Pattern).
#[derive(Clone, Debug, Error)]
pub enum PatternError {
    /// The regex engine rejected the source.
    #[error("invalid pattern `{pattern}`: {error}")]
    Invalid {
        pattern: String,
        #[source]
        error: regex::Error,
    },

    /// A flag letter outside `i`, `m`, `g`.
    #[error("unknown pattern flag `{flag}`")]
    UnknownFlag { flag: char },

    /// A slash literal without its delimiters.
    #[error("malformed pattern literal `{literal}`: expected `/source/flags`")]
    MalformedLiteral { literal: String },
}
