//! Registry and template errors.

use remix_pattern::PatternError;
use thiserror::Error;

/// Failure while registering or expanding a template.
#[derive(Clone, Debug, Error)]
pub enum TemplateError {
    /// The identifier is already registered. The registry is unchanged.
    #[error("template identifier `{identifier}` is already registered")]
    DuplicateIdentifier { identifier: String },

    /// A brace group that starts like a placeholder but isn't one.
    #[error("malformed placeholder `{placeholder}` at byte {offset} of template `{template}`")]
    MalformedTemplate {
        template: String,
        placeholder: String,
        offset: usize,
    },

    /// The expanded source was rejected by the pattern engine.
    #[error(transparent)]
    Pattern(#[from] PatternError),
}
