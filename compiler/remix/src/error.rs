//! Engine errors.

use remix_pattern::PatternError;
use remix_template::TemplateError;
use thiserror::Error;

use crate::EngineId;

/// Failure of a compile or scan operation.
///
/// Not finding a match is not an error: `exec` returns `Ok(None)`.
#[derive(Clone, Debug, Error)]
pub enum RemixError {
    /// A template leaf could not be expanded or compiled.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// `reject` without a successful `exec` to undo.
    #[error("{engine} has no accepted match to reject")]
    InvalidState { engine: EngineId },

    /// The pattern engine rejected a joined batch source.
    #[error(
        "cannot build joined pattern for batch [{}]: {source}",
        .namespaces.join(", ")
    )]
    PatternConstruction {
        /// Namespaces of the batch members, in member order.
        namespaces: Vec<String>,
        #[source]
        source: PatternError,
    },
}
