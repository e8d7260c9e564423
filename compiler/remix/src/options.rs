//! Engine configuration.

use remix_pattern::Flags;

/// Per-engine options.
///
/// Changing options through [`Remix::set_options`](crate::Remix::set_options)
/// invalidates the compiled program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    /// Joins namespace segments. Defaults to `.`.
    pub namespace_delimiter: String,
    /// Flags applied to every joined batch. An axis listed here never
    /// splits leaves into separate batches. Defaults to `GLOBAL`.
    pub default_flags: Flags,
    /// Accept only matches starting exactly at the cursor. When off, the
    /// earliest match at or after the cursor wins. Defaults to `true`.
    pub sticky: bool,
}

impl Options {
    #[must_use]
    pub fn with_namespace_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.namespace_delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn with_default_flags(mut self, flags: Flags) -> Self {
        self.default_flags = flags;
        self
    }

    #[must_use]
    pub fn with_sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            namespace_delimiter: ".".to_owned(),
            default_flags: Flags::GLOBAL,
            sticky: true,
        }
    }
}
