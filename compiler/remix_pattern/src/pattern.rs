//! Compiled patterns.

use std::fmt;
use std::sync::Arc;

use regex::{Captures, Regex, RegexBuilder};

use crate::{Flags, PatternError};

/// An immutable compiled regular expression with its source and flags.
///
/// Cloning is cheap: the compiled program and the source text are shared.
/// Equality compares source and flags, not the compiled program.
#[derive(Clone)]
pub struct Pattern {
    source: Arc<str>,
    flags: Flags,
    regex: Regex,
}

impl Pattern {
    /// Compile `source` with no flags.
    pub fn new(source: &str) -> Result<Self, PatternError> {
        Self::with_flags(source, Flags::empty())
    }

    /// Compile `source` with the given flags.
    pub fn with_flags(source: &str, flags: Flags) -> Result<Self, PatternError> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(flags.contains(Flags::IGNORE_CASE))
            .multi_line(flags.contains(Flags::MULTILINE))
            .build()
            .map_err(|error| PatternError::Invalid {
                pattern: source.to_owned(),
                error,
            })?;
        Ok(Pattern {
            source: Arc::from(source),
            flags,
            regex,
        })
    }

    /// Parse a slash literal such as `/(bar)r/i`.
    ///
    /// Everything between the first and the last `/` is the source; the
    /// letters after the last `/` are flags.
    pub fn from_literal(literal: &str) -> Result<Self, PatternError> {
        let malformed = || PatternError::MalformedLiteral {
            literal: literal.to_owned(),
        };
        let body = literal.strip_prefix('/').ok_or_else(malformed)?;
        let (source, letters) = body.rsplit_once('/').ok_or_else(malformed)?;
        Self::with_flags(source, Flags::from_letters(letters)?)
    }

    /// The source text, without flags.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    #[inline]
    pub fn is_ignore_case(&self) -> bool {
        self.flags.contains(Flags::IGNORE_CASE)
    }

    #[inline]
    pub fn is_multiline(&self) -> bool {
        self.flags.contains(Flags::MULTILINE)
    }

    #[inline]
    pub fn is_global(&self) -> bool {
        self.flags.contains(Flags::GLOBAL)
    }

    /// Number of capturing groups, excluding the implicit whole-match group.
    ///
    /// Taken from the compiled program, so named groups count and
    /// parentheses inside character classes or escapes don't.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.regex.captures_len().saturating_sub(1)
    }

    /// Search `text` starting at byte offset `start`.
    ///
    /// Look-behind context before `start` is still visible to assertions
    /// such as `^` and `\b`. Returns `None` when `start` is past the end of
    /// `text` or not on a character boundary.
    pub fn captures_at<'t>(&self, text: &'t str, start: usize) -> Option<Captures<'t>> {
        if !text.is_char_boundary(start) {
            return None;
        }
        self.regex.captures_at(text, start)
    }

    /// Check whether the pattern matches anywhere in `text`.
    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Render as a slash literal, e.g. `/((bar)r)/ig`.
    pub fn to_literal(&self) -> String {
        format!("/{}/{}", self.source, self.flags.letters())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.flags == other.flags && self.source == other.source
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({})", self.to_literal())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags.letters())
    }
}
