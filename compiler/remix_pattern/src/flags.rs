//! Pattern flags.
//!
//! Three axes are tracked per pattern. Only two of them reach the regex
//! engine; the third (`GLOBAL`) exists so that patterns written for
//! continuable scanning are never joined with one-shot patterns unless the
//! engine's defaults force the axis anyway.

use bitflags::bitflags;

use crate::PatternError;

bitflags! {
    /// Observable flags of a [`Pattern`](crate::Pattern).
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct Flags: u8 {
        /// Case-insensitive matching (`i`).
        const IGNORE_CASE = 1 << 0;
        /// `^` and `$` match at line boundaries (`m`).
        const MULTILINE = 1 << 1;
        /// Continuable scanning (`g`). No effect on matching.
        const GLOBAL = 1 << 2;
    }
}

/// Flag letters in rendering order.
const LETTERS: [(char, Flags); 3] = [
    ('i', Flags::IGNORE_CASE),
    ('m', Flags::MULTILINE),
    ('g', Flags::GLOBAL),
];

impl Flags {
    /// Parse flag letters such as `"gi"`. Order and repetition don't matter.
    pub fn from_letters(letters: &str) -> Result<Self, PatternError> {
        letters.chars().try_fold(Flags::empty(), |flags, c| {
            LETTERS
                .iter()
                .find(|(letter, _)| *letter == c)
                .map(|(_, flag)| flags | *flag)
                .ok_or(PatternError::UnknownFlag { flag: c })
        })
    }

    /// Render as letters, e.g. `IGNORE_CASE | GLOBAL` becomes `"ig"`.
    pub fn letters(self) -> String {
        LETTERS
            .iter()
            .filter(|(_, flag)| self.contains(*flag))
            .map(|(letter, _)| *letter)
            .collect()
    }

    /// Check whether two flag sets agree on every axis not in `forced`.
    ///
    /// An axis present in `forced` is compatible regardless of either
    /// side's value, since the joined pattern carries it unconditionally.
    #[inline]
    pub const fn compatible_with(self, other: Flags, forced: Flags) -> bool {
        self.difference(forced).bits() == other.difference(forced).bits()
    }
}
