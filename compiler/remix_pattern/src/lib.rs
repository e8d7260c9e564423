//! Host pattern values for ReMix.
//!
//! ReMix never matches text itself. Every leaf, every joined batch and every
//! registered template is a [`Pattern`]: a compiled `regex::Regex` that keeps
//! its source text and a small set of [`Flags`] around, because the batch
//! compiler needs both to decide which patterns may be joined and to rebuild
//! joined sources.
//!
//! # Primitives used by the rest of the workspace
//!
//! - construct from source: [`Pattern::with_flags`], [`Pattern::from_literal`]
//! - execute from an offset: [`Pattern::captures_at`]
//! - report capture groups: [`Pattern::group_count`]
//! - boolean test: [`Pattern::is_match`]

mod error;
mod flags;
mod pattern;

pub use error::PatternError;
pub use flags::Flags;
pub use pattern::Pattern;

/// Re-exported so callers can name capture results without depending on
/// `regex` directly.
pub use regex::Captures;
