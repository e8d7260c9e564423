//! ReMix Templates - named pattern registry and placeholder expansion.
//!
//! This crate provides:
//! - [`Registry`]: an explicitly constructed, shareable, append-only map from
//!   identifier to [`Pattern`](remix_pattern::Pattern)
//! - [`resolve_template`] / [`expand_template`]: `{identifier}` placeholder
//!   substitution producing a concrete pattern
//! - the builtin templates of [`Registry::with_builtins`]
//!
//! # Template Syntax
//!
//! | Text          | Meaning                                              |
//! |---------------|------------------------------------------------------|
//! | `{word}`      | registered `word` wrapped in a non-capturing group   |
//! | `{word+}`     | one or more (`*` zero or more, `?` optional)         |
//! | `\{word}`     | literal brace, left as written                       |
//! | `{2,3}`       | regex repetition, left as written                    |
//! | `\p{Greek}`   | regex escape with braces, left as written            |
//! | `word+`       | a bare template is one placeholder                   |
//!
//! Unregistered identifiers expand to their own text. This fallback is
//! permissive on purpose and logged at `debug` level.

mod builtins;
mod error;
mod registry;
mod template;

pub use error::TemplateError;
pub use registry::{Definition, Registry};
pub use template::{expand_template, resolve_template};
