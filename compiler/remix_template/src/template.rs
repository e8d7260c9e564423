//! Placeholder expansion.
//!
//! Expansion is a single left-to-right pass over the template bytes. All
//! syntax characters are ASCII, so slicing only ever happens at ASCII
//! positions and multi-byte text is copied through untouched.

use remix_pattern::{Flags, Pattern};

use crate::{Registry, TemplateError};

/// Expand `text` against `registry` and compile the result into one pattern.
pub fn resolve_template(registry: &Registry, text: &str) -> Result<Pattern, TemplateError> {
    let source = expand_template(registry, text)?;
    Ok(Pattern::new(&source)?)
}

/// Expand the placeholders of `text` without compiling.
pub fn expand_template(registry: &Registry, text: &str) -> Result<String, TemplateError> {
    if let Some(placeholder) = Placeholder::parse(text) {
        return Ok(placeholder.substitute(registry));
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    // Start of the literal run not yet copied to `out`.
    let mut copied = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos = skip_escape(bytes, pos),
            b'{' => {
                let Some(len) = bytes[pos + 1..].iter().position(|&b| b == b'}') else {
                    // Unterminated: the rest is literal.
                    break;
                };
                let close = pos + 1 + len;
                let inner = &text[pos + 1..close];
                if inner.contains('{') || !starts_like_identifier(inner) {
                    pos += 1;
                    continue;
                }
                let placeholder = Placeholder::parse(inner.trim()).ok_or_else(|| {
                    TemplateError::MalformedTemplate {
                        template: text.to_owned(),
                        placeholder: text[pos..=close].to_owned(),
                        offset: pos,
                    }
                })?;
                out.push_str(&text[copied..pos]);
                out.push_str(&placeholder.substitute(registry));
                pos = close + 1;
                copied = pos;
            }
            _ => pos += 1,
        }
    }

    out.push_str(&text[copied..]);
    Ok(out)
}

/// `identifier` followed by at most one of `+`, `*`, `?`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Placeholder<'a> {
    identifier: &'a str,
    modifier: &'a str,
}

impl<'a> Placeholder<'a> {
    fn parse(text: &'a str) -> Option<Self> {
        if !starts_like_identifier(text) || text.starts_with(char::is_whitespace) {
            return None;
        }
        let len = text
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        let (identifier, modifier) = text.split_at(len);
        matches!(modifier, "" | "+" | "*" | "?").then_some(Placeholder {
            identifier,
            modifier,
        })
    }

    fn substitute(self, registry: &Registry) -> String {
        match registry.get_registered(self.identifier) {
            Some(pattern) => format!(
                "{}{}){}",
                group_opener(pattern.flags()),
                pattern.source(),
                self.modifier
            ),
            None => {
                tracing::debug!(
                    identifier = self.identifier,
                    "unregistered template identifier, substituting literally"
                );
                format!("{}{}", self.identifier, self.modifier)
            }
        }
    }
}

/// Non-capturing group opener carrying the matching-relevant flags of a
/// registered pattern, e.g. `(?i:`.
fn group_opener(flags: Flags) -> &'static str {
    match (
        flags.contains(Flags::IGNORE_CASE),
        flags.contains(Flags::MULTILINE),
    ) {
        (false, false) => "(?:",
        (true, false) => "(?i:",
        (false, true) => "(?m:",
        (true, true) => "(?im:",
    }
}

fn starts_like_identifier(text: &str) -> bool {
    text.trim_start()
        .starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
}

/// Skip a backslash run and whatever it escapes, returning the next position.
///
/// An odd run escapes the following byte: `\{` is a literal brace, and the
/// braces of `\p{..}`, `\x{..}` and `\u{..}` belong to the escape. An even
/// run is only escaped backslashes.
fn skip_escape(bytes: &[u8], pos: usize) -> usize {
    let run = bytes[pos..].iter().take_while(|&&b| b == b'\\').count();
    let next = pos + run;
    if run % 2 == 0 {
        return next;
    }
    match bytes.get(next) {
        Some(b'{') => next + 1,
        Some(b'p' | b'P' | b'x' | b'u' | b'U') if bytes.get(next + 1) == Some(&b'{') => bytes
            [next + 1..]
            .iter()
            .position(|&b| b == b'}')
            .map_or(bytes.len(), |len| next + 2 + len),
        _ => next,
    }
}
