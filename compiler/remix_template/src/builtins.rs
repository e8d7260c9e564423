//! Builtin templates registered by [`Registry::with_builtins`](crate::Registry::with_builtins).

/// Identifier and pattern source of every builtin, in registration order.
pub(crate) const BUILTINS: &[(&str, &str)] = &[
    // Horizontal space, including unicode horizontal space code points
    ("hspace", HSPACE),
    ("noHspace", NO_HSPACE),
    // Vertical space
    ("vspace", r"[\v\n\r\f]"),
    ("noVspace", r"[^\v\n\r\f]"),
    // Binary, octal, hex, integer, decimal and exponent forms
    (
        "number",
        r"0b[01]+|0o[0-7]+|0x[\da-f]+|\d*\.?\d+(?:e[+-]?\d+)?",
    ),
    ("space", r"\s"),
    ("noSpace", r"\S"),
    ("word", r"\w"),
    ("noWord", r"\W"),
    // Any single character regardless of flags
    ("any", r"[\S\s]"),
    // End of line on any platform
    ("eol", r"(?:\r\n?|\n|\f)"),
    ("notEol", r"[^\r\n\f]"),
    ("end", "$"),
    ("begin", "^"),
];

const HSPACE: &str =
    r"[ \t\x{00a0}\x{1680}\x{180e}\x{2000}-\x{200a}\x{2028}\x{2029}\x{202f}\x{205f}\x{3000}]";

const NO_HSPACE: &str =
    r"[^ \t\x{00a0}\x{1680}\x{180e}\x{2000}-\x{200a}\x{2028}\x{2029}\x{202f}\x{205f}\x{3000}]";
