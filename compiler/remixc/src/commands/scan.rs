//! The `scan` command: tokenize text and print every accepted match.

use std::io::Write;

use remix::{Remix, Subject};

use super::CommandError;

/// Where and why a scan stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanSummary {
    pub tokens: usize,
    /// Offset the next match would have started at.
    pub offset: usize,
    /// Whether the whole text was consumed.
    pub complete: bool,
}

/// Scan `text` from the start, one line per token:
/// `start..end namespace #index "text"`.
///
/// Stops at the first offset where nothing matches, or at an empty match,
/// which would not advance the cursor.
pub fn scan(engine: &mut Remix, text: &str, out: &mut impl Write) -> Result<ScanSummary, CommandError> {
    let mut subject = Subject::new(text);
    let mut tokens = 0;
    let mut offset = 0;

    while let Some(matched) = engine.exec(&mut subject)? {
        let namespace = if matched.namespace().is_empty() {
            "-"
        } else {
            matched.namespace()
        };
        writeln!(
            out,
            "{}..{} {namespace} #{} {:?}",
            matched.start(),
            matched.last_index(),
            matched.index(),
            matched.as_str()
        )?;
        tokens += 1;
        offset = matched.last_index();
        if matched.span().is_empty() {
            tracing::debug!(offset, "empty match, stopping");
            break;
        }
    }

    let summary = ScanSummary {
        tokens,
        offset,
        complete: offset == text.len(),
    };
    if summary.complete {
        writeln!(out, "{tokens} tokens, consumed all {offset} bytes")?;
    } else {
        writeln!(out, "{tokens} tokens, stopped at byte {offset} of {}", text.len())?;
    }
    Ok(summary)
}
