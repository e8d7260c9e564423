//! The `explain` command: show how leaves were batched.

use std::io::Write;

use remix::Remix;

use super::CommandError;

/// Print every batch with its joined pattern and its member leaves:
///
/// ```text
/// batch 0: /((foo)o)/g
///   #0 tok.foo /(foo)o/ (1 group)
/// ```
pub fn explain(engine: &mut Remix, out: &mut impl Write) -> Result<(), CommandError> {
    let program = engine.compile(false)?;
    if program.batches().is_empty() {
        writeln!(out, "no patterns")?;
        return Ok(());
    }

    for (i, batch) in program.batches().iter().enumerate() {
        writeln!(out, "batch {i}: {}", batch.pattern())?;
        for leaf in &program.leaves()[batch.leaves()] {
            let namespace = if leaf.namespace.is_empty() {
                "-"
            } else {
                &*leaf.namespace
            };
            let groups = match leaf.group_count {
                1 => "1 group".to_owned(),
                n => format!("{n} groups"),
            };
            writeln!(
                out,
                "  #{} {namespace} {} ({groups})",
                leaf.index, leaf.pattern
            )?;
        }
    }
    Ok(())
}
