//! Command handlers for the `remix` CLI.
//!
//! Each handler writes its report to any `io::Write`, so the binary passes
//! stdout and tests pass a buffer.

mod explain;
mod scan;

use remix::RemixError;
use thiserror::Error;

pub use explain::explain;
pub use scan::{scan, ScanSummary};

/// Failure of a command after its arguments were accepted.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Engine(#[from] RemixError),

    #[error("cannot write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a file or exit with a readable message.
pub fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}
