// crates/snippet_dsl/src/error.rs

use std::io;
use std::path::PathBuf;

/// Errors raised while turning a snippet command into rendered output.
///
/// Not every variant is fatal: [`DslError::is_recoverable`] tells callers
/// whether to abort the run or keep the untouched document line.
#[derive(Debug, thiserror::Error)]
pub enum DslError {
    /// The command, one of its selectors, or an option is malformed.
    #[error("invalid snippet command: {0}")]
    Parse(String),

    /// The referenced source file could not be opened.
    #[error("cannot open source file {path}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No marker with the requested identifier occurs in the source file.
    #[error("no code_block marker with id `{id}` in {path}")]
    MarkerNotFound { id: String, path: PathBuf },

    /// A visual character range does not fit the line it targets.
    #[error("visual range {start}-{end} does not fit line {line} ({len} chars)")]
    SpanOutOfBounds {
        line: usize,
        start: usize,
        end: usize,
        len: usize,
    },
}

impl DslError {
    /// Missing files and markers are recoverable: the document keeps the
    /// original annotation line. Malformed commands and impossible ranges
    /// abort the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DslError::SourceUnreadable { .. } | DslError::MarkerNotFound { .. }
        )
    }
}
