// crates/snippet_dsl/src/extract.rs

//! Windowed extraction of source-file lines.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::DslError;
use crate::selector::LineRange;

/// The raw lines extracted from a source file, together with the
/// absolute range they were read from. Built once per command and only
/// read afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    lines: Vec<String>,
    file_range: LineRange,
}

impl CodeBlock {
    /// The extracted lines, in file order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The absolute range the lines came from.
    pub fn file_range(&self) -> LineRange {
        self.file_range
    }

    #[cfg(test)]
    pub(crate) fn from_lines(lines: Vec<String>, file_range: LineRange) -> Self {
        CodeBlock { lines, file_range }
    }
}

/// Reads exactly the lines whose 1-based position falls inside `range`,
/// stopping once the window has passed. A range reaching past
/// end-of-file yields a short block; a reversed range yields an empty
/// one.
pub fn extract_block(path: &Path, range: LineRange) -> Result<CodeBlock, DslError> {
    let file = File::open(path).map_err(|source| DslError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut lines = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line_number = idx + 1;
        if line_number > range.end {
            break;
        }
        let line = line.map_err(|source| DslError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        if line_number >= range.start {
            lines.push(line);
        }
    }
    Ok(CodeBlock {
        lines,
        file_range: range,
    })
}
