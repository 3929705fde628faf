// crates/snippet_dsl/src/resolve.rs

//! Command recognition and absolute-range resolution.
//!
//! Two command forms exist:
//!
//! ```text
//! insert_code(<file>:<start>-<end>)     direct line range
//! rev_insert_code(<file>:<blockID>)     marker lookup inside <file>
//! ```
//!
//! A marker is a comment line in the source file of the form
//! `code_block(<blockID>:<relStart>-<relEnd>)`. The relative bounds are
//! added to the marker's own line number, so the block named by `1-4`
//! starts on the line after the marker. The first matching marker wins.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DslError;
use crate::selector::{parse_pair, LineRange};

/// A recognized command line, before any file access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Source file path relative to the code root.
    pub filename: String,
    pub target: CommandTarget,
    /// Everything after the closing parenthesis; selectors and options
    /// are located in here.
    pub suffix: String,
}

/// What a command points at inside its source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandTarget {
    /// Explicit absolute line range.
    Direct(LineRange),
    /// Marker identifier to look up in the source file.
    Marker(String),
}

// The filename group is greedy, so a filename may itself contain colons;
// the range or identifier is whatever follows the last one.
static INSERT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^insert_code\((?P<filename>.*):(?P<range>[^)]*)\)").unwrap());

static REV_INSERT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^rev_insert_code\((?P<filename>.*):(?P<block_id>[^)]*)\)").unwrap());

static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"code_block\((?P<block_id>.*):(?P<range>[^)]*)\)").unwrap());

/// Returns `true` if the document line is a snippet command. Commands
/// must start the line.
pub fn is_command(line: &str) -> bool {
    line.starts_with("insert_code") || line.starts_with("rev_insert_code")
}

/// Parses a command line into filename, target and selector suffix.
pub fn parse_command(line: &str) -> Result<ParsedCommand, DslError> {
    if line.starts_with("rev_insert_code") {
        let caps = REV_INSERT_CODE_RE
            .captures(line)
            .ok_or_else(|| DslError::Parse(format!("malformed rev_insert_code line: `{line}`")))?;
        Ok(ParsedCommand {
            filename: caps["filename"].to_string(),
            target: CommandTarget::Marker(caps["block_id"].to_string()),
            suffix: line[caps.get(0).map_or(0, |m| m.end())..].to_string(),
        })
    } else {
        let caps = INSERT_CODE_RE
            .captures(line)
            .ok_or_else(|| DslError::Parse(format!("malformed insert_code line: `{line}`")))?;
        let (start, end) = parse_pair(&caps["range"])?;
        Ok(ParsedCommand {
            filename: caps["filename"].to_string(),
            target: CommandTarget::Direct(LineRange { start, end }),
            suffix: line[caps.get(0).map_or(0, |m| m.end())..].to_string(),
        })
    }
}

/// Resolves a command's absolute source range, scanning the source file
/// when the command is marker-based.
pub fn resolve_range(command: &ParsedCommand, code_root: &str) -> Result<LineRange, DslError> {
    match &command.target {
        CommandTarget::Direct(range) => Ok(*range),
        CommandTarget::Marker(id) => resolve_marker(&source_path(code_root, &command.filename), id),
    }
}

/// Joins the code root and a command filename. The root is an opaque
/// prefix carrying its own trailing separator, so this is plain
/// concatenation rather than a path join.
pub fn source_path(code_root: &str, filename: &str) -> PathBuf {
    PathBuf::from(format!("{code_root}{filename}"))
}

/// Scans `path` top to bottom for the first marker with the requested
/// identifier and maps its relative range onto absolute file lines.
pub fn resolve_marker(path: &Path, block_id: &str) -> Result<LineRange, DslError> {
    let file = File::open(path).map_err(|source| DslError::SourceUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| DslError::SourceUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let marker_line = idx + 1;
        if let Some(caps) = MARKER_RE.captures(&line) {
            if &caps["block_id"] == block_id {
                let (start, end) = parse_pair(&caps["range"])?;
                return Ok(LineRange {
                    start: marker_line + start,
                    end: marker_line + end,
                });
            }
        }
    }
    Err(DslError::MarkerNotFound {
        id: block_id.to_string(),
        path: path.to_path_buf(),
    })
}
