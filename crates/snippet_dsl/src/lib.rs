// crates/snippet_dsl/src/lib.rs

//! `snippet_dsl` — the snippet-command engine.
//!
//! A host document embeds commands that pull line ranges out of source
//! files and re-render them as fenced code blocks, with optional
//! highlighting and visual redaction:
//!
//! ```text
//! insert_code(intro.cpp:4-17)<d5-8>{9}[indent=2]
//! rev_insert_code(intro.cpp:SetupBlock)r{1-2}
//! ```
//!
//! [`contains_command`] recognizes such a line, [`transform_line`] turns
//! it into its rendered block, and [`dependency_path`] reports the
//! source file it depends on. Missing files and markers are downgraded
//! to a logged warning plus the untouched original line, so one stale
//! reference cannot destroy a whole document build.

use std::path::PathBuf;

pub mod error;
pub mod extract;
pub mod options;
pub mod render;
pub mod resolve;
pub mod selector;

pub use error::DslError;
pub use options::RenderOptions;
pub use render::CodeInsertion;
pub use resolve::{CommandTarget, ParsedCommand};
pub use selector::{
    AddressingMode, CharRange, LineRange, Selector, SelectorItem, VisualKind, VisualModification,
};

/// Returns `true` if the document line is a snippet command.
pub fn contains_command(line: &str) -> bool {
    resolve::is_command(line)
}

/// Transforms a command line into a fenced code block.
///
/// Recoverable failures come back as `Ok` with the original line; only
/// parse and range errors, which mean the annotation itself is broken,
/// surface as `Err`.
pub fn transform_line(line: &str, code_root: &str) -> Result<String, DslError> {
    match build_insertion(line, code_root) {
        Ok(insertion) => Ok(wrap_with_code_block(
            &insertion.render()?,
            &insertion.language,
        )),
        Err(err) if err.is_recoverable() => {
            log::warn!("could not process snippet command `{line}`: {err}");
            Ok(line.to_string())
        }
        Err(err) => Err(err),
    }
}

/// The source file a command line depends on, with the code root
/// applied. `None` for lines that are not commands.
pub fn dependency_path(line: &str, code_root: &str) -> Option<PathBuf> {
    if !contains_command(line) {
        return None;
    }
    match resolve::parse_command(line) {
        Ok(command) => Some(resolve::source_path(code_root, &command.filename)),
        Err(err) => {
            log::debug!("skipping malformed command in dependency scan: {err}");
            None
        }
    }
}

/// Parses a command line, resolves and extracts its block, and gathers
/// selectors and options into a renderable [`CodeInsertion`].
fn build_insertion(line: &str, code_root: &str) -> Result<CodeInsertion, DslError> {
    let command = resolve::parse_command(line)?;
    let range = resolve::resolve_range(&command, code_root)?;
    let path = resolve::source_path(code_root, &command.filename);
    let code_block = extract::extract_block(&path, range)?;
    Ok(CodeInsertion {
        code_block,
        language: lang_comments::language_tag(&command.filename),
        highlights: selector::highlight_from_suffix(&command.suffix, &range)?,
        visuals: selector::visuals_from_suffix(&command.suffix, &range)?,
        options: options::options_from_suffix(&command.suffix)?,
    })
}

fn wrap_with_code_block(text: &str, language: &str) -> String {
    format!("```{language}\n{text}```")
}
