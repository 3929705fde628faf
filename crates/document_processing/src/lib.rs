// crates/document_processing/src/lib.rs

//! Host-document rewriting. Replaces every snippet command in a document
//! with its rendered code block, and lists the source files a document
//! depends on so build systems can track them.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Rewrites `input` into `output`, expanding every command line and
/// passing everything else through untouched. Separators are written
/// between lines, so the output ends without a trailing newline.
pub fn process_document(input: &Path, output: &Path, code_root: &str) -> Result<()> {
    let in_file =
        File::open(input).with_context(|| format!("could not open document {}", input.display()))?;
    let mut out_file = File::create(output)
        .with_context(|| format!("could not create output file {}", output.display()))?;

    let mut expanded = 0usize;
    let mut sep = "";
    for line in BufReader::new(in_file).lines() {
        let line =
            line.with_context(|| format!("could not read document {}", input.display()))?;
        let rendered = if snippet_dsl::contains_command(&line) {
            expanded += 1;
            snippet_dsl::transform_line(&line, code_root)
                .with_context(|| format!("failed to transform `{line}`"))?
        } else {
            line
        };
        write!(out_file, "{sep}{rendered}")
            .with_context(|| format!("could not write output file {}", output.display()))?;
        sep = "\n";
    }
    log::debug!(
        "expanded {expanded} snippet command(s) while processing {}",
        input.display()
    );
    Ok(())
}

/// Collects the source files referenced by the document's commands, with
/// the code root applied, sorted and deduplicated.
pub fn find_dependencies(document: &Path, code_root: &str) -> Result<Vec<PathBuf>> {
    let file = File::open(document)
        .with_context(|| format!("could not open document {}", document.display()))?;
    let mut dependencies = Vec::new();
    for line in BufReader::new(file).lines() {
        let line =
            line.with_context(|| format!("could not read document {}", document.display()))?;
        if let Some(path) = snippet_dsl::dependency_path(&line, code_root) {
            dependencies.push(path);
        }
    }
    dependencies.sort();
    dependencies.dedup();
    Ok(dependencies)
}
