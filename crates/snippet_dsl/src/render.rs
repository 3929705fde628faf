// crates/snippet_dsl/src/render.rs

//! The line-rendering pipeline. Every extracted line passes through
//! three stages in a fixed order:
//!
//! 1. visual modifications, where the first matching block wins,
//! 2. highlights, applied to what stage 1 left standing,
//! 3. generation options (comment hiding, indentation shift).
//!
//! Lines are emitted in file order; a stage can drop a line but never
//! reorder them.

use lang_comments::CommentSyntax;

use crate::error::DslError;
use crate::extract::CodeBlock;
use crate::options::RenderOptions;
use crate::selector::{CharRange, Selector, SelectorItem, VisualKind, VisualModification};

/// Everything needed to render one resolved command.
#[derive(Debug)]
pub struct CodeInsertion {
    pub code_block: CodeBlock,
    /// Fence language tag, also selects the comment syntax.
    pub language: String,
    pub highlights: Selector,
    pub visuals: Vec<VisualModification>,
    pub options: RenderOptions,
}

impl CodeInsertion {
    /// Renders the block: every surviving line, each terminated by a
    /// newline.
    pub fn render(&self) -> Result<String, DslError> {
        let syntax = lang_comments::for_tag(&self.language);
        let mut out = String::new();
        let mut line_number = self.code_block.file_range().start;
        for line in self.code_block.lines() {
            if let Some(rendered) = self.render_line(line, line_number, syntax)? {
                out.push_str(&rendered);
                out.push('\n');
            }
            line_number += 1;
        }
        Ok(out)
    }

    fn render_line(
        &self,
        line: &str,
        line_number: usize,
        syntax: &dyn CommentSyntax,
    ) -> Result<Option<String>, DslError> {
        let Some(mut line) = apply_visuals(&self.visuals, line, line_number, syntax)? else {
            return Ok(None);
        };

        if self.highlights.contains(line_number) {
            if self.highlights.has_span(line_number) {
                line = highlight_spans(self.highlights.spans_for(line_number), &line);
            } else {
                let stripped = line.strip_prefix(' ').unwrap_or(&line);
                line = format!("*{stripped}");
            }
        }

        Ok(apply_options(&self.options, line, syntax))
    }
}

// ---------------------------------------------------------------------------
//  Stage 1: visual modifications
// ---------------------------------------------------------------------------

/// Applies the first visual modification matching the line. `None` means
/// the line produces no output row at all.
fn apply_visuals(
    visuals: &[VisualModification],
    line: &str,
    line_number: usize,
    syntax: &dyn CommentSyntax,
) -> Result<Option<String>, DslError> {
    for modification in visuals {
        if !modification.item.contains(line_number) {
            continue;
        }
        return match modification.item {
            SelectorItem::Span(span) => splice_span(span, modification.kind, line, syntax).map(Some),
            SelectorItem::Line(_) => Ok(modify_line(modification.kind, line, syntax)),
            SelectorItem::Lines(range) => match modification.kind {
                // A collapsed range keeps only its final line, as the
                // ellipsis marker.
                VisualKind::Ellipsis if line_number != range.end => Ok(None),
                kind => Ok(modify_line(kind, line, syntax)),
            },
        };
    }
    Ok(Some(line.to_string()))
}

fn modify_line(kind: VisualKind, line: &str, syntax: &dyn CommentSyntax) -> Option<String> {
    match kind {
        VisualKind::Ellipsis => Some(format!(
            "{}{}",
            " ".repeat(indent_width(line)),
            syntax.line_comment(" ...")
        )),
        VisualKind::Hide => Some(String::new()),
        VisualKind::Remove => None,
    }
}

/// Replaces the span's columns (1-based, inclusive, counted in
/// characters) with a span comment: empty for hide, an ellipsis for the
/// dots kind. Spans that do not fit the line are an annotation error.
fn splice_span(
    span: CharRange,
    kind: VisualKind,
    line: &str,
    syntax: &dyn CommentSyntax,
) -> Result<String, DslError> {
    let chars: Vec<char> = line.chars().collect();
    if span.start < 1 || span.end < span.start || span.end > chars.len() {
        return Err(DslError::SpanOutOfBounds {
            line: span.line,
            start: span.start,
            end: span.end,
            len: chars.len(),
        });
    }
    let placeholder = match kind {
        VisualKind::Ellipsis => " ... ",
        VisualKind::Hide | VisualKind::Remove => "",
    };
    let prefix: String = chars[..span.start - 1].iter().collect();
    let suffix: String = chars[span.end..].iter().collect();
    Ok(format!("{prefix}{}{suffix}", syntax.span_comment(placeholder)))
}

// ---------------------------------------------------------------------------
//  Stage 2: highlights
// ---------------------------------------------------------------------------

/// Wraps each span in backtick markers, working right to left so an
/// insertion never shifts a span still to be processed.
fn highlight_spans(mut spans: Vec<CharRange>, line: &str) -> String {
    spans.sort_by(|a, b| b.start.cmp(&a.start));
    let mut line = line.to_string();
    for span in spans {
        line = insert_at(&line, span.end, "`");
        line = insert_at(&line, span.start.saturating_sub(1), "`");
    }
    line
}

/// Inserts `text` before the given character position (0-based), or at
/// the end of the line when the position lies past it.
fn insert_at(line: &str, position: usize, text: &str) -> String {
    let byte_pos = line
        .char_indices()
        .nth(position)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len());
    let mut out = String::with_capacity(line.len() + text.len());
    out.push_str(&line[..byte_pos]);
    out.push_str(text);
    out.push_str(&line[byte_pos..]);
    out
}

// ---------------------------------------------------------------------------
//  Stage 3: generation options
// ---------------------------------------------------------------------------

/// Applies generation options to a surviving line. `None` drops the
/// line (comment hiding).
fn apply_options(
    options: &RenderOptions,
    line: String,
    syntax: &dyn CommentSyntax,
) -> Option<String> {
    if options.hide_comments && syntax.is_comment_line(&line) {
        return None;
    }
    Some(shift_indent(line, options.indent_delta))
}

/// Shifts leading spaces by `delta`. Positive deltas leave empty lines
/// alone; negative ones truncate at column zero.
fn shift_indent(line: String, delta: i64) -> String {
    if delta > 0 {
        if line.is_empty() {
            line
        } else {
            format!("{}{line}", " ".repeat(delta as usize))
        }
    } else if delta < 0 {
        let strip = (-delta) as usize;
        // leading spaces are single bytes, so byte slicing is safe here
        line[strip.min(indent_width(&line))..].to_string()
    } else {
        line
    }
}

/// Number of leading spaces on a line.
fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
