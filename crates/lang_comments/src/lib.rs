//! `lang_comments` — per‑language comment conventions for rendered
//! snippets, so the renderer stays free of `match lang { … }` chains.
//!
//!  * **Zero deps** – the crate only knows about fence tags and comment
//!    tokens.
//!  * **One trait** – `CommentSyntax` – implemented once per comment
//!    family (slash, hash). Adding a family means adding a single file
//!    in this crate.
//!  * **Thin adapter API** – callers go through `lang_comments::for_tag()`
//!    and `lang_comments::language_tag()` and forward the work.

use std::path::Path;

/// Abstracts the minimum the snippet renderer needs to know about a
/// language's comment conventions.
pub trait CommentSyntax: Sync + Send {
    /// Renders `text` as a whole-line comment. `text` carries its own
    /// leading space: `" ..."` becomes `"// ..."`.
    fn line_comment(&self, text: &str) -> String;

    /// Renders `text` as a span comment that can sit in the middle of a
    /// line: `" ... "` becomes `"/* ... */"`. Span comments are C-style
    /// in every family; only the line token varies.
    fn span_comment(&self, text: &str) -> String;

    /// Returns `true` if the line, ignoring leading whitespace, is
    /// nothing but a comment.
    fn is_comment_line(&self, line: &str) -> bool;
}

/// Returns the [`CommentSyntax`] matching a fence language tag
/// (e.g. "python" → hash comments). Tags are matched case-insensitively;
/// unknown tags fall back to slash comments.
pub fn for_tag(tag: &str) -> &'static dyn CommentSyntax {
    match tag.to_lowercase().as_str() {
        "python" | "rb" | "ruby" | "sh" | "bash" | "zsh" | "yaml" | "yml" | "toml" => &hash::HASH,
        _ => &slash::SLASH,
    }
}

/// Derives the fence language tag from a filename: the bare extension,
/// except `py` which maps to `python`. Extensionless files get an empty
/// tag.
pub fn language_tag(filename: &str) -> String {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    match ext {
        "py" => "python".to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
//  Sub-modules (one per comment family)
// ---------------------------------------------------------------------------

mod hash;
mod slash;
