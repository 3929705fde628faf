// crates/lang_comments/src/slash.rs

//! C-family comment tokens (`//`, `/* */`), the fallback for every
//! language without an explicit override.

use super::CommentSyntax;

pub(super) struct SlashSyntax;
pub(super) const SLASH: SlashSyntax = SlashSyntax;

impl CommentSyntax for SlashSyntax {
    fn line_comment(&self, text: &str) -> String {
        format!("//{text}")
    }

    fn span_comment(&self, text: &str) -> String {
        format!("/*{text}*/")
    }

    /// A full-line comment is either `//`-prefixed or a one-line
    /// `/* ... */` block.
    fn is_comment_line(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.starts_with("//") || (trimmed.starts_with("/*") && trimmed.ends_with("*/"))
    }
}
