// crates/lang_comments/src/hash.rs

//! Hash-comment languages (Python, Ruby, shell, YAML, TOML). Only the
//! line token differs from the slash family; span comments are C-style
//! in every family.

use super::CommentSyntax;

pub(super) struct HashSyntax;
pub(super) const HASH: HashSyntax = HashSyntax;

impl CommentSyntax for HashSyntax {
    fn line_comment(&self, text: &str) -> String {
        format!("#{text}")
    }

    fn span_comment(&self, text: &str) -> String {
        format!("/*{text}*/")
    }

    fn is_comment_line(&self, line: &str) -> bool {
        line.trim_start().starts_with('#')
    }
}
