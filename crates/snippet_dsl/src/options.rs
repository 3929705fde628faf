// crates/snippet_dsl/src/options.rs

//! Generation options, given as a `[key=value,...]` suffix on a command.
//!
//! `indent=<int>` shifts the rendered block; `comments=<bool>` states
//! whether comment lines are kept (`false` hides them). Unknown keys are
//! ignored with a warning so documents survive annotations written for a
//! newer tool version; malformed values are an author error and fatal.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DslError;

/// Options steering the renderer's final stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Signed indentation adjustment in spaces. Negative values strip
    /// leading spaces, truncating at column zero.
    pub indent_delta: i64,
    /// Drop full-line comments from the rendered block.
    pub hide_comments: bool,
}

static OPTIONS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(?P<body>[^\]]*)\]").unwrap());

/// Parses the `[key=value,...]` options out of a command suffix. An absent
/// options suffix yields the defaults.
pub fn options_from_suffix(suffix: &str) -> Result<RenderOptions, DslError> {
    match OPTIONS_RE.captures(suffix) {
        Some(caps) => parse_options(&caps["body"]),
        None => Ok(RenderOptions::default()),
    }
}

/// Parses an options body such as `indent=2,comments=false`. Keys are
/// case-insensitive; empty tokens from stray commas are skipped.
pub fn parse_options(body: &str) -> Result<RenderOptions, DslError> {
    let mut options = RenderOptions::default();
    for token in body.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| DslError::Parse(format!("option `{token}` is missing a `=`")))?;
        match key.to_lowercase().as_str() {
            "comments" => {
                let keep = value.to_lowercase().parse::<bool>().map_err(|_| {
                    DslError::Parse(format!("`{value}` is not a boolean comments value"))
                })?;
                options.hide_comments = !keep;
            }
            "indent" => {
                options.indent_delta = value.parse::<i64>().map_err(|_| {
                    DslError::Parse(format!("`{value}` is not an integer indent value"))
                })?;
            }
            _ => log::warn!("ignoring unknown generation option `{key}`"),
        }
    }
    Ok(options)
}
