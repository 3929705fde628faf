// crates/snippet_dsl/src/selector.rs

//! Selector mini-grammar shared by highlights (`{...}`) and visual
//! modifications (`<...>`):
//!
//! ```text
//! line_num   = { digit } ;
//! range      = line_num , "-" , line_num ;
//! char_spans = line_num , ":" , [ "{" ] , range , { "|" , range } , [ "}" ] ;
//! block      = line_num | range | char_spans ;
//! body       = block , { "," , block } ;
//! ```
//!
//! A leading `r` on the selector (`r{...}`, `r<...>`) makes every line
//! number relative to the resolved block's first line. Visual blocks may
//! additionally carry a single kind prefix: `d` (replace with ellipsis),
//! `h` (hide), `r` (remove).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DslError;

/// An inclusive, 1-based line range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn contains(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }
}

/// An inclusive, 1-based column span on a single line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharRange {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl CharRange {
    pub fn contains(&self, line: usize) -> bool {
        self.line == line
    }
}

/// One parsed selector block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectorItem {
    Line(usize),
    Lines(LineRange),
    Span(CharRange),
}

impl SelectorItem {
    pub fn contains(&self, line: usize) -> bool {
        match self {
            SelectorItem::Line(n) => *n == line,
            SelectorItem::Lines(range) => range.contains(line),
            SelectorItem::Span(span) => span.contains(line),
        }
    }
}

/// How selector line numbers map onto source lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    Absolute,
    /// Line numbers count from the given block start, so 1 names the
    /// block's first line.
    RelativeTo(usize),
}

impl AddressingMode {
    fn resolve(&self, line: usize) -> usize {
        match self {
            AddressingMode::Absolute => line,
            AddressingMode::RelativeTo(start) => (start + line).saturating_sub(1),
        }
    }
}

/// An ordered list of selector items. Order is preserved from the
/// annotation because visual modifications apply the first matching item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    items: Vec<SelectorItem>,
}

impl Selector {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether any item selects the given line.
    pub fn contains(&self, line: usize) -> bool {
        self.items.iter().any(|item| item.contains(line))
    }

    /// Whether a column span targets the given line.
    pub fn has_span(&self, line: usize) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, SelectorItem::Span(span) if span.line == line))
    }

    /// All column spans targeting the given line, in annotation order.
    pub fn spans_for(&self, line: usize) -> Vec<CharRange> {
        self.items
            .iter()
            .filter_map(|item| match item {
                SelectorItem::Span(span) if span.line == line => Some(*span),
                _ => None,
            })
            .collect()
    }
}

/// What a visual modification does to the lines it selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualKind {
    /// Collapse into an ellipsis comment.
    Ellipsis,
    /// Blank the line but keep its slot.
    Hide,
    /// Drop the line entirely.
    Remove,
}

/// One visual-modification block: the lines or span it selects, and what
/// happens to them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualModification {
    pub item: SelectorItem,
    pub kind: VisualKind,
}

// ---------------------------------------------------------------------------
//  Suffix location
// ---------------------------------------------------------------------------

// Each suffix kind is located independently so the three can appear in any
// order after the command's closing parenthesis. The highlight body runs
// greedily to the last `}` to keep nested char-span braces intact.
static HIGHLIGHT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<rel>r?)\{(?P<body>.*)\}").unwrap());

static VISUAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<rel>r?)<(?P<body>[^>]*)>").unwrap());

/// Parses the highlight selector out of a command suffix. Absent suffix
/// parts yield an empty selector.
pub fn highlight_from_suffix(suffix: &str, block: &LineRange) -> Result<Selector, DslError> {
    let masked = mask_visual_suffix(suffix);
    let Some(caps) = HIGHLIGHT_RE.captures(&masked) else {
        return Ok(Selector::default());
    };
    let mode = addressing_mode(&caps["rel"], block);
    parse_selector(&caps["body"], mode)
}

/// Blanks the `<...>` part of a suffix. Visual char-span blocks may
/// legally contain braces, so the highlight brace scan must not see them.
fn mask_visual_suffix(suffix: &str) -> String {
    let mut masked = suffix.to_string();
    if let Some(range) = VISUAL_RE.find(&masked).map(|m| m.range()) {
        let blank = " ".repeat(range.len());
        masked.replace_range(range, &blank);
    }
    masked
}

/// Parses the visual-modification selector out of a command suffix.
pub fn visuals_from_suffix(
    suffix: &str,
    block: &LineRange,
) -> Result<Vec<VisualModification>, DslError> {
    let Some(caps) = VISUAL_RE.captures(suffix) else {
        return Ok(Vec::new());
    };
    let mode = addressing_mode(&caps["rel"], block);
    parse_visuals(&caps["body"], mode)
}

fn addressing_mode(rel: &str, block: &LineRange) -> AddressingMode {
    if rel == "r" {
        AddressingMode::RelativeTo(block.start)
    } else {
        AddressingMode::Absolute
    }
}

// ---------------------------------------------------------------------------
//  Body parsing
// ---------------------------------------------------------------------------

/// Parses a highlight selector body such as `4,1-2` or `2:{3-13|17-17}`.
pub fn parse_selector(body: &str, mode: AddressingMode) -> Result<Selector, DslError> {
    if body.is_empty() {
        return Err(DslError::Parse("empty selector body".to_string()));
    }
    let mut items = Vec::new();
    for block in body.split(',') {
        parse_block(block, mode, &mut |item| items.push(item))?;
    }
    Ok(Selector { items })
}

/// Parses a visual selector body such as `d2-3` or `h1,r5`.
pub fn parse_visuals(
    body: &str,
    mode: AddressingMode,
) -> Result<Vec<VisualModification>, DslError> {
    if body.is_empty() {
        return Err(DslError::Parse("empty visual selector body".to_string()));
    }
    let mut modifications = Vec::new();
    for block in body.split(',') {
        let (kind, rest) = split_visual_kind(block);
        parse_block(rest, mode, &mut |item| {
            modifications.push(VisualModification { item, kind })
        })?;
    }
    Ok(modifications)
}

/// Splits the single-letter kind prefix off a visual block. Blocks without
/// a prefix default to hiding, with a warning, so a forgotten letter never
/// leaks code the author meant to suppress.
fn split_visual_kind(block: &str) -> (VisualKind, &str) {
    if let Some(rest) = block.strip_prefix('d') {
        (VisualKind::Ellipsis, rest)
    } else if let Some(rest) = block.strip_prefix('h') {
        (VisualKind::Hide, rest)
    } else if let Some(rest) = block.strip_prefix('r') {
        (VisualKind::Remove, rest)
    } else {
        log::warn!("no visual modification kind on `{block}`, defaulting to hide");
        (VisualKind::Hide, block)
    }
}

/// Parses one comma-delimited block, pushing every selector item it
/// produces (a char-span block can hold several pipe-separated spans).
fn parse_block(
    block: &str,
    mode: AddressingMode,
    push: &mut dyn FnMut(SelectorItem),
) -> Result<(), DslError> {
    if let Some((line_part, spans_part)) = block.split_once(':') {
        let line = mode.resolve(parse_number(line_part)?);
        let spans_part = spans_part.trim_start_matches('{').trim_end_matches('}');
        for span in spans_part.split('|') {
            let (start, end) = parse_pair(span)?;
            push(SelectorItem::Span(CharRange { line, start, end }));
        }
        Ok(())
    } else if block.contains('-') {
        let (start, end) = parse_pair(block)?;
        push(SelectorItem::Lines(LineRange {
            start: mode.resolve(start),
            end: mode.resolve(end),
        }));
        Ok(())
    } else {
        push(SelectorItem::Line(mode.resolve(parse_number(block)?)));
        Ok(())
    }
}

pub(crate) fn parse_pair(text: &str) -> Result<(usize, usize), DslError> {
    let (start, end) = text
        .split_once('-')
        .ok_or_else(|| DslError::Parse(format!("expected `start-end`, got `{text}`")))?;
    Ok((parse_number(start)?, parse_number(end)?))
}

pub(crate) fn parse_number(text: &str) -> Result<usize, DslError> {
    text.parse::<usize>()
        .map_err(|_| DslError::Parse(format!("`{text}` is not a line or column number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: LineRange = LineRange { start: 4, end: 17 };

    #[test]
    fn single_line_number() {
        let selector = parse_selector("7", AddressingMode::Absolute).unwrap();
        assert!(selector.contains(7));
        assert!(!selector.contains(6));
    }

    #[test]
    fn line_range_is_inclusive() {
        let selector = parse_selector("5-6", AddressingMode::Absolute).unwrap();
        assert!(!selector.contains(4));
        assert!(selector.contains(5));
        assert!(selector.contains(6));
        assert!(!selector.contains(7));
    }

    #[test]
    fn mixed_blocks() {
        let selector = parse_selector("4,1-2", AddressingMode::Absolute).unwrap();
        assert!(selector.contains(1));
        assert!(selector.contains(2));
        assert!(!selector.contains(3));
        assert!(selector.contains(4));
    }

    #[test]
    fn char_spans_with_braces_and_pipe() {
        let selector = parse_selector("2:{3-13|17-17}", AddressingMode::Absolute).unwrap();
        let spans = selector.spans_for(2);
        assert_eq!(
            spans,
            vec![
                CharRange { line: 2, start: 3, end: 13 },
                CharRange { line: 2, start: 17, end: 17 },
            ]
        );
        assert!(selector.has_span(2));
        assert!(!selector.has_span(3));
    }

    #[test]
    fn char_spans_without_braces() {
        let selector = parse_selector("2:3-13", AddressingMode::Absolute).unwrap();
        assert_eq!(
            selector.spans_for(2),
            vec![CharRange { line: 2, start: 3, end: 13 }]
        );
    }

    #[test]
    fn relative_lines_count_from_block_start() {
        let selector = parse_selector("2-3", AddressingMode::RelativeTo(BLOCK.start)).unwrap();
        assert!(selector.contains(5));
        assert!(selector.contains(6));
        assert!(!selector.contains(4));
        assert!(!selector.contains(7));
    }

    #[test]
    fn relative_one_names_the_block_start() {
        let selector = parse_selector("1", AddressingMode::RelativeTo(BLOCK.start)).unwrap();
        assert!(selector.contains(4));
    }

    #[test]
    fn relative_char_span_maps_only_the_line() {
        let selector =
            parse_selector("2:{3-13|17-17}", AddressingMode::RelativeTo(1)).unwrap();
        assert_eq!(
            selector.spans_for(2),
            vec![
                CharRange { line: 2, start: 3, end: 13 },
                CharRange { line: 2, start: 17, end: 17 },
            ]
        );
    }

    #[test]
    fn empty_body_is_a_parse_error() {
        assert!(matches!(
            parse_selector("", AddressingMode::Absolute),
            Err(DslError::Parse(_))
        ));
    }

    #[test]
    fn bad_number_is_a_parse_error() {
        assert!(matches!(
            parse_selector("1,two", AddressingMode::Absolute),
            Err(DslError::Parse(_))
        ));
        assert!(matches!(
            parse_selector("1-", AddressingMode::Absolute),
            Err(DslError::Parse(_))
        ));
    }

    #[test]
    fn visual_kind_prefixes() {
        let mods = parse_visuals("d2-3,h5,r7", AddressingMode::Absolute).unwrap();
        assert_eq!(mods.len(), 3);
        assert_eq!(mods[0].kind, VisualKind::Ellipsis);
        assert_eq!(
            mods[0].item,
            SelectorItem::Lines(LineRange { start: 2, end: 3 })
        );
        assert_eq!(mods[1].kind, VisualKind::Hide);
        assert_eq!(mods[1].item, SelectorItem::Line(5));
        assert_eq!(mods[2].kind, VisualKind::Remove);
        assert_eq!(mods[2].item, SelectorItem::Line(7));
    }

    #[test]
    fn unprefixed_visual_defaults_to_hide() {
        let mods = parse_visuals("2-3", AddressingMode::Absolute).unwrap();
        assert_eq!(mods[0].kind, VisualKind::Hide);
    }

    #[test]
    fn only_one_kind_letter_is_stripped() {
        // `r` selects removal and the rest must parse as a block, so a
        // doubled letter is malformed rather than silently eaten.
        assert!(matches!(
            parse_visuals("rr2", AddressingMode::Absolute),
            Err(DslError::Parse(_))
        ));
    }

    #[test]
    fn visual_char_span_keeps_its_kind() {
        let mods = parse_visuals("d2:5-9", AddressingMode::Absolute).unwrap();
        assert_eq!(mods[0].kind, VisualKind::Ellipsis);
        assert_eq!(
            mods[0].item,
            SelectorItem::Span(CharRange { line: 2, start: 5, end: 9 })
        );
    }

    #[test]
    fn highlight_suffix_located_after_other_suffixes() {
        let block = LineRange { start: 1, end: 4 };
        let selector = highlight_from_suffix("[indent=2]<d3>{1-2}", &block).unwrap();
        assert!(selector.contains(1));
        assert!(selector.contains(2));
        assert!(!selector.contains(3));
    }

    #[test]
    fn relative_highlight_suffix() {
        let block = LineRange { start: 10, end: 20 };
        let selector = highlight_from_suffix("r{1-2}", &block).unwrap();
        assert!(selector.contains(10));
        assert!(selector.contains(11));
        assert!(!selector.contains(1));
    }

    #[test]
    fn visual_suffix_located_before_highlight() {
        let block = LineRange { start: 1, end: 4 };
        let mods = visuals_from_suffix("<d2-3>{1}", &block).unwrap();
        assert_eq!(mods.len(), 1);
        assert_eq!(mods[0].kind, VisualKind::Ellipsis);
    }

    #[test]
    fn relative_visual_suffix() {
        let block = LineRange { start: 4, end: 8 };
        let mods = visuals_from_suffix("r<h1>", &block).unwrap();
        assert_eq!(mods[0].item, SelectorItem::Line(4));
    }

    #[test]
    fn missing_suffixes_yield_empty_selectors() {
        let block = LineRange { start: 1, end: 4 };
        assert!(highlight_from_suffix("", &block).unwrap().is_empty());
        assert!(visuals_from_suffix("[indent=2]", &block).unwrap().is_empty());
    }

    #[test]
    fn visual_braces_do_not_leak_into_the_highlight() {
        let block = LineRange { start: 1, end: 4 };
        let selector = highlight_from_suffix("<d2:{3-5}>", &block).unwrap();
        assert!(selector.is_empty());

        let selector = highlight_from_suffix("<d2:{3-5}>{1}", &block).unwrap();
        assert!(selector.contains(1));
        assert!(!selector.has_span(2));
    }

    #[test]
    fn highlight_body_swallows_nested_braces() {
        let block = LineRange { start: 1, end: 4 };
        let selector = highlight_from_suffix("r{1,2:{3-13|17-17},3}", &block).unwrap();
        assert!(selector.contains(1));
        assert!(selector.contains(3));
        assert_eq!(
            selector.spans_for(2),
            vec![
                CharRange { line: 2, start: 3, end: 13 },
                CharRange { line: 2, start: 17, end: 17 },
            ]
        );
    }
}
