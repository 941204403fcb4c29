use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static BETWEEN_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+<").unwrap());
static BEFORE_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+>").unwrap());
static AFTER_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<\s+").unwrap());

/// Compact SVG markup by removing whitespace that does not affect rendering.
///
/// The rewrite is purely textual; malformed input stays malformed.
pub fn optimize_svg(markup: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(markup, " ");
    let collapsed = BETWEEN_TAGS.replace_all(&collapsed, "><");
    let collapsed = BEFORE_CLOSE.replace_all(&collapsed, ">");
    let collapsed = AFTER_OPEN.replace_all(&collapsed, "<");
    collapsed.trim().to_string()
}
