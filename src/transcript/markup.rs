use once_cell::sync::Lazy;
use regex::Regex;

// @module: Inline caption markup removal

// @const: Shortest span from `<` to the next `>`
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Remove inline tags such as `<c>`, `<b>` or `<00:00:01.200>` from a caption line.
///
/// Returns `None` only when nothing at all is left. Whitespace between removed
/// tags is kept, so a line such as `<i></i> <i></i>` still counts as a line.
pub fn strip_markup(line: &str) -> Option<String> {
    let stripped = TAG_REGEX.replace_all(line, "");

    if stripped.is_empty() {
        None
    } else {
        Some(stripped.into_owned())
    }
}

/// Strip markup from every line, dropping lines that end up empty
pub fn strip_markup_lines<'a, I>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().filter_map(strip_markup).collect()
}
