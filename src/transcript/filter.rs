/*!
 * Structural line filtering for WebVTT and SRT documents.
 *
 * Removes everything that is document structure rather than caption text:
 * blank lines, the `WEBVTT` header, `Kind:`/`Language:` metadata and cue
 * timing lines.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// @const: Cue timing range, long (HH:MM:SS.mmm) or short (MM:SS.mmm) form.
// Only the dotted millisecond separator is recognized; SRT comma timings pass through.
static CUE_TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(\d{2}:\d{2}:\d{2}\.\d{3}\s+-->\s+\d{2}:\d{2}:\d{2}\.\d{3})|(\d{2}:\d{2}\.\d{3}\s+-->\s+\d{2}:\d{2}\.\d{3})",
    )
    .unwrap()
});

// @const: Line boundaries: CRLF, LF, CR, VT, FF, FS/GS/RS, NEL, LS and PS
static LINE_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|[\n\r\x0B\x0C\x1C-\x1E\x{85}\x{2028}\x{2029}]").unwrap()
});

const DOCUMENT_MARKER: &str = "WEBVTT";

const METADATA_MARKERS: [&str; 2] = ["Kind:", "Language:"];

/// Split raw document text into lines.
///
/// Besides `\n`, `\r\n` and bare `\r`, vertical tab, form feed, the C0
/// file/group/record separators, NEL and the Unicode line and paragraph
/// separators also end a line.
pub fn split_lines(raw: &str) -> impl Iterator<Item = &str> {
    LINE_BREAK_REGEX.split(raw)
}

/// Check whether a line contains a cue timing range anywhere in it
pub fn is_cue_timing(line: &str) -> bool {
    CUE_TIMING_REGEX.is_match(line)
}

/// Check whether an already trimmed line is document structure
pub fn is_structural_line(trimmed: &str) -> bool {
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case(DOCUMENT_MARKER)
        || METADATA_MARKERS.iter().any(|marker| trimmed.contains(marker))
        || is_cue_timing(trimmed)
}

/// Trim every line and keep only those that may carry caption text
pub fn filter_structural_lines<'a, I>(lines: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !is_structural_line(line))
        .collect()
}
