/// Collapse runs of identical caption lines into a single line.
///
/// Progressive auto-captions repeat each line in the next cue, so a line is
/// dropped when it equals the previously kept line. Repeats further apart are
/// kept.
pub fn collapse_consecutive_duplicates(mut lines: Vec<String>) -> Vec<String> {
    lines.dedup_by(|current, previous| current.trim() == previous.trim());
    lines
}
