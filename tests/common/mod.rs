/*!
 * Common test utilities for the subprose test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Auto-caption style WebVTT where every cue repeats the previous line
pub const PROGRESSIVE_VTT: &str = "WEBVTT
Kind: captions
Language: en

00:00:00.000 --> 00:00:02.000 align:start position:0%
so<00:00:00.400><c> today</c><00:00:00.800><c> we</c>

00:00:02.000 --> 00:00:02.010 align:start position:0%
so today we

00:00:02.010 --> 00:00:04.000 align:start position:0%
so today we
are<00:00:02.500><c> going</c><00:00:03.000><c> to</c><00:00:03.500><c> talk.</c>

00:00:04.000 --> 00:00:04.010 align:start position:0%
are going to talk.

00:00:04.010 --> 00:00:06.000 align:start position:0%
are going to talk.
<c>Any</c> questions?
";

/// Cleaned form of `PROGRESSIVE_VTT`
pub const PROGRESSIVE_VTT_CLEANED: &str = "so today we are going to talk.\n\nAny questions?";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample SRT subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = r#"1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.
"#;
    create_test_file(dir, filename, content)
}
