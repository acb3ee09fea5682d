use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use once_cell::sync::Lazy;
use regex::Regex;
use log::debug;

// @module: File and directory utilities

// @const: SRT cue index followed by a comma timing line
static SRT_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+\s*\r?\n\d{2}:\d{2}:\d{2},\d{3}\s+-->\s+\d{2}:\d{2}:\d{2},\d{3}").unwrap()
});

// Characters not allowed in file names on common platforms
const RESERVED_FILENAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string, replacing invalid UTF-8 sequences
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Find files directly inside `dir` whose name starts with `prefix`, sorted by name
    pub fn find_files_with_prefix<P: AsRef<Path>>(dir: P, prefix: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && entry.file_name().to_string_lossy().starts_with(prefix) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Remove all files in `dir` starting with `prefix`, returning how many were removed
    pub fn remove_files_with_prefix<P: AsRef<Path>>(dir: P, prefix: &str) -> Result<usize> {
        let files = Self::find_files_with_prefix(&dir, prefix)?;
        for file in &files {
            fs::remove_file(file)
                .with_context(|| format!("Failed to remove temp file: {:?}", file))?;
            debug!("Removed temp file: {:?}", file);
        }
        Ok(files.len())
    }

    /// Turn a video title into a safe file stem
    pub fn sanitize_file_name(title: &str, fallback: &str) -> String {
        let cleaned: String = title
            .chars()
            .map(|c| if RESERVED_FILENAME_CHARS.contains(&c) || c.is_control() { '_' } else { c })
            .collect();
        let cleaned = cleaned.trim().trim_matches('.').trim();

        if cleaned.is_empty() {
            fallback.to_string()
        } else {
            cleaned.to_string()
        }
    }

    // @generates: Output path for a saved transcript
    // @params: output_dir, title, fallback title
    pub fn transcript_output_path<P: AsRef<Path>>(output_dir: P, title: &str, fallback: &str) -> PathBuf {
        let stem = Self::sanitize_file_name(title, fallback);
        output_dir.as_ref().join(format!("{}.txt", stem))
    }

    /// Detect the subtitle dialect of a document from its content
    pub fn detect_subtitle_format(content: &str) -> SubtitleFormat {
        let first_line = content.trim_start_matches('\u{feff}').lines().next().unwrap_or("");

        if first_line.trim().to_uppercase().starts_with("WEBVTT") {
            return SubtitleFormat::WebVtt;
        }

        if content.contains("-->") && SRT_BLOCK_REGEX.is_match(content) {
            return SubtitleFormat::Srt;
        }

        SubtitleFormat::Unknown
    }
}

/// Subtitle dialects recognized in input files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// WebVTT document with a `WEBVTT` header
    WebVtt,
    /// SubRip document with numbered blocks
    Srt,
    /// Anything else; still normalized as plain caption text
    Unknown,
}
