/*!
 * Subtitle normalization: raw WebVTT/SRT markup to readable prose.
 *
 * The transformation runs as independent stages:
 *
 * - `filter`: line splitting and removal of headers, metadata and cue timings
 * - `markup`: inline tag stripping
 * - `dedup`: collapse of consecutive repeated lines
 * - `paragraph`: paragraph assembly on sentence ends or a line cap
 *
 * Serialization joins paragraphs with one blank line. The whole pipeline is a
 * pure function and never fails; unrecognized lines are treated as caption text.
 */

use log::debug;
use std::fmt;

pub mod dedup;
pub mod filter;
pub mod markup;
pub mod paragraph;

pub use self::dedup::collapse_consecutive_duplicates;
pub use self::filter::{filter_structural_lines, is_cue_timing, is_structural_line, split_lines};
pub use self::markup::{strip_markup, strip_markup_lines};
pub use self::paragraph::{
    AssemblerState, DEFAULT_MAX_LINES_PER_PARAGRAPH, Paragraph, ParagraphAssembler,
    assemble_paragraphs,
};

/// Separator placed between consecutive paragraphs
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Ordered paragraphs produced from one subtitle document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedTranscript {
    /// Paragraphs in source order
    pub paragraphs: Vec<Paragraph>,
}

impl CleanedTranscript {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        CleanedTranscript { paragraphs }
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Total caption lines across all paragraphs
    pub fn line_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.line_count).sum()
    }

    /// Serialize paragraphs separated by a blank line
    pub fn to_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR)
    }
}

impl fmt::Display for CleanedTranscript {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Converts raw subtitle documents into cleaned transcripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtitleNormalizer {
    max_lines_per_paragraph: usize,
}

impl Default for SubtitleNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES_PER_PARAGRAPH)
    }
}

impl SubtitleNormalizer {
    /// Create a normalizer with a custom paragraph line cap (minimum 1)
    pub fn new(max_lines_per_paragraph: usize) -> Self {
        SubtitleNormalizer {
            max_lines_per_paragraph: max_lines_per_paragraph.max(1),
        }
    }

    pub fn max_lines_per_paragraph(&self) -> usize {
        self.max_lines_per_paragraph
    }

    /// Run the line stages: split, filter, strip markup, collapse duplicates
    pub fn caption_lines(&self, raw: &str) -> Vec<String> {
        let structural_kept = filter_structural_lines(split_lines(raw));
        let stripped = strip_markup_lines(structural_kept);
        collapse_consecutive_duplicates(stripped)
    }

    /// Normalize a raw subtitle document into paragraphs
    pub fn normalize(&self, raw: &str) -> CleanedTranscript {
        let lines = self.caption_lines(raw);
        let line_count = lines.len();
        let paragraphs = assemble_paragraphs(lines, self.max_lines_per_paragraph);

        debug!(
            "Normalized subtitles: {} caption lines into {} paragraphs",
            line_count,
            paragraphs.len()
        );

        CleanedTranscript::new(paragraphs)
    }

    /// Normalize and serialize in one step
    pub fn normalize_to_text(&self, raw: &str) -> String {
        self.normalize(raw).to_text()
    }
}

/// Clean raw WebVTT/SRT text into paragraphs separated by blank lines
pub fn normalize_subtitles(raw: &str) -> String {
    SubtitleNormalizer::default().normalize_to_text(raw)
}
