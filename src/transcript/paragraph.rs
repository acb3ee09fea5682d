/*!
 * Paragraph assembly for cleaned caption lines.
 *
 * Lines are collected into a buffer that is closed into a paragraph when a line
 * ends a sentence or when the buffer reaches the line cap. The assembler is a
 * two-state machine: every pushed line leaves it either `Accumulating` or in
 * `Emit`, and an `Emit` transition flushes the buffer before the next line.
 */

use std::fmt;

/// Default cap on source lines per paragraph
pub const DEFAULT_MAX_LINES_PER_PARAGRAPH: usize = 6;

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// A paragraph of prose built from consecutive caption lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    /// Whitespace-normalized paragraph text
    pub text: String,

    /// Number of caption lines the paragraph was built from
    pub line_count: usize,
}

impl Paragraph {
    /// Join lines with a single space and collapse all whitespace runs
    pub fn from_lines(lines: &[String]) -> Self {
        let text = lines
            .iter()
            .flat_map(|line| line.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ");

        Paragraph {
            text,
            line_count: lines.len(),
        }
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// State of the assembler after a line has been pushed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    /// The buffer stays open for more lines
    Accumulating,
    /// The buffer was closed into a paragraph
    Emit,
}

/// Check whether a caption line ends with sentence punctuation
pub fn ends_sentence(line: &str) -> bool {
    line.trim_end().ends_with(SENTENCE_TERMINATORS)
}

// @struct: Line buffer that emits paragraphs on sentence ends or line cap
#[derive(Debug)]
pub struct ParagraphAssembler {
    // @field: Line cap per paragraph, at least 1
    max_lines: usize,

    // @field: Lines of the paragraph being built
    buffer: Vec<String>,

    // @field: Paragraphs emitted so far
    paragraphs: Vec<Paragraph>,
}

impl Default for ParagraphAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINES_PER_PARAGRAPH)
    }
}

impl ParagraphAssembler {
    /// Create an assembler; a cap of 0 is treated as 1
    pub fn new(max_lines: usize) -> Self {
        ParagraphAssembler {
            max_lines: max_lines.max(1),
            buffer: Vec::with_capacity(max_lines.max(1)),
            paragraphs: Vec::new(),
        }
    }

    /// Number of lines waiting in the open buffer
    pub fn buffered_lines(&self) -> usize {
        self.buffer.len()
    }

    /// Paragraphs emitted so far
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Append a line and apply the transition it triggers
    pub fn push(&mut self, line: String) -> AssemblerState {
        self.buffer.push(line);

        let state = self.transition();
        if state == AssemblerState::Emit {
            self.emit();
        }
        state
    }

    /// Close any leftover buffer and return all paragraphs
    pub fn finish(mut self) -> Vec<Paragraph> {
        if !self.buffer.is_empty() {
            self.emit();
        }
        self.paragraphs
    }

    fn transition(&self) -> AssemblerState {
        let closes_sentence = self.buffer.last().is_some_and(|line| ends_sentence(line));
        if closes_sentence || self.buffer.len() >= self.max_lines {
            AssemblerState::Emit
        } else {
            AssemblerState::Accumulating
        }
    }

    fn emit(&mut self) {
        let paragraph = Paragraph::from_lines(&self.buffer);
        self.buffer.clear();
        self.paragraphs.push(paragraph);
    }
}

/// Assemble an ordered stream of caption lines into paragraphs
pub fn assemble_paragraphs<I>(lines: I, max_lines: usize) -> Vec<Paragraph>
where
    I: IntoIterator<Item = String>,
{
    let mut assembler = ParagraphAssembler::new(max_lines);
    for line in lines {
        assembler.push(line);
    }
    assembler.finish()
}
