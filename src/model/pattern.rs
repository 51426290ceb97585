//! Detected boilerplate and filtering results.

use serde::{Deserialize, Serialize};

use super::{Line, Word};

/// Which bucket a detected line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Repeated text in the top zone of the page
    Header,
    /// Repeated text in the bottom zone, or a file path/URL line
    Footer,
    /// Page counter near a page edge
    PageNumber,
    /// Repeated text outside the header/footer zones
    OtherRepeat,
}

/// A line classified as header, footer, or page-number candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternOccurrence {
    /// Bucket the occurrence was promoted into
    pub kind: PatternKind,

    /// Space-joined text of the line
    pub text: String,

    /// Page the line sits on
    pub page: u32,

    /// Mean X of the line's words
    pub x: f32,

    /// Mean Y of the line's words
    pub y: f32,

    /// The constituent words, carrying their global `index`
    pub words: Vec<Word>,
}

impl PatternOccurrence {
    /// Build an occurrence from a grouped line.
    pub fn from_line(kind: PatternKind, line: &Line) -> Self {
        Self {
            kind,
            text: line.text(),
            page: line.page(),
            x: line.mean_x(),
            y: line.mean_y(),
            words: line.words.clone(),
        }
    }
}

/// Recurring boilerplate found across a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedPatterns {
    /// Lines promoted as running headers
    pub headers: Vec<PatternOccurrence>,

    /// Lines promoted as running footers
    pub footers: Vec<PatternOccurrence>,

    /// Lines promoted as page numbers
    pub page_numbers: Vec<PatternOccurrence>,

    /// Other lines repeating across pages
    pub other_repeats: Vec<PatternOccurrence>,
}

impl DetectedPatterns {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of detected lines across all buckets.
    pub fn total(&self) -> usize {
        self.headers.len() + self.footers.len() + self.page_numbers.len() + self.other_repeats.len()
    }

    /// Check if nothing was detected.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterate over every occurrence in every bucket.
    pub fn iter(&self) -> impl Iterator<Item = &PatternOccurrence> {
        self.headers
            .iter()
            .chain(&self.footers)
            .chain(&self.page_numbers)
            .chain(&self.other_repeats)
    }

    /// Append an occurrence to the bucket matching its kind.
    pub fn push(&mut self, occurrence: PatternOccurrence) {
        match occurrence.kind {
            PatternKind::Header => self.headers.push(occurrence),
            PatternKind::Footer => self.footers.push(occurrence),
            PatternKind::PageNumber => self.page_numbers.push(occurrence),
            PatternKind::OtherRepeat => self.other_repeats.push(occurrence),
        }
    }
}

/// Output of the pattern filter.
///
/// The input stream is never mutated; `words` is a new sequence with dense
/// indices `0..len` and provenance in `original_index`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterResult {
    /// Surviving words
    pub words: Vec<Word>,

    /// Number of words removed
    pub removed_count: usize,
}

impl FilterResult {
    /// Identity result: the input passes through unchanged.
    pub fn unchanged(words: &[Word]) -> Self {
        Self {
            words: words.to_vec(),
            removed_count: 0,
        }
    }
}
