//! # readflow
//!
//! Reading-order reconstruction for per-word PDF layout data.
//!
//! This library takes the word boxes produced by a PDF text extractor and
//! rebuilds what a reader sees: lines, paragraphs, and a clean word stream
//! with running headers, footers and page numbers removed.
//!
//! ## Quick Start
//!
//! ```no_run
//! use readflow::{read_source_words, Reflow};
//!
//! fn main() -> readflow::Result<()> {
//!     // Words exported by the geometry source
//!     let file = std::fs::File::open("words.json")?;
//!     let words = read_source_words(file)?;
//!
//!     // Segment paragraphs and drop page furniture
//!     let result = Reflow::new().skip_patterns(true).process(words)?;
//!     println!("{}", result.to_text());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line grouping**: Words clustered by vertical position
//! - **Paragraph segmentation**: Spacing, indentation and linguistic signals
//! - **Boilerplate removal**: Headers, footers, page numbers and other repeats
//! - **Dense reindexing**: Contiguous word indices after filtering
//! - **Parallel processing**: Uses Rayon for multi-page documents

pub mod error;
pub mod layout;
pub mod markup;
pub mod model;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{
    LayoutOptions, ParagraphSegmenter, PatternDetector, PatternFilter, PatternOptions,
};
pub use markup::{words_from_blocks, MarkupBlock};
pub use model::{
    DetectedPatterns, FilterResult, Line, Paragraph, PatternKind, PatternOccurrence, SourceWord,
    Word,
};
pub use pipeline::{ProcessOptions, ProcessResult, ProcessStats};
pub use render::{ChunkOptions, JsonFormat, TextChunk};

use std::io::Read;

/// Read a JSON array of source words.
///
/// # Example
///
/// ```no_run
/// use readflow::read_source_words;
///
/// let file = std::fs::File::open("words.json").unwrap();
/// let words = read_source_words(file).unwrap();
/// println!("Words: {}", words.len());
/// ```
pub fn read_source_words<R: Read>(reader: R) -> Result<Vec<SourceWord>> {
    let words: Vec<SourceWord> = serde_json::from_reader(reader)?;
    log::debug!("Read {} source words", words.len());
    Ok(words)
}

/// Process source words with default options.
///
/// Paragraphs are segmented, boilerplate is kept.
pub fn process(words: Vec<SourceWord>) -> Result<ProcessResult> {
    pipeline::process_words(words, &ProcessOptions::default())
}

/// Builder for processing a document's words.
///
/// # Example
///
/// ```no_run
/// use readflow::{LayoutOptions, Reflow};
///
/// # let words = Vec::new();
/// let result = Reflow::new()
///     .skip_patterns(true)
///     .with_layout_options(LayoutOptions::new().with_line_tolerance(4.0))
///     .sequential()
///     .process(words)?;
/// println!("Removed {} words", result.stats.removed_words);
/// # Ok::<(), readflow::Error>(())
/// ```
pub struct Reflow {
    options: ProcessOptions,
}

impl Reflow {
    /// Create a new Reflow builder.
    pub fn new() -> Self {
        Self {
            options: ProcessOptions::default(),
        }
    }

    /// Create a builder from a complete option set.
    pub fn with_options(options: ProcessOptions) -> Self {
        Self { options }
    }

    /// Enable or disable removal of headers, footers and page numbers.
    pub fn skip_patterns(mut self, skip: bool) -> Self {
        self.options = self.options.with_skip_patterns(skip);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Set line, margin and paragraph thresholds.
    pub fn with_layout_options(mut self, layout: LayoutOptions) -> Self {
        self.options = self.options.with_layout(layout);
        self
    }

    /// Set pattern detection thresholds.
    pub fn with_pattern_options(mut self, patterns: PatternOptions) -> Self {
        self.options = self.options.with_patterns(patterns);
        self
    }

    /// Get the current options.
    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Process words from the geometry source.
    pub fn process(&self, words: Vec<SourceWord>) -> Result<ProcessResult> {
        pipeline::process_words(words, &self.options)
    }

    /// Process already-converted words; existing tags are recomputed.
    pub fn process_words(&self, words: Vec<Word>) -> Result<ProcessResult> {
        pipeline::process_tagged(words, &self.options)
    }
}

impl Default for Reflow {
    fn default() -> Self {
        Self::new()
    }
}
