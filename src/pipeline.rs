//! Document-level processing: per-page segmentation, global tagging, and
//! boilerplate filtering.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{
    verify_dense_indices, verify_paragraphs, LayoutOptions, ParagraphSegmenter, PatternDetector,
    PatternFilter, PatternOptions,
};
use crate::model::{DetectedPatterns, Paragraph, SourceWord, Word};
use crate::render::{self, ChunkOptions, JsonFormat, TextChunk};

/// Options for processing a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessOptions {
    /// Detect and remove headers, footers and page numbers
    pub skip_patterns: bool,

    /// Segment pages in parallel
    pub parallel: bool,

    /// Line, margin and paragraph thresholds
    pub layout: LayoutOptions,

    /// Pattern detection and filtering thresholds
    pub patterns: PatternOptions,
}

impl ProcessOptions {
    /// Create new process options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable boilerplate removal.
    pub fn with_skip_patterns(mut self, skip: bool) -> Self {
        self.skip_patterns = skip;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set layout thresholds.
    pub fn with_layout(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    /// Set pattern thresholds.
    pub fn with_patterns(mut self, patterns: PatternOptions) -> Self {
        self.patterns = patterns;
        self
    }
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            skip_patterns: false,
            parallel: true,
            layout: LayoutOptions::default(),
            patterns: PatternOptions::default(),
        }
    }
}

/// Statistics collected while processing a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStats {
    /// Pages that carried at least one word
    pub page_count: usize,

    /// Paragraphs produced by segmentation
    pub paragraph_count: usize,

    /// Words received from the geometry source
    pub input_words: usize,

    /// Words removed as boilerplate
    pub removed_words: usize,

    /// Words in the final stream
    pub output_words: usize,
}

/// Result of processing a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Final, paragraph- and index-tagged word stream
    pub words: Vec<Word>,

    /// Boilerplate detected (empty unless `skip_patterns` is set)
    pub patterns: DetectedPatterns,

    /// Processing statistics
    pub stats: ProcessStats,
}

impl ProcessResult {
    /// Render the word stream as paragraph-separated plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.words)
    }

    /// Serialize the whole result to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(self, format)
    }

    /// Split the word stream into speakable chunks.
    pub fn chunks(&self, options: &ChunkOptions) -> Vec<TextChunk> {
        render::chunk_words(&self.words, options)
    }
}

/// Run the full pipeline over parser output.
pub fn process_words(source: Vec<SourceWord>, options: &ProcessOptions) -> Result<ProcessResult> {
    let words = source
        .into_iter()
        .map(Word::try_from)
        .collect::<Result<Vec<_>>>()?;
    process_tagged(words, options)
}

/// Run the full pipeline over already-converted words.
///
/// Existing paragraph tags and indices are discarded and recomputed.
pub fn process_tagged(words: Vec<Word>, options: &ProcessOptions) -> Result<ProcessResult> {
    let input_words = words.len();
    let (segmented, page_count, paragraph_count) = segment_document(words, options)?;

    let (patterns, filtered) = if options.skip_patterns {
        let detector = PatternDetector::with_options(options.patterns.clone())
            .with_line_tolerance(options.layout.line_tolerance);
        let patterns = detector.detect(&segmented);
        let filtered =
            PatternFilter::with_options(options.patterns.clone()).apply(&segmented, &patterns)?;
        (patterns, filtered.words)
    } else {
        (DetectedPatterns::new(), segmented)
    };

    let stats = ProcessStats {
        page_count,
        paragraph_count,
        input_words,
        removed_words: input_words - filtered.len(),
        output_words: filtered.len(),
    };
    log::info!(
        "Processed {} pages: {} paragraphs, {} of {} words kept",
        stats.page_count,
        stats.paragraph_count,
        stats.output_words,
        stats.input_words
    );

    Ok(ProcessResult {
        words: filtered,
        patterns,
        stats,
    })
}

/// Segment every page and flatten into one globally tagged stream.
///
/// Pages are segmented independently (in parallel when enabled) and joined
/// in page order; paragraph ids and word indices are then assigned over the
/// whole document. Returns the stream, the page count and the paragraph count.
pub fn segment_document(
    words: Vec<Word>,
    options: &ProcessOptions,
) -> Result<(Vec<Word>, usize, usize)> {
    let mut by_page: BTreeMap<u32, Vec<Word>> = BTreeMap::new();
    for word in words {
        by_page.entry(word.page).or_default().push(word);
    }
    let pages: Vec<(u32, Vec<Word>)> = by_page.into_iter().collect();
    let page_count = pages.len();

    let segmenter = ParagraphSegmenter::with_options(options.layout.clone());
    let segment = |(page, page_words): (u32, Vec<Word>)| {
        let paragraphs = segmenter.segment_page(page_words);
        log::debug!("Page {}: {} paragraphs", page, paragraphs.len());
        paragraphs
    };

    let per_page: Vec<Vec<Paragraph>> = if options.parallel {
        pages.into_par_iter().map(segment).collect()
    } else {
        pages.into_iter().map(segment).collect()
    };

    let (stream, paragraph_count) = assemble(per_page);
    verify_paragraphs(&stream)?;
    verify_dense_indices(&stream)?;

    Ok((stream, page_count, paragraph_count))
}

/// Assign document-wide paragraph ids and word indices in reading order.
fn assemble(per_page: Vec<Vec<Paragraph>>) -> (Vec<Word>, usize) {
    let total: usize = per_page.iter().flatten().map(Paragraph::len).sum();
    let mut stream = Vec::with_capacity(total);
    let mut next_id = 0;

    for mut paragraph in per_page.into_iter().flatten() {
        if paragraph.is_empty() {
            continue;
        }
        paragraph.set_id(next_id);
        next_id += 1;
        for mut word in paragraph.words {
            word.index = stream.len();
            word.original_index = None;
            stream.push(word);
        }
    }

    (stream, next_id)
}
