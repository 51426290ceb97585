//! Speakable text chunks for the audio pipeline.

use serde::{Deserialize, Serialize};

use crate::model::Word;

/// Options for chunking a word stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkOptions {
    /// Maximum words per chunk
    pub max_words: usize,

    /// End a chunk at every paragraph boundary
    pub break_at_paragraphs: bool,
}

impl ChunkOptions {
    /// Create chunk options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum chunk size in words.
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Enable or disable paragraph-aligned chunks.
    pub fn with_paragraph_breaks(mut self, enabled: bool) -> Self {
        self.break_at_paragraphs = enabled;
        self
    }
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            max_words: 100,
            break_at_paragraphs: true,
        }
    }
}

/// A run of words to be synthesized in one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Space-joined text
    pub text: String,

    /// Index of the first word
    pub start_index: usize,

    /// Index of the last word
    pub end_index: usize,

    /// Page of the first word
    pub page: u32,

    /// Number of words
    pub word_count: usize,
}

impl TextChunk {
    fn from_words(words: &[Word]) -> Self {
        Self {
            text: words
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            start_index: words[0].index,
            end_index: words[words.len() - 1].index,
            page: words[0].page,
            word_count: words.len(),
        }
    }
}

/// Split a final word stream into speakable chunks.
///
/// Paragraph boundaries are detected by a change of `paragraph_id`, so gaps
/// left by boilerplate filtering are harmless.
pub fn chunk_words(words: &[Word], options: &ChunkOptions) -> Vec<TextChunk> {
    let max_words = options.max_words.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    for i in 0..words.len() {
        let size = i + 1 - start;
        let paragraph_ends = words
            .get(i + 1)
            .map_or(true, |next| next.paragraph_id != words[i].paragraph_id);

        let last = i + 1 == words.len();
        if size >= max_words || (options.break_at_paragraphs && paragraph_ends) || last {
            chunks.push(TextChunk::from_words(&words[start..=i]));
            start = i + 1;
        }
    }

    chunks
}
