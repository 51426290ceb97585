//! Paragraphs from markup blocks, for sources without word geometry.
//!
//! EPUB-like sources already know where their paragraphs are: each block of
//! markup text becomes one paragraph, and its words get zeroed coordinates.
//! The result has the same shape as segmented PDF output and can be consumed
//! interchangeably.

use serde::{Deserialize, Serialize};

use crate::model::{Paragraph, Word};

/// A block-level piece of markup text (a `<p>`, heading or list item).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkupBlock {
    /// Page or chapter number the block belongs to (1-indexed)
    pub page: u32,

    /// Text content of the block
    pub text: String,
}

impl MarkupBlock {
    /// Create a new block.
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
        }
    }
}

/// Turn markup blocks into a paragraph-tagged, densely indexed word stream.
///
/// Blocks with no words are skipped without consuming a paragraph id.
pub fn words_from_blocks(blocks: &[MarkupBlock]) -> Vec<Word> {
    let mut stream = Vec::new();
    let mut next_id = 0;

    for block in blocks {
        let words: Vec<Word> = block
            .text
            .split_whitespace()
            .map(|token| Word::new(token, block.page.max(1), 0.0, 0.0, 0.0, 0.0))
            .collect();
        if words.is_empty() {
            continue;
        }

        let paragraph = Paragraph::from_words(next_id, words);
        next_id += 1;
        for mut word in paragraph.words {
            word.index = stream.len();
            stream.push(word);
        }
    }

    log::debug!("Markup blocks: {} paragraphs, {} words", next_id, stream.len());
    stream
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{verify_dense_indices, verify_paragraphs};

    #[test]
    fn test_blocks_become_paragraphs() {
        let blocks = vec![
            MarkupBlock::new(1, "Chapter One"),
            MarkupBlock::new(1, "   "),
            MarkupBlock::new(1, "It was a dark night."),
            MarkupBlock::new(2, "Morning came."),
        ];
        let words = words_from_blocks(&blocks);

        assert_eq!(words.len(), 9);
        assert!(verify_paragraphs(&words).is_ok());
        assert!(verify_dense_indices(&words).is_ok());
        assert_eq!(words[2].paragraph_id, 1);
        assert!(words[2].paragraph_start);
        assert_eq!(words[8].page, 2);
        assert!(words.iter().all(|w| !w.has_geometry()));
    }

    #[test]
    fn test_no_blocks() {
        assert!(words_from_blocks(&[]).is_empty());
    }
}
