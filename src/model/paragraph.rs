//! Paragraph-level types.

use serde::{Deserialize, Serialize};

use super::Word;

/// An ordered, contiguous run of words sharing one `paragraph_id`.
///
/// The first word carries `paragraph_start`, the last `paragraph_end`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph id in document reading order
    pub id: usize,

    /// Words in reading order
    pub words: Vec<Word>,
}

impl Paragraph {
    /// Create a paragraph from words, setting the boundary markers.
    pub fn from_words(id: usize, mut words: Vec<Word>) -> Self {
        let last = words.len().saturating_sub(1);
        for (i, word) in words.iter_mut().enumerate() {
            word.paragraph_id = id;
            word.paragraph_start = i == 0;
            word.paragraph_end = i == last;
        }
        Self { id, words }
    }

    /// Renumber the paragraph and its words.
    pub fn set_id(&mut self, id: usize) {
        self.id = id;
        for word in &mut self.words {
            word.paragraph_id = id;
        }
    }

    /// Space-joined text of the paragraph.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Page of the first word.
    pub fn page(&self) -> Option<u32> {
        self.words.first().map(|w| w.page)
    }
}

/// Split a tagged word stream into its contiguous paragraph runs.
///
/// A new run begins wherever `paragraph_id` changes. Gaps in the id sequence
/// (from filtering) are tolerated.
pub fn paragraph_runs(words: &[Word]) -> Vec<&[Word]> {
    let mut runs = Vec::new();
    let mut start = 0;

    for i in 1..=words.len() {
        if i == words.len() || words[i].paragraph_id != words[i - 1].paragraph_id {
            if start < i {
                runs.push(&words[start..i]);
            }
            start = i;
        }
    }

    runs
}
