//! Line-level view over words.

use super::Word;

/// Words judged to share one visual text row.
///
/// Words are kept sorted left-to-right by `x`. A line is an intermediate view
/// and is never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    /// The words in this line, sorted by X position
    pub words: Vec<Word>,
}

impl Line {
    /// Create a line from words, sorting them by X position.
    pub fn from_words(mut words: Vec<Word>) -> Self {
        words.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
        Self { words }
    }

    /// Number of words in the line.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the line has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Space-joined text of the line.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// Page of the first word (0 for an empty line).
    pub fn page(&self) -> u32 {
        self.words.first().map(|w| w.page).unwrap_or(0)
    }

    /// Leading X of the line.
    pub fn left(&self) -> f32 {
        self.words.first().map(|w| w.x).unwrap_or(0.0)
    }

    /// Rightmost edge of any word.
    pub fn right(&self) -> f32 {
        self.words.iter().map(Word::x1).fold(f32::MIN, f32::max).max(self.left())
    }

    /// Topmost edge of any word.
    pub fn top(&self) -> f32 {
        if self.words.is_empty() {
            return 0.0;
        }
        self.words.iter().map(|w| w.y).fold(f32::MAX, f32::min)
    }

    /// Lowest edge of any word.
    pub fn bottom(&self) -> f32 {
        if self.words.is_empty() {
            return 0.0;
        }
        self.words.iter().map(Word::bottom).fold(f32::MIN, f32::max)
    }

    /// Horizontal extent from the leftmost to the rightmost edge.
    pub fn width(&self) -> f32 {
        let min_x = self.words.iter().map(|w| w.x).fold(f32::MAX, f32::min);
        if self.words.is_empty() {
            return 0.0;
        }
        self.right() - min_x
    }

    /// Vertical extent from the top to the bottom edge.
    pub fn height(&self) -> f32 {
        self.bottom() - self.top()
    }

    /// Mean word height, a proxy for font size.
    pub fn average_word_height(&self) -> f32 {
        if self.words.is_empty() {
            return 0.0;
        }
        self.words.iter().map(|w| w.height).sum::<f32>() / self.words.len() as f32
    }

    /// Mean X of the word origins.
    pub fn mean_x(&self) -> f32 {
        if self.words.is_empty() {
            return 0.0;
        }
        self.words.iter().map(|w| w.x).sum::<f32>() / self.words.len() as f32
    }

    /// Mean Y of the word origins.
    pub fn mean_y(&self) -> f32 {
        if self.words.is_empty() {
            return 0.0;
        }
        self.words.iter().map(|w| w.y).sum::<f32>() / self.words.len() as f32
    }

    /// Page width carried by the words.
    pub fn page_width(&self) -> f32 {
        self.words.first().map(|w| w.page_width).unwrap_or(0.0)
    }

    /// Page height carried by the words.
    pub fn page_height(&self) -> f32 {
        self.words.first().map(|w| w.page_height).unwrap_or(0.0)
    }
}
