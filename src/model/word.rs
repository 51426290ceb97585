//! Word-level types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A word as delivered by the geometry source (PDF/EPUB parser).
///
/// Coordinates use a top-left origin: `x0`/`top` is the upper-left corner and
/// `x1`/`bottom` the lower-right extent. Sources without real geometry may
/// leave every coordinate at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceWord {
    /// The text content
    pub text: String,

    /// Page number (1-indexed)
    pub page: u32,

    /// Left edge
    #[serde(default)]
    pub x0: f32,

    /// Top edge
    #[serde(default)]
    pub top: f32,

    /// Right edge
    #[serde(default)]
    pub x1: f32,

    /// Bottom edge
    #[serde(default)]
    pub bottom: f32,

    /// Width of the page the word sits on
    #[serde(default)]
    pub page_width: f32,

    /// Height of the page the word sits on
    #[serde(default)]
    pub page_height: f32,
}

impl SourceWord {
    /// Create a source word from its bounding box.
    pub fn new(
        text: impl Into<String>,
        page: u32,
        x0: f32,
        top: f32,
        x1: f32,
        bottom: f32,
    ) -> Self {
        Self {
            text: text.into(),
            page,
            x0,
            top,
            x1,
            bottom,
            page_width: 0.0,
            page_height: 0.0,
        }
    }

    /// Set the page dimensions.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }
}

/// A word with its layout box and reading-structure tags.
///
/// `index` is the global position in the final stream and is dense from zero.
/// `paragraph_*` fields are written by the paragraph segmenter, `index` and
/// `original_index` by the pattern filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// The text content
    pub text: String,

    /// Page number (1-indexed)
    pub page: u32,

    /// Global position in the word stream
    #[serde(default)]
    pub index: usize,

    /// Index before pattern filtering, if the word went through the filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_index: Option<usize>,

    /// Paragraph this word belongs to
    #[serde(default)]
    pub paragraph_id: usize,

    /// Whether this is the first word of its paragraph
    #[serde(default)]
    pub paragraph_start: bool,

    /// Whether this is the last word of its paragraph
    #[serde(default)]
    pub paragraph_end: bool,

    /// Left edge
    pub x: f32,

    /// Top edge
    pub y: f32,

    /// Horizontal extent
    pub width: f32,

    /// Vertical extent
    pub height: f32,

    /// Width of the page
    #[serde(default)]
    pub page_width: f32,

    /// Height of the page
    #[serde(default)]
    pub page_height: f32,
}

impl Word {
    /// Create an untagged word.
    pub fn new(
        text: impl Into<String>,
        page: u32,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            text: text.into(),
            page,
            index: 0,
            original_index: None,
            paragraph_id: 0,
            paragraph_start: false,
            paragraph_end: false,
            x,
            y,
            width,
            height,
            page_width: 0.0,
            page_height: 0.0,
        }
    }

    /// Set the page dimensions.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Right edge.
    pub fn x1(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the word carries any usable geometry.
    pub fn has_geometry(&self) -> bool {
        self.width > 0.0 || self.height > 0.0 || self.x != 0.0 || self.y != 0.0
    }

    /// Clear paragraph tags before re-segmentation.
    pub(crate) fn clear_paragraph_tags(&mut self) {
        self.paragraph_id = 0;
        self.paragraph_start = false;
        self.paragraph_end = false;
    }
}

impl TryFrom<SourceWord> for Word {
    type Error = Error;

    fn try_from(source: SourceWord) -> Result<Self> {
        if source.page == 0 {
            return Err(Error::InvalidInput(format!(
                "word {:?} has page 0 (pages are 1-indexed)",
                source.text
            )));
        }

        let coords = [
            source.x0,
            source.top,
            source.x1,
            source.bottom,
            source.page_width,
            source.page_height,
        ];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "word {:?} on page {} has non-finite coordinates",
                source.text, source.page
            )));
        }

        Ok(Word::new(
            source.text,
            source.page,
            source.x0,
            source.top,
            source.x1 - source.x0,
            source.bottom - source.top,
        )
        .with_page_size(source.page_width, source.page_height))
    }
}
