//! Layout analysis: lines, margins, paragraphs and page furniture.
//!
//! The per-page stages ([`group_words_into_lines`], [`dominant_margin`],
//! [`ParagraphSegmenter`]) need nothing outside the page. The cross-page
//! stages ([`PatternDetector`], [`PatternFilter`]) need the full ordered,
//! paragraph-tagged stream.

mod filter;
mod lines;
mod margin;
mod options;
mod paragraph;
mod patterns;

pub use filter::{
    verify_dense_indices, verify_paragraph_markers, verify_paragraphs, PatternFilter,
};
pub use lines::group_words_into_lines;
pub use margin::dominant_margin;
pub use options::{LayoutOptions, PatternOptions};
pub use paragraph::{
    has_formatting_change, has_indentation_change, has_significant_indentation_change,
    has_vertical_spacing, is_clear_paragraph_break, is_incomplete_line, is_short_line_break,
    BreakReason, ParagraphSegmenter,
};
pub use patterns::{is_file_path_line, is_page_number_text, PatternDetector};
