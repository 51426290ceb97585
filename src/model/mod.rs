//! Data model for per-word layout data and the structure reconstructed from it.
//!
//! Words arrive from an external geometry source as [`SourceWord`] records and
//! are converted once into [`Word`]s. Everything downstream (lines,
//! paragraphs, detected boilerplate) is a view over those words.

mod line;
mod paragraph;
mod pattern;
mod word;

pub use line::Line;
pub use paragraph::{paragraph_runs, Paragraph};
pub use pattern::{DetectedPatterns, FilterResult, PatternKind, PatternOccurrence};
pub use word::{SourceWord, Word};
