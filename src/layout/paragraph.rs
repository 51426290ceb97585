//! Paragraph segmentation from line geometry and text cues.
//!
//! Each line after the first is classified as either continuing the open
//! paragraph or starting a new one. Rules are evaluated in order and the
//! first that fires decides:
//!
//! 1. The first line of a page starts a paragraph.
//! 2. If the previous line reads as incomplete, the line continues it.
//! 3. If both lines sit on the dominant margin, break only on strong signals:
//!    wide spacing together with an indentation change, or a clear break.
//! 4. Otherwise break on spacing, indentation shift, a short previous line,
//!    or a formatting change, in that order.

use crate::model::{Line, Paragraph, Word};

use super::lines::group_words_into_lines;
use super::margin::dominant_margin;
use super::options::LayoutOptions;

/// Endings that leave a line grammatically open.
const INCOMPLETE_ENDINGS: &[&str] = &[
    ",", ";", ":", "(", "\"", "'", "-", "\u{2014}", "\u{2013}", "and", "or", "but", "the", "of",
    "in", "to", "for", "with", "by", "at", "on", "from", "if", "because", "since", "while",
    "although", "though", "unless", "until", "before", "after", "when", "where", "how", "why",
];

/// Openings that continue the previous line.
const CONTINUATION_STARTS: &[&str] = &[
    ")", "\"", "'", ".", ",", ";", "and", "or", "but", "so", "yet", "then", "however",
    "therefore", "moreover", "furthermore",
];

/// Punctuation after which a short line is still a continuation.
const SOFT_ENDINGS: &[&str] = &[",", ";", ":", "(", "\"", "'", "-"];

/// Punctuation that opens a line continuing the previous one.
const SOFT_STARTS: &[&str] = &[")", "\"", "'", ".", ",", ";"];

/// Terminal punctuation that can close a paragraph.
const STRONG_ENDINGS: &[&str] = &[".", "!", "?", ";\"", ".\"", "!\"", "?\""];

/// Keywords that open a structural unit.
const STRUCTURAL_STARTS: &[&str] = &["Chapter", "Section", "Part", "Book", "Volume"];

/// Why a line was judged to open a new paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakReason {
    /// First line on the page
    FirstLine,
    /// Main-aligned lines with wide spacing and an indentation change
    AlignedSpacing,
    /// Main-aligned lines with terminal punctuation, a capital or a keyword
    ClearBreak,
    /// Gap between the lines exceeds the average line height
    VerticalSpacing,
    /// Leading X shifts between the lines
    Indentation,
    /// Previous line is short or the widths differ markedly
    ShortLine,
    /// Word heights differ markedly
    Formatting,
}

/// Whether the previous line is unfinished and flows into the current one.
///
/// True when the previous text ends with an open punctuation mark,
/// conjunction or preposition, when the current text opens with continuation
/// punctuation or a connective adverb, or when it starts in lower case.
pub fn is_incomplete_line(prev_text: &str, current_text: &str) -> bool {
    if prev_text.is_empty() || current_text.is_empty() {
        return false;
    }

    let prev_lower = prev_text.to_lowercase();
    let prev_incomplete = INCOMPLETE_ENDINGS.iter().any(|ending| {
        prev_lower.ends_with(&format!(" {}", ending)) || prev_text.ends_with(ending)
    });

    let current_lower = current_text.to_lowercase();
    let current_continues = CONTINUATION_STARTS.iter().any(|start| {
        current_lower.starts_with(&format!("{} ", start)) || current_text.starts_with(start)
    });

    let current_lowercase = current_text
        .chars()
        .next()
        .map(char::is_lowercase)
        .unwrap_or(false);

    prev_incomplete || current_continues || current_lowercase
}

/// Gap between the lines is larger than `ratio` times their mean height.
pub fn has_vertical_spacing(current: &Line, prev: &Line, ratio: f32) -> bool {
    if current.is_empty() || prev.is_empty() {
        return false;
    }

    let spacing = current.top() - prev.bottom();
    let avg_line_height = (current.height() + prev.height()) / 2.0;
    spacing > avg_line_height * ratio
}

/// Leading X moves by more than `shift` between the lines.
pub fn has_indentation_change(current: &Line, prev: &Line, shift: f32) -> bool {
    if current.is_empty() || prev.is_empty() {
        return false;
    }
    (current.left() - prev.left()).abs() > shift
}

/// Either line deviates strongly from the margin, or the lines shift apart.
pub fn has_significant_indentation_change(
    current: &Line,
    prev: &Line,
    margin: f32,
    options: &LayoutOptions,
) -> bool {
    if current.is_empty() || prev.is_empty() {
        return false;
    }

    let current_deviation = (current.left() - margin).abs();
    let prev_deviation = (prev.left() - margin).abs();
    let significant_deviation = current_deviation > options.significant_deviation
        || prev_deviation > options.significant_deviation;
    let substantial_change = (current.left() - prev.left()).abs() > options.substantial_shift;

    significant_deviation || substantial_change
}

/// The right-most edge of the two lines, standing in for the text width.
fn reference_width(prev: &Line, current: &Line) -> f32 {
    prev.right().max(current.right())
}

/// Previous line is short, or the two widths differ markedly.
///
/// Obvious punctuation continuations never break.
pub fn is_short_line_break(prev: &Line, current: &Line, options: &LayoutOptions) -> bool {
    if prev.is_empty() || current.is_empty() {
        return false;
    }

    let reference = reference_width(prev, current);
    if reference <= 0.0 {
        return false;
    }

    let prev_text = prev.text();
    let current_text = current.text();
    let logical_continuation = SOFT_ENDINGS.iter().any(|e| prev_text.ends_with(e));
    let starts_continuation = SOFT_STARTS.iter().any(|s| current_text.starts_with(s));
    if logical_continuation || starts_continuation {
        return false;
    }

    let prev_width = prev.width();
    let current_width = current.width();
    prev_width < reference * options.short_line_ratio
        || (prev_width - current_width).abs() > reference * options.width_difference_ratio
}

/// Mean word height differs by more than `ratio` of the larger one.
pub fn has_formatting_change(current: &Line, prev: &Line, ratio: f32) -> bool {
    if current.is_empty() || prev.is_empty() {
        return false;
    }

    let current_height = current.average_word_height();
    let prev_height = prev.average_word_height();
    let larger = current_height.max(prev_height);
    if larger <= 0.0 {
        return false;
    }

    (current_height - prev_height).abs() / larger > ratio
}

/// Strong sentence boundary between main-aligned lines.
pub fn is_clear_paragraph_break(prev: &Line, current: &Line, short_ratio: f32) -> bool {
    if prev.is_empty() || current.is_empty() {
        return false;
    }

    let prev_text = prev.text();
    let current_text = current.text();

    let ends_with_strong = STRONG_ENDINGS.iter().any(|e| prev_text.ends_with(e));
    let starts_with_structure = STRUCTURAL_STARTS.iter().any(|s| current_text.starts_with(s));
    let starts_with_capital = current_text
        .chars()
        .next()
        .map(char::is_uppercase)
        .unwrap_or(false);

    let prev_short = prev.width() < reference_width(prev, current) * short_ratio;

    (ends_with_strong && starts_with_capital)
        || (prev_short && starts_with_capital && ends_with_strong)
        || starts_with_structure
}

/// Splits the lines of a page into paragraphs.
pub struct ParagraphSegmenter {
    options: LayoutOptions,
}

impl ParagraphSegmenter {
    /// Create a segmenter with default thresholds.
    pub fn new() -> Self {
        Self {
            options: LayoutOptions::default(),
        }
    }

    /// Create a segmenter with custom thresholds.
    pub fn with_options(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Thresholds in use.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Group, measure and segment the words of one page.
    ///
    /// Paragraph ids in the result are page-local, starting at 0.
    pub fn segment_page(&self, words: Vec<Word>) -> Vec<Paragraph> {
        let lines = group_words_into_lines(words, self.options.line_tolerance);
        let margin = dominant_margin(&lines, self.options.margin_bucket_radius);
        log::debug!(
            "Page segmentation: {} lines, dominant margin {:.1}",
            lines.len(),
            margin
        );
        self.segment_lines(lines, margin)
    }

    /// Segment ordered lines against a known dominant margin.
    ///
    /// Every word lands in exactly one paragraph. Ids are page-local.
    pub fn segment_lines(&self, lines: Vec<Line>, margin: f32) -> Vec<Paragraph> {
        let mut paragraphs: Vec<Paragraph> = Vec::new();
        let mut current: Vec<Word> = Vec::new();
        let mut prev: Option<Line> = None;

        for line in lines {
            if line.is_empty() {
                continue;
            }

            let reason = match &prev {
                None => Some(BreakReason::FirstLine),
                Some(prev_line) => self.break_reason(prev_line, &line, margin),
            };

            if let Some(reason) = reason {
                log::trace!("New paragraph ({:?}) at {:?}", reason, line.text());
                if !current.is_empty() {
                    paragraphs.push(Paragraph::from_words(
                        paragraphs.len(),
                        std::mem::take(&mut current),
                    ));
                }
            }

            current.extend(line.words.iter().cloned().map(|mut w| {
                w.clear_paragraph_tags();
                w
            }));
            prev = Some(line);
        }

        if !current.is_empty() {
            paragraphs.push(Paragraph::from_words(paragraphs.len(), current));
        }

        paragraphs
    }

    /// Decide whether `current` opens a new paragraph after `prev`.
    pub fn break_reason(&self, prev: &Line, current: &Line, margin: f32) -> Option<BreakReason> {
        let options = &self.options;

        if is_incomplete_line(&prev.text(), &current.text()) {
            return None;
        }

        let tolerance = options.main_alignment_tolerance;
        let both_main_aligned = (current.left() - margin).abs() <= tolerance
            && (prev.left() - margin).abs() <= tolerance;

        if both_main_aligned {
            if has_vertical_spacing(current, prev, options.spacing_ratio)
                && has_significant_indentation_change(current, prev, margin, options)
            {
                return Some(BreakReason::AlignedSpacing);
            }
            if is_clear_paragraph_break(prev, current, options.clear_break_short_ratio) {
                return Some(BreakReason::ClearBreak);
            }
            return None;
        }

        if has_vertical_spacing(current, prev, options.spacing_ratio) {
            Some(BreakReason::VerticalSpacing)
        } else if has_indentation_change(current, prev, options.indentation_shift) {
            Some(BreakReason::Indentation)
        } else if is_short_line_break(prev, current, options) {
            Some(BreakReason::ShortLine)
        } else if has_formatting_change(current, prev, options.formatting_change_ratio) {
            Some(BreakReason::Formatting)
        } else {
            None
        }
    }
}

impl Default for ParagraphSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a line of words laid out left to right from `x`, 6 units per char.
    fn line(text: &str, x: f32, y: f32, height: f32) -> Line {
        let mut words = Vec::new();
        let mut cursor = x;
        for token in text.split_whitespace() {
            let width = token.chars().count() as f32 * 6.0;
            words.push(Word::new(token, 1, cursor, y, width, height));
            cursor += width + 4.0;
        }
        Line::from_words(words)
    }

    #[test]
    fn test_incomplete_preposition_ending() {
        assert!(is_incomplete_line("the cat sat on", "the mat"));
        assert!(is_incomplete_line("The cat sat on", "The mat"));
    }

    #[test]
    fn test_incomplete_punctuation_and_starts() {
        assert!(is_incomplete_line("First clause,", "Second clause"));
        assert!(is_incomplete_line("A sentence.", "However it went on"));
        assert!(is_incomplete_line("A sentence.", ") closes it"));
        assert!(!is_incomplete_line("A sentence.", "Another one"));
        assert!(!is_incomplete_line("", "anything"));
    }

    #[test]
    fn test_incomplete_trailing_substring() {
        // "bathe" ends with "the"
        assert!(is_incomplete_line("They went to bathe", "Then left"));
    }

    #[test]
    fn test_vertical_spacing() {
        let prev = line("First line", 72.0, 100.0, 12.0);
        let close = line("Second line", 72.0, 114.0, 12.0);
        let far = line("Second line", 72.0, 130.0, 12.0);

        assert!(!has_vertical_spacing(&close, &prev, 1.0));
        assert!(has_vertical_spacing(&far, &prev, 1.0));
    }

    #[test]
    fn test_formatting_change() {
        let body = line("Body text here", 72.0, 100.0, 12.0);
        let heading = line("Heading", 72.0, 120.0, 18.0);
        let similar = line("More text", 72.0, 120.0, 13.0);

        assert!(has_formatting_change(&heading, &body, 0.15));
        assert!(!has_formatting_change(&similar, &body, 0.15));
    }

    #[test]
    fn test_formatting_change_zero_geometry() {
        let a = line("x", 0.0, 0.0, 0.0);
        let b = line("y", 0.0, 0.0, 0.0);
        assert!(!has_formatting_change(&a, &b, 0.15));
    }

    #[test]
    fn test_short_line_break() {
        let options = LayoutOptions::default();
        let short = line("End.", 72.0, 100.0, 12.0);
        let long = line(
            "A long following line of body text that fills the column",
            72.0,
            114.0,
            12.0,
        );
        assert!(is_short_line_break(&short, &long, &options));

        let soft = line("Wait,", 72.0, 100.0, 12.0);
        assert!(!is_short_line_break(&soft, &long, &options));
    }

    #[test]
    fn test_clear_break() {
        let prev = line("It ended here.", 72.0, 100.0, 12.0);
        let next = line("Something new", 72.0, 114.0, 12.0);
        assert!(is_clear_paragraph_break(&prev, &next, 0.5));

        let keyword_prev = line("no terminal punctuation", 72.0, 100.0, 12.0);
        let keyword = line("Chapter Two", 72.0, 114.0, 12.0);
        assert!(is_clear_paragraph_break(&keyword_prev, &keyword, 0.5));

        let open = line("It went on", 72.0, 100.0, 12.0);
        assert!(!is_clear_paragraph_break(&open, &next, 0.5));
    }

    #[test]
    fn test_incomplete_wins_over_spacing() {
        let segmenter = ParagraphSegmenter::new();
        let prev = line("the cat sat on", 200.0, 100.0, 12.0);
        let current = line("the mat", 72.0, 200.0, 12.0);
        assert_eq!(segmenter.break_reason(&prev, &current, 72.0), None);
    }

    #[test]
    fn test_main_aligned_needs_clear_break() {
        let segmenter = ParagraphSegmenter::new();
        let prev = line("A line that keeps going without", 72.0, 100.0, 12.0);
        let prev_closed = line("A line that ends here.", 72.0, 100.0, 12.0);
        let current = line("Next line starts", 72.0, 114.0, 12.0);

        // "without" is not in the ending list, so the text test passes through.
        assert_eq!(segmenter.break_reason(&prev, &current, 72.0), None);
        assert_eq!(
            segmenter.break_reason(&prev_closed, &current, 72.0),
            Some(BreakReason::ClearBreak)
        );
    }

    #[test]
    fn test_non_aligned_rule_order() {
        let segmenter = ParagraphSegmenter::new();
        let prev = line("Quoted block text", 120.0, 100.0, 12.0);

        let spaced = line("Next block text", 120.0, 140.0, 12.0);
        assert_eq!(
            segmenter.break_reason(&prev, &spaced, 72.0),
            Some(BreakReason::VerticalSpacing)
        );

        let shifted = line("Next block text", 140.0, 114.0, 12.0);
        assert_eq!(
            segmenter.break_reason(&prev, &shifted, 72.0),
            Some(BreakReason::Indentation)
        );
    }

    #[test]
    fn test_segment_lines_markers_and_ids() {
        let segmenter = ParagraphSegmenter::new();
        let lines = vec![
            line("The first paragraph opens here and", 72.0, 100.0, 12.0),
            line("continues onto a second line.", 72.0, 114.0, 12.0),
            line("Another paragraph begins.", 72.0, 128.0, 12.0),
        ];
        let paragraphs = segmenter.segment_lines(lines, 72.0);

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].id, 0);
        assert_eq!(paragraphs[1].id, 1);
        for p in &paragraphs {
            assert_eq!(p.words.iter().filter(|w| w.paragraph_start).count(), 1);
            assert_eq!(p.words.iter().filter(|w| w.paragraph_end).count(), 1);
            assert!(p.words.first().unwrap().paragraph_start);
            assert!(p.words.last().unwrap().paragraph_end);
        }
        assert_eq!(paragraphs[1].text(), "Another paragraph begins.");
    }

    #[test]
    fn test_segment_single_line_page() {
        let segmenter = ParagraphSegmenter::new();
        let paragraphs = segmenter.segment_lines(vec![line("Alone", 72.0, 100.0, 12.0)], 72.0);
        assert_eq!(paragraphs.len(), 1);
        assert!(paragraphs[0].words[0].paragraph_start);
        assert!(paragraphs[0].words[0].paragraph_end);
    }

    #[test]
    fn test_segment_empty_page() {
        let segmenter = ParagraphSegmenter::new();
        assert!(segmenter.segment_page(vec![]).is_empty());
        assert!(segmenter.segment_lines(vec![], 0.0).is_empty());
    }

    #[test]
    fn test_segment_page_keeps_every_word() {
        let segmenter = ParagraphSegmenter::new();
        let mut words = Vec::new();
        for (i, text) in ["Heading", "body", "text", "More."].iter().enumerate() {
            let (x, y) = (72.0 + i as f32 * 3.0, 100.0 + i as f32 * 20.0);
            words.push(Word::new(*text, 1, x, y, 30.0, 12.0));
        }
        let paragraphs = segmenter.segment_page(words);
        let total: usize = paragraphs.iter().map(Paragraph::len).sum();
        assert_eq!(total, 4);
    }
}
