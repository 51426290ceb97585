//! Cross-page detection of headers, footers and page numbers.
//!
//! Detection works on the whole paragraph-tagged word stream. Each page is
//! regrouped into lines, lines are sorted into vertical zones, and candidates
//! are promoted only when they recur across enough pages.
//!
//! Zone tests use `page_height` as the reference for positional consistency,
//! not the height of the line. On documents with mixed page sizes this can
//! over- or under-tolerate drift.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{DetectedPatterns, Line, PatternKind, PatternOccurrence, Word};

use super::lines::group_words_into_lines;
use super::options::PatternOptions;

static URL_OR_DOCUMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)file:///|https?://|\.(pdf|epub|docx?|txt|html?|rtf|odt|md)\b")
        .expect("URL/document regex pattern is valid and should compile")
});
static PURE_DIGITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,4}$").expect("Digit regex pattern is valid and should compile")
});
static ROMAN_NUMERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ivxlcdmIVXLCDM ]*[ivxlcdmIVXLCDM][ivxlcdmIVXLCDM ]*$")
        .expect("Roman numeral regex pattern is valid and should compile")
});

/// Tokens at least this long that contain `/` are treated as paths.
const LONG_PATH_TOKEN: usize = 20;

/// Whether a line looks like a printed file path or URL.
pub fn is_file_path_line(text: &str) -> bool {
    URL_OR_DOCUMENT.is_match(text)
        || text
            .split_whitespace()
            .any(|token| token.contains('/') && token.chars().count() >= LONG_PATH_TOKEN)
}

/// Whether a line's text has the shape of a page number.
///
/// Accepts short pure digits, "page N", "N of M", Roman numerals, and short
/// digit runs with `-`, `.` or `/` separators.
pub fn is_page_number_text(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }

    let len = text.chars().count();
    let has_digit = text.chars().any(|c| c.is_ascii_digit());

    PURE_DIGITS.is_match(text)
        || (has_digit && text.to_lowercase().contains("page"))
        || (has_digit && text.contains(" of "))
        || (len <= 10 && ROMAN_NUMERAL.is_match(text))
        || (has_digit && len <= 15 && text.contains(['-', '.', '/']))
}

/// Per-page zone assignment of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    FilePathFooter,
    Header,
    Footer,
    Body,
    /// No page size available
    Unknown,
}

/// Detects recurring page furniture across a document.
pub struct PatternDetector {
    options: PatternOptions,
    line_tolerance: f32,
}

impl PatternDetector {
    /// Create a detector with default thresholds.
    pub fn new() -> Self {
        Self::with_options(PatternOptions::default())
    }

    /// Create a detector with custom thresholds.
    pub fn with_options(options: PatternOptions) -> Self {
        Self {
            options,
            line_tolerance: 3.0,
        }
    }

    /// Set the tolerance used to regroup words into lines.
    pub fn with_line_tolerance(mut self, tolerance: f32) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Scan the full word stream for repeated boilerplate.
    ///
    /// Returns an empty result for documents under the minimum word or page
    /// count, where cross-page repetition cannot be established.
    pub fn detect(&self, words: &[Word]) -> DetectedPatterns {
        let mut result = DetectedPatterns::new();

        if words.len() < self.options.min_words {
            log::debug!(
                "PatternDetector: skipped, {} words < {}",
                words.len(),
                self.options.min_words
            );
            return result;
        }

        let mut pages: BTreeMap<u32, Vec<Word>> = BTreeMap::new();
        for word in words {
            pages.entry(word.page).or_default().push(word.clone());
        }

        let page_count = pages.len();
        if page_count < self.options.min_pages.max(2) {
            log::debug!("PatternDetector: skipped, only {} page(s)", page_count);
            return result;
        }

        let mut headers: Vec<Line> = Vec::new();
        let mut footers: Vec<Line> = Vec::new();
        let mut body: Vec<Line> = Vec::new();
        let mut page_numbers: Vec<Line> = Vec::new();

        for (page, page_words) in pages {
            if page_words.iter().all(|w| w.page_height <= 0.0) {
                log::warn!("PatternDetector: page {} has no page size, zones skipped", page);
            }
            let lines = group_words_into_lines(page_words, self.line_tolerance);

            for line in lines {
                let text = line.text();
                if text.is_empty() {
                    continue;
                }

                if is_page_number_text(&text) && self.near_page_edge(&line) {
                    page_numbers.push(line.clone());
                }

                match self.zone_of(&line, &text) {
                    Zone::FilePathFooter => {
                        log::debug!(
                            "PatternDetector: file path footer on page {}: {:?}",
                            page,
                            text
                        );
                        result.push(PatternOccurrence::from_line(PatternKind::Footer, &line));
                    }
                    Zone::Header => headers.push(line),
                    Zone::Footer => footers.push(line),
                    Zone::Body => body.push(line),
                    Zone::Unknown => {}
                }
            }
        }

        let zone_pages = self.options.zone_min_pages(page_count);
        let variance = self.options.position_variance_ratio;
        for occ in promote_by_text(&headers, PatternKind::Header, zone_pages, variance) {
            result.push(occ);
        }
        for occ in promote_by_text(&footers, PatternKind::Footer, zone_pages, variance) {
            result.push(occ);
        }

        let number_pages = self.options.page_number_min_pages(page_count);
        for occ in self.promote_by_position(&page_numbers, number_pages) {
            result.push(occ);
        }

        let repeat_pages = self.options.repeat_min_pages(page_count);
        let repeated_body: Vec<Line> = body
            .into_iter()
            .filter(|l| l.text().chars().count() >= 3)
            .collect();
        for occ in promote_by_text(
            &repeated_body,
            PatternKind::OtherRepeat,
            repeat_pages,
            self.options.repeat_variance_ratio,
        ) {
            result.push(occ);
        }

        log::info!(
            "PatternDetector: {} headers, {} footers, {} page numbers, {} other repeats, {} pages",
            result.headers.len(),
            result.footers.len(),
            result.page_numbers.len(),
            result.other_repeats.len(),
            page_count
        );

        result
    }

    /// Classify a line by vertical zone. File paths are checked first.
    fn zone_of(&self, line: &Line, text: &str) -> Zone {
        let height = line.page_height();
        if height <= 0.0 {
            return Zone::Unknown;
        }

        let y = line.mean_y();
        if is_file_path_line(text) && y > height * (1.0 - self.options.file_path_zone) {
            Zone::FilePathFooter
        } else if y < height * self.options.header_zone {
            Zone::Header
        } else if y > height * (1.0 - self.options.footer_zone) {
            Zone::Footer
        } else {
            Zone::Body
        }
    }

    /// Whether a line sits in an outer horizontal or vertical band.
    fn near_page_edge(&self, line: &Line) -> bool {
        let (width, height) = (line.page_width(), line.page_height());
        let (x, y) = (line.mean_x(), line.mean_y());

        let edge_x = self.options.page_number_edge_x;
        let edge_y = self.options.page_number_edge_y;
        let near_x = width > 0.0 && (x < width * edge_x || x > width * (1.0 - edge_x));
        let near_y = height > 0.0 && (y < height * edge_y || y > height * (1.0 - edge_y));
        near_x || near_y
    }

    /// Group page-number candidates by coarse position instead of text.
    fn promote_by_position(&self, lines: &[Line], min_pages: usize) -> Vec<PatternOccurrence> {
        let bucket = if self.options.position_bucket > 0.0 {
            self.options.position_bucket
        } else {
            1.0
        };

        let mut order: Vec<(i64, i64)> = Vec::new();
        let mut groups: HashMap<(i64, i64), Vec<&Line>> = HashMap::new();
        for line in lines {
            let key = (
                (line.mean_x() / bucket).floor() as i64,
                (line.mean_y() / bucket).floor() as i64,
            );
            let group = groups.entry(key).or_default();
            if group.is_empty() {
                order.push(key);
            }
            group.push(line);
        }

        let mut promoted = Vec::new();
        for key in order {
            let group = &groups[&key];
            let pages: BTreeSet<u32> = group.iter().map(|l| l.page()).collect();
            if pages.len() >= min_pages {
                log::debug!(
                    "PatternDetector: page numbers at cell {:?} on {} pages",
                    key,
                    pages.len()
                );
                promoted.extend(
                    group
                        .iter()
                        .map(|l| PatternOccurrence::from_line(PatternKind::PageNumber, l)),
                );
            }
        }
        promoted
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Group lines by exact text and keep groups that recur on enough pages
/// with a vertical spread under `variance_ratio` of the page height.
fn promote_by_text(
    lines: &[Line],
    kind: PatternKind,
    min_pages: usize,
    variance_ratio: f32,
) -> Vec<PatternOccurrence> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&Line>> = HashMap::new();
    for line in lines {
        let text = line.text();
        let group = groups.entry(text.clone()).or_default();
        if group.is_empty() {
            order.push(text);
        }
        group.push(line);
    }

    let mut promoted = Vec::new();
    for text in order {
        let group = &groups[&text];
        let pages: BTreeSet<u32> = group.iter().map(|l| l.page()).collect();
        if pages.len() < min_pages {
            continue;
        }

        let ys: Vec<f32> = group.iter().map(|l| l.mean_y()).collect();
        let highest = ys.iter().cloned().fold(f32::MIN, f32::max);
        let lowest = ys.iter().cloned().fold(f32::MAX, f32::min);
        let spread = highest - lowest;
        let page_height = group[0].page_height();
        if spread >= page_height * variance_ratio {
            log::debug!(
                "PatternDetector: {:?} {:?} drifts {:.1}, not promoted",
                kind,
                text,
                spread
            );
            continue;
        }

        log::debug!("PatternDetector: {:?} {:?} on {} pages", kind, text, pages.len());
        promoted.extend(group.iter().map(|l| PatternOccurrence::from_line(kind, l)));
    }
    promoted
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_W: f32 = 612.0;
    const PAGE_H: f32 = 792.0;

    fn line_words(text: &str, page: u32, x: f32, y: f32) -> Vec<Word> {
        let mut words = Vec::new();
        let mut cursor = x;
        for token in text.split_whitespace() {
            let width = token.chars().count() as f32 * 6.0;
            words.push(
                Word::new(token, page, cursor, y, width, 12.0).with_page_size(PAGE_W, PAGE_H),
            );
            cursor += width + 4.0;
        }
        words
    }

    fn body(page: u32) -> Vec<Word> {
        let mut words = Vec::new();
        for row in 0..4 {
            let text = format!("Body line {} on sheet {} keeps prose distinct", row, page);
            words.extend(line_words(&text, page, 72.0, 300.0 + row as f32 * 16.0));
        }
        words
    }

    #[test]
    fn test_page_number_shapes() {
        assert!(is_page_number_text("12"));
        assert!(is_page_number_text("Page 3"));
        assert!(is_page_number_text("3 of 10"));
        assert!(is_page_number_text("xiv"));
        assert!(is_page_number_text("1-2"));
        assert!(!is_page_number_text("12345"));
        assert!(!is_page_number_text("Document Title"));
        assert!(!is_page_number_text("   "));
    }

    #[test]
    fn test_file_path_lines() {
        assert!(is_file_path_line("file:///home/user/report.html"));
        assert!(is_file_path_line("see https://example.com"));
        assert!(is_file_path_line("draft.pdf"));
        assert!(is_file_path_line("C:/Users/someone/Documents/longname"));
        assert!(!is_file_path_line("either/or"));
        assert!(!is_file_path_line("An ordinary sentence."));
    }

    #[test]
    fn test_small_documents_are_skipped() {
        let mut words = line_words("Title", 1, 72.0, 30.0);
        words.extend(line_words("Title", 2, 72.0, 30.0));
        assert!(PatternDetector::new().detect(&words).is_empty());

        let single_page: Vec<Word> = (0..60)
            .flat_map(|i| line_words("word", 1, 72.0, i as f32 * 12.0))
            .collect();
        assert!(PatternDetector::new().detect(&single_page).is_empty());
    }

    #[test]
    fn test_detects_headers_and_page_numbers() {
        let mut words = Vec::new();
        for page in 1..=3 {
            words.extend(line_words("Document Title", page, 250.0, 30.0));
            words.extend(body(page));
            words.extend(line_words(&format!("Page {} of 3", page), page, 270.0, 760.0));
        }

        let patterns = PatternDetector::new().detect(&words);
        assert_eq!(patterns.headers.len(), 3);
        assert!(patterns.headers.iter().all(|h| h.text == "Document Title"));
        assert_eq!(patterns.page_numbers.len(), 3);
        assert!(patterns.footers.is_empty());
        assert!(patterns.other_repeats.is_empty());
    }

    #[test]
    fn test_drifting_header_not_promoted() {
        let mut words = Vec::new();
        words.extend(line_words("Running Head", 1, 72.0, 5.0));
        words.extend(line_words("Running Head", 2, 72.0, 150.0));
        for page in 1..=2 {
            words.extend(body(page));
        }
        let detector = PatternDetector::with_options(PatternOptions::new().with_minimums(10, 2));
        let patterns = detector.detect(&words);
        // spread 145 is under 20% of 792 (158.4), so the header is promoted
        assert_eq!(patterns.headers.len(), 2);

        let strict = PatternOptions {
            position_variance_ratio: 0.1,
            ..PatternOptions::new().with_minimums(10, 2)
        };
        let patterns = PatternDetector::with_options(strict).detect(&words);
        assert!(patterns.headers.is_empty());
    }

    #[test]
    fn test_file_path_footer_routed_directly() {
        let mut words = Vec::new();
        for page in 1..=2 {
            words.extend(body(page));
            words.extend(line_words(
                &format!("file:///tmp/export/notes.html {}/2", page),
                page,
                20.0,
                770.0,
            ));
        }
        let detector = PatternDetector::with_options(PatternOptions::new().with_minimums(10, 2));
        let patterns = detector.detect(&words);
        assert_eq!(patterns.footers.len(), 2);
        assert!(patterns.footers[0].text.starts_with("file:///"));
    }

    #[test]
    fn test_url_in_body_is_not_a_footer() {
        let mut words = Vec::new();
        for page in 1..=2 {
            words.extend(body(page));
        }
        words.extend(line_words(
            "The full dataset lives at https://example.org/data for readers.",
            1,
            72.0,
            475.0,
        ));
        let detector = PatternDetector::with_options(PatternOptions::new().with_minimums(10, 2));
        let patterns = detector.detect(&words);
        assert!(patterns.footers.is_empty());
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_detects_footers_by_text() {
        let mut words = Vec::new();
        for page in 1..=3 {
            words.extend(body(page));
            words.extend(line_words("Confidential Draft", page, 72.0, 760.0));
        }

        let patterns = PatternDetector::new().detect(&words);
        assert_eq!(patterns.footers.len(), 3);
        assert!(patterns.footers.iter().all(|f| f.text == "Confidential Draft"));
        assert!(patterns.headers.is_empty());
        assert!(patterns.page_numbers.is_empty());
    }

    #[test]
    fn test_detects_other_repeats_in_body() {
        let mut words = Vec::new();
        for page in 1..=3 {
            words.extend(body(page));
            words.extend(line_words("Draft watermark", page, 200.0, 400.0));
        }

        let patterns = PatternDetector::new().detect(&words);
        assert_eq!(patterns.other_repeats.len(), 3);
        assert!(patterns.other_repeats.iter().all(|o| o.text == "Draft watermark"));
        assert!(patterns.headers.is_empty());
        assert!(patterns.footers.is_empty());
    }

    #[test]
    fn test_other_repeats_need_enough_pages() {
        let mut words = Vec::new();
        for page in 1..=3 {
            words.extend(body(page));
        }
        words.extend(line_words("Draft watermark", 1, 200.0, 400.0));
        words.extend(line_words("Draft watermark", 2, 200.0, 400.0));

        let patterns = PatternDetector::new().detect(&words);
        assert!(patterns.other_repeats.is_empty());
    }

    #[test]
    fn test_page_number_away_from_edges_is_ignored() {
        let mut centred = Vec::new();
        let mut bottom = Vec::new();
        for page in 1..=3 {
            let label = format!("Page {}", page);
            centred.extend(body(page));
            centred.extend(line_words(&label, page, 290.0, 396.0));
            bottom.extend(body(page));
            bottom.extend(line_words(&label, page, 290.0, 760.0));
        }

        let patterns = PatternDetector::new().detect(&centred);
        assert!(patterns.page_numbers.is_empty());

        let patterns = PatternDetector::new().detect(&bottom);
        assert_eq!(patterns.page_numbers.len(), 3);
    }

    #[test]
    fn test_zero_geometry_detects_nothing() {
        let words: Vec<Word> = (0..120)
            .map(|i| Word::new("same", 1 + (i % 3) as u32, 0.0, 0.0, 0.0, 0.0))
            .collect();
        let patterns = PatternDetector::new().detect(&words);
        assert!(patterns.headers.is_empty());
        assert!(patterns.footers.is_empty());
        assert!(patterns.page_numbers.is_empty());
    }
}
