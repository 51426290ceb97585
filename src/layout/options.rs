//! Tuning thresholds for layout analysis and pattern filtering.
//!
//! All distances are in the layout units of the geometry source (PDF points
//! for most parsers). Ratios are fractions of the reference quantity named in
//! each field.

use serde::{Deserialize, Serialize};

/// Thresholds for line grouping, margin analysis and paragraph segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Maximum vertical offset for a word to join the current line
    pub line_tolerance: f32,

    /// Radius for bucketing left margins
    pub margin_bucket_radius: f32,

    /// Maximum deviation from the dominant margin to count as main-aligned
    pub main_alignment_tolerance: f32,

    /// Gap between lines, as a multiple of average line height, that signals a break
    pub spacing_ratio: f32,

    /// Deviation from the margin that counts as a significant indent (main-aligned lines)
    pub significant_deviation: f32,

    /// Shift between two lines that counts as substantial (main-aligned lines)
    pub substantial_shift: f32,

    /// Indentation shift that signals a break (non-aligned lines)
    pub indentation_shift: f32,

    /// Width ratio under which a line is short for the clear-break test
    pub clear_break_short_ratio: f32,

    /// Width ratio under which a line is short for the short-line test
    pub short_line_ratio: f32,

    /// Width difference ratio that signals a break
    pub width_difference_ratio: f32,

    /// Relative word-height difference that signals a formatting change
    pub formatting_change_ratio: f32,
}

impl LayoutOptions {
    /// Create layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set line grouping tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f32) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Set margin bucket radius.
    pub fn with_margin_bucket_radius(mut self, radius: f32) -> Self {
        self.margin_bucket_radius = radius;
        self
    }

    /// Set main alignment tolerance.
    pub fn with_main_alignment_tolerance(mut self, tolerance: f32) -> Self {
        self.main_alignment_tolerance = tolerance;
        self
    }

    /// Set vertical spacing ratio.
    pub fn with_spacing_ratio(mut self, ratio: f32) -> Self {
        self.spacing_ratio = ratio;
        self
    }

    /// Set indentation shift for non-aligned lines.
    pub fn with_indentation_shift(mut self, shift: f32) -> Self {
        self.indentation_shift = shift;
        self
    }

    /// Set short-line and width-difference ratios.
    pub fn with_line_width_ratios(mut self, short_line: f32, width_difference: f32) -> Self {
        self.short_line_ratio = short_line;
        self.width_difference_ratio = width_difference;
        self
    }

    /// Set formatting change ratio.
    pub fn with_formatting_change_ratio(mut self, ratio: f32) -> Self {
        self.formatting_change_ratio = ratio;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            line_tolerance: 3.0,
            margin_bucket_radius: 5.0,
            main_alignment_tolerance: 8.0,
            spacing_ratio: 1.0,
            significant_deviation: 15.0,
            substantial_shift: 20.0,
            indentation_shift: 10.0,
            clear_break_short_ratio: 0.5,
            short_line_ratio: 0.6,
            width_difference_ratio: 0.3,
            formatting_change_ratio: 0.15,
        }
    }
}

/// Thresholds for cross-page pattern detection and filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternOptions {
    /// Minimum words in the document before detection runs
    pub min_words: usize,

    /// Minimum distinct pages before detection runs
    pub min_pages: usize,

    /// Top fraction of the page treated as header zone
    pub header_zone: f32,

    /// Bottom fraction of the page treated as footer zone
    pub footer_zone: f32,

    /// Bottom fraction of the page where file-path lines become footers
    pub file_path_zone: f32,

    /// Header/footer text must recur on `max(2, pages / divisor)` pages
    pub zone_page_divisor: usize,

    /// Page numbers must recur on `max(2, pages / divisor)` positions
    pub page_number_page_divisor: usize,

    /// Maximum vertical spread of a header/footer, as a fraction of page height
    pub position_variance_ratio: f32,

    /// Horizontal edge band for page numbers, as a fraction of page width
    pub page_number_edge_x: f32,

    /// Vertical edge band for page numbers, as a fraction of page height
    pub page_number_edge_y: f32,

    /// Cell size of the coarse position key for page numbers
    pub position_bucket: f32,

    /// Coordinate tolerance when matching words by geometry
    pub geometric_match_tolerance: f32,

    /// Other repeats must recur on `max(3, pages / divisor)` pages
    pub repeat_page_divisor: usize,

    /// Maximum vertical spread of other repeats, as a fraction of page height
    pub repeat_variance_ratio: f32,
}

impl PatternOptions {
    /// Create pattern options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum document size for detection.
    pub fn with_minimums(mut self, words: usize, pages: usize) -> Self {
        self.min_words = words;
        self.min_pages = pages;
        self
    }

    /// Set header and footer zone fractions.
    pub fn with_zones(mut self, header: f32, footer: f32) -> Self {
        self.header_zone = header;
        self.footer_zone = footer;
        self
    }

    /// Set position bucket size for page numbers.
    pub fn with_position_bucket(mut self, size: f32) -> Self {
        self.position_bucket = size;
        self
    }

    /// Required page count for header/footer promotion.
    pub fn zone_min_pages(&self, page_count: usize) -> usize {
        (page_count / self.zone_page_divisor.max(1)).max(2)
    }

    /// Required page count for page-number promotion.
    pub fn page_number_min_pages(&self, page_count: usize) -> usize {
        (page_count / self.page_number_page_divisor.max(1)).max(2)
    }

    /// Required page count for other-repeat promotion.
    pub fn repeat_min_pages(&self, page_count: usize) -> usize {
        (page_count / self.repeat_page_divisor.max(1)).max(3)
    }
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            min_words: 50,
            min_pages: 2,
            header_zone: 0.2,
            footer_zone: 0.2,
            file_path_zone: 0.2,
            zone_page_divisor: 4,
            page_number_page_divisor: 3,
            position_variance_ratio: 0.2,
            page_number_edge_x: 0.3,
            page_number_edge_y: 0.15,
            position_bucket: 50.0,
            geometric_match_tolerance: 1.0,
            repeat_page_divisor: 2,
            repeat_variance_ratio: 0.05,
        }
    }
}
