//! Line grouping by vertical position.

use std::cmp::Ordering;

use crate::model::{Line, Word};

/// Group the words of one page into lines, top-to-bottom.
///
/// Words are sorted by `(y, x)` and walked once. A word joins the current
/// line while `|word.y - reference_y| <= tolerance`, where the reference is the
/// `y` of the word that opened the line. The tolerance is fixed, not adaptive.
pub fn group_words_into_lines(mut words: Vec<Word>, tolerance: f32) -> Vec<Line> {
    if words.is_empty() {
        return vec![];
    }

    words.sort_by(|a, b| {
        let y_cmp = a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal);
        if y_cmp == Ordering::Equal {
            a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal)
        } else {
            y_cmp
        }
    });

    let mut lines: Vec<Line> = Vec::new();
    let mut current_words: Vec<Word> = Vec::new();
    let mut reference_y: Option<f32> = None;

    for word in words {
        match reference_y {
            Some(y) if (word.y - y).abs() <= tolerance => {
                current_words.push(word);
            }
            _ => {
                if !current_words.is_empty() {
                    lines.push(Line::from_words(std::mem::take(&mut current_words)));
                }
                reference_y = Some(word.y);
                current_words.push(word);
            }
        }
    }

    if !current_words.is_empty() {
        lines.push(Line::from_words(current_words));
    }

    log::trace!("Grouped words into {} lines", lines.len());
    lines
}
