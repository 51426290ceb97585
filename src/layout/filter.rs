//! Removal of detected boilerplate and output invariant checks.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::model::{paragraph_runs, DetectedPatterns, FilterResult, Word};

use super::options::PatternOptions;

/// Removes detected boilerplate words and densely reindexes the rest.
pub struct PatternFilter {
    options: PatternOptions,
}

impl PatternFilter {
    /// Create a filter with default thresholds.
    pub fn new() -> Self {
        Self {
            options: PatternOptions::default(),
        }
    }

    /// Create a filter with custom thresholds.
    pub fn with_options(options: PatternOptions) -> Self {
        Self { options }
    }

    /// Drop every word referenced by `patterns` from `words`.
    ///
    /// Words are located by their `index`. When the index does not resolve
    /// to the same text on the same page (stale or missing index), the word
    /// is matched by text, page and position within the geometric tolerance.
    /// Survivors get fresh indices `0..n` and keep their old index in
    /// `original_index`, and paragraph markers are moved onto the first and
    /// last surviving word of each paragraph. The input is not modified.
    pub fn apply(&self, words: &[Word], patterns: &DetectedPatterns) -> Result<FilterResult> {
        if patterns.is_empty() || words.is_empty() {
            return Ok(FilterResult::unchanged(words));
        }

        let position_by_index: HashMap<usize, usize> = words
            .iter()
            .enumerate()
            .map(|(position, w)| (w.index, position))
            .collect();

        let mut dropped: HashSet<usize> = HashSet::new();
        for occurrence in patterns.iter() {
            for target in &occurrence.words {
                let by_index = position_by_index
                    .get(&target.index)
                    .copied()
                    .filter(|&pos| {
                        words[pos].text == target.text && words[pos].page == target.page
                    });

                match by_index.or_else(|| self.match_by_geometry(words, target)) {
                    Some(position) => {
                        dropped.insert(position);
                    }
                    None => log::warn!(
                        "PatternFilter: no word matches {:?} on page {}",
                        target.text,
                        target.page
                    ),
                }
            }
        }

        let mut output: Vec<Word> = Vec::with_capacity(words.len() - dropped.len());
        for (position, word) in words.iter().enumerate() {
            if dropped.contains(&position) {
                continue;
            }
            let mut word = word.clone();
            word.original_index = Some(word.index);
            word.index = output.len();
            output.push(word);
        }

        remark_paragraph_boundaries(&mut output);
        verify_dense_indices(&output)?;
        verify_paragraph_markers(&output)?;

        let removed_count = words.len() - output.len();
        log::info!(
            "PatternFilter: removed {} of {} words",
            removed_count,
            words.len()
        );

        Ok(FilterResult {
            words: output,
            removed_count,
        })
    }

    fn match_by_geometry(&self, words: &[Word], target: &Word) -> Option<usize> {
        let tolerance = self.options.geometric_match_tolerance;
        words.iter().position(|w| {
            w.text == target.text
                && w.page == target.page
                && (w.x - target.x).abs() <= tolerance
                && (w.y - target.y).abs() <= tolerance
        })
    }
}

impl Default for PatternFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Put start and end markers on the first and last word of every run.
///
/// A removed word may have carried its paragraph's marker, e.g. a running
/// header grouped with the sentence that continues at the top of the page.
fn remark_paragraph_boundaries(words: &mut [Word]) {
    let len = words.len();
    for i in 0..len {
        let id = words[i].paragraph_id;
        words[i].paragraph_start = i == 0 || words[i - 1].paragraph_id != id;
        words[i].paragraph_end = i + 1 == len || words[i + 1].paragraph_id != id;
    }
}

/// Check that word indices are exactly `0..len` in order.
pub fn verify_dense_indices(words: &[Word]) -> Result<()> {
    let mut seen: HashSet<usize> = HashSet::with_capacity(words.len());
    for (expected, word) in words.iter().enumerate() {
        if !seen.insert(word.index) {
            return Err(Error::IndexDuplicate(word.index));
        }
        if word.index != expected {
            return Err(Error::IndexGap {
                expected,
                found: word.index,
            });
        }
    }
    Ok(())
}

/// Check paragraph markers and the id sequence of a segmented stream.
///
/// Every run must have exactly one start marker on its first word and one
/// end marker on its last word, and ids must read `0, 1, 2, ...`.
pub fn verify_paragraphs(words: &[Word]) -> Result<()> {
    for (expected, run) in paragraph_runs(words).into_iter().enumerate() {
        let id = run[0].paragraph_id;
        if id != expected {
            return Err(Error::ParagraphSequence {
                expected,
                found: id,
            });
        }

        check_run_markers(run)?;
    }
    Ok(())
}

/// Check paragraph markers only, allowing gaps in the id sequence.
///
/// This is the invariant of a filtered stream, where whole paragraphs may
/// have been removed.
pub fn verify_paragraph_markers(words: &[Word]) -> Result<()> {
    paragraph_runs(words).into_iter().try_for_each(check_run_markers)
}

fn check_run_markers(run: &[Word]) -> Result<()> {
    let id = run[0].paragraph_id;
    let starts = run.iter().filter(|w| w.paragraph_start).count();
    let ends = run.iter().filter(|w| w.paragraph_end).count();
    let well_placed = run[0].paragraph_start && run[run.len() - 1].paragraph_end;
    if starts != 1 || ends != 1 || !well_placed {
        return Err(Error::ParagraphMarkers { id, starts, ends });
    }
    Ok(())
}
