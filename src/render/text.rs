//! Plain text rendering for read-aloud streams.

use crate::model::{paragraph_runs, Word};

/// Join words into text, one paragraph per block separated by a blank line.
pub fn to_text(words: &[Word]) -> String {
    paragraph_runs(words)
        .into_iter()
        .map(|run| {
            run.iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
