//! Dominant left-margin detection.

use crate::model::Line;

/// Find the page's dominant left margin ("main text alignment").
///
/// Leading X values are bucketed: a value joins the first bucket whose
/// representative (its first-seen value) is within `radius`, otherwise it
/// opens a new bucket. The representative of the most populated bucket wins;
/// ties go to the bucket seen first. Returns 0 for no lines.
pub fn dominant_margin(lines: &[Line], radius: f32) -> f32 {
    let lefts: Vec<f32> = lines.iter().filter(|l| !l.is_empty()).map(Line::left).collect();
    dominant_value(&lefts, radius)
}

/// Bucket `values` and return the representative of the largest bucket.
pub(crate) fn dominant_value(values: &[f32], radius: f32) -> f32 {
    // (representative, count) in insertion order
    let mut buckets: Vec<(f32, usize)> = Vec::new();

    for &value in values {
        match buckets
            .iter_mut()
            .find(|(representative, _)| (value - *representative).abs() <= radius)
        {
            Some(bucket) => bucket.1 += 1,
            None => buckets.push((value, 1)),
        }
    }

    let mut best: Option<(f32, usize)> = None;
    for &(representative, count) in &buckets {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((representative, count));
        }
    }

    best.map(|(representative, _)| representative).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Word;

    fn line_at(x: f32) -> Line {
        Line::from_words(vec![Word::new("w", 1, x, 0.0, 10.0, 10.0)])
    }

    #[test]
    fn test_majority_margin() {
        let lines: Vec<Line> = [10.0, 10.0, 11.0, 50.0, 10.0].iter().map(|&x| line_at(x)).collect();
        assert_eq!(dominant_margin(&lines, 5.0), 10.0);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(dominant_margin(&[], 5.0), 0.0);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        assert_eq!(dominant_value(&[72.0, 100.0, 73.0, 101.0], 5.0), 72.0);
        assert_eq!(dominant_value(&[100.0, 72.0, 73.0, 101.0], 5.0), 100.0);
    }

    #[test]
    fn test_representative_is_first_seen_value() {
        // 14 is within 5 of 10 but 18 is not, even though it is within 5 of 14.
        assert_eq!(dominant_value(&[10.0, 14.0, 18.0, 18.5, 19.0], 5.0), 18.0);
    }
}
