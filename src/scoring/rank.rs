use super::types::{RankedResult, ScoredLabel};
use crate::error::{RelayError, Result};
use std::cmp::Ordering;

/// Sort by confidence, highest first, and pick the head as the prediction.
///
/// The sort is stable: labels with equal confidence keep their input order.
/// An empty input is an error rather than a defaulted prediction.
pub fn rank(query: impl Into<String>, mut labels: Vec<ScoredLabel>) -> Result<RankedResult> {
    // Normalized labels are finite, so partial_cmp never falls through.
    labels.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal));

    let top = labels.first().cloned().ok_or(RelayError::EmptyResult)?;

    Ok(RankedResult {
        query: query.into(),
        top,
        all: labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, f64)]) -> Vec<ScoredLabel> {
        pairs.iter().map(|(n, c)| ScoredLabel::new(*n, *c)).collect()
    }

    #[test]
    fn test_descending_order() {
        let ranked = rank("q", labels(&[("a", 0.1), ("b", 0.7), ("c", 0.2)])).unwrap();
        let names: Vec<_> = ranked.all.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert_eq!(ranked.top, ranked.all[0]);
        assert_eq!(ranked.query, "q");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank("q", labels(&[("x", 0.5), ("y", 0.9), ("z", 0.5), ("w", 0.5)])).unwrap();
        let names: Vec<_> = ranked.all.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["y", "x", "z", "w"]);
    }

    #[test]
    fn test_unclamped_scores() {
        let ranked = rank("q", labels(&[("neg", -3.0), ("big", 12.5)])).unwrap();
        assert_eq!(ranked.top.name, "big");
    }

    #[test]
    fn test_empty_is_error() {
        assert!(matches!(rank("q", Vec::new()), Err(RelayError::EmptyResult)));
    }
}
