//! Levenshtein edit distance, exact and bounded.
//!
//! Distances are counted over Unicode scalar values with unit cost for
//! insertions, deletions and substitutions. The bounded variant stops as soon
//! as the result is known to exceed the bound and then reports `max + 1`, so
//! any value above the bound must be read as "too far", never as exact.

use serde::{Deserialize, Serialize};

/// Default bound for [`DistanceMetric::BoundedLevenshtein`].
pub const DEFAULT_MAX_DISTANCE: usize = 5;

/// Number of single-character insertions, deletions and substitutions
/// turning `s1` into `s2`.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    edit_distance(&chars(s1), &chars(s2), None)
}

/// Like [`levenshtein_distance`], but reports `max + 1` for anything farther
/// than `max` and stops computing as soon as that is certain.
pub fn bounded_levenshtein(s1: &str, s2: &str, max: usize) -> usize {
    edit_distance(&chars(s1), &chars(s2), Some(max))
}

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Wagner-Fischer over two rows, optionally cut off at `bound`.
fn edit_distance(source: &[char], target: &[char], bound: Option<usize>) -> usize {
    let too_far = bound.map(|max| max.saturating_add(1));
    let exceeds = |d: usize| bound.is_some_and(|max| d > max);

    if exceeds(source.len().abs_diff(target.len())) {
        return too_far.unwrap_or_default();
    }
    if source.is_empty() || target.is_empty() {
        return source.len().max(target.len());
    }

    let mut above: Vec<usize> = (0..=target.len()).collect();
    let mut row = vec![0; target.len() + 1];

    for (i, &sc) in source.iter().enumerate() {
        row[0] = i + 1;
        let mut row_min = row[0];

        for (j, &tc) in target.iter().enumerate() {
            let replace = above[j] + usize::from(sc != tc);
            let delete = above[j + 1] + 1;
            let insert = row[j] + 1;
            row[j + 1] = replace.min(delete).min(insert);
            row_min = row_min.min(row[j + 1]);
        }

        // Row minimums never decrease.
        if let Some(too_far) = too_far.filter(|_| exceeds(row_min)) {
            return too_far;
        }
        std::mem::swap(&mut above, &mut row);
    }

    let distance = above[target.len()];
    match too_far {
        Some(too_far) if exceeds(distance) => too_far,
        _ => distance,
    }
}

/// Distance function used to rank candidate command names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Exact Levenshtein distance.
    Levenshtein,
    /// Levenshtein distance capped at `max`; anything farther reports `max + 1`.
    BoundedLevenshtein { max: usize },
}

impl Default for DistanceMetric {
    fn default() -> Self {
        DistanceMetric::BoundedLevenshtein {
            max: DEFAULT_MAX_DISTANCE,
        }
    }
}

impl DistanceMetric {
    /// Build a metric from an optional threshold: `None` means unbounded.
    pub fn from_threshold(max: Option<usize>) -> Self {
        match max {
            Some(max) => DistanceMetric::BoundedLevenshtein { max },
            None => DistanceMetric::Levenshtein,
        }
    }

    /// The configured bound, if any.
    pub fn threshold(&self) -> Option<usize> {
        match self {
            DistanceMetric::Levenshtein => None,
            DistanceMetric::BoundedLevenshtein { max } => Some(*max),
        }
    }

    /// Compute the distance between two strings.
    pub fn distance(&self, s1: &str, s2: &str) -> usize {
        match self {
            DistanceMetric::Levenshtein => levenshtein_distance(s1, s2),
            DistanceMetric::BoundedLevenshtein { max } => bounded_levenshtein(s1, s2, *max),
        }
    }

    /// Human readable name.
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Levenshtein => "levenshtein",
            DistanceMetric::BoundedLevenshtein { .. } => "bounded_levenshtein",
        }
    }
}

/// Measures one query string against many candidates.
///
/// The query is decoded into characters once and reused for every candidate.
pub struct LevenshteinMatcher {
    query: String,
    query_chars: Vec<char>,
    metric: DistanceMetric,
}

impl LevenshteinMatcher {
    pub fn new(query: String, metric: DistanceMetric) -> Self {
        let query_chars = chars(&query);

        LevenshteinMatcher {
            query,
            query_chars,
            metric,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Distance from the query to `candidate` under the matcher's metric.
    pub fn distance(&self, candidate: &str) -> usize {
        edit_distance(&self.query_chars, &chars(candidate), self.metric.threshold())
    }

    /// Whether `candidate` is at most `max_distance` edits away.
    pub fn is_match(&self, candidate: &str, max_distance: usize) -> bool {
        self.distance(candidate) <= max_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_typos() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("", "stop"), 4);
        assert_eq!(levenshtein_distance("stop", ""), 4);
        assert_eq!(levenshtein_distance("ply", "play"), 1);
        assert_eq!(levenshtein_distance("ply", "pause"), 4);
        assert_eq!(levenshtein_distance("ply", "skip"), 4);
        assert_eq!(levenshtein_distance("qeuue", "queue"), 2);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_levenshtein_distance_unicode() {
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
        assert_eq!(levenshtein_distance("日本語", "日本"), 1);
    }

    #[test]
    fn test_symmetry_and_length_bound() {
        let words = ["", "a", "play", "pause", "skip", "queue", "kitten", "sitting"];

        for a in words {
            assert_eq!(levenshtein_distance(a, a), 0);
            for b in words {
                let d = levenshtein_distance(a, b);
                assert_eq!(d, levenshtein_distance(b, a), "{a} / {b}");
                assert!(d >= a.chars().count().abs_diff(b.chars().count()));
            }
        }
    }

    #[test]
    fn test_bounded_levenshtein() {
        assert_eq!(bounded_levenshtein("kitten", "sitting", 3), 3);
        assert_eq!(bounded_levenshtein("kitten", "sitting", 2), 3);
        assert_eq!(bounded_levenshtein("queue", "queue", 0), 0);
        assert_eq!(bounded_levenshtein("a", "abc", 1), 2);
        assert_eq!(bounded_levenshtein("a", "ab", 1), 1);
        assert_eq!(bounded_levenshtein("", "abc", 5), 3);
        assert_eq!(bounded_levenshtein("abcdefgh", "", 5), 6);
        assert_eq!(bounded_levenshtein("x", "y", usize::MAX), 1);
    }

    #[test]
    fn test_bounded_agrees_with_exact_within_bound() {
        let words = ["play", "pause", "skip", "ply", "queue", "qeueu", "volume"];

        for a in words {
            for b in words {
                let exact = levenshtein_distance(a, b);
                for max in 0..8 {
                    let bounded = bounded_levenshtein(a, b, max);
                    if exact <= max {
                        assert_eq!(bounded, exact);
                    } else {
                        assert_eq!(bounded, max + 1);
                    }
                }
            }
        }
    }

    #[test]
    fn test_distance_metric() {
        let metric = DistanceMetric::default();
        assert_eq!(metric.threshold(), Some(DEFAULT_MAX_DISTANCE));
        assert_eq!(metric.distance("ply", "play"), 1);
        assert_eq!(metric.distance("a", "abcdefghij"), DEFAULT_MAX_DISTANCE + 1);

        let metric = DistanceMetric::from_threshold(None);
        assert_eq!(metric, DistanceMetric::Levenshtein);
        assert_eq!(metric.distance("a", "abcdefghij"), 9);
        assert_eq!(metric.name(), "levenshtein");
    }

    #[test]
    fn test_distance_metric_serde() {
        let json = r#"{"kind":"bounded_levenshtein","max":2}"#;
        let metric: DistanceMetric = serde_json::from_str(json).unwrap();
        assert_eq!(metric, DistanceMetric::BoundedLevenshtein { max: 2 });

        let json = serde_json::to_string(&DistanceMetric::Levenshtein).unwrap();
        assert_eq!(json, r#"{"kind":"levenshtein"}"#);
    }

    #[test]
    fn test_matcher_reuses_query() {
        let matcher = LevenshteinMatcher::new("shufle".to_string(), DistanceMetric::Levenshtein);

        assert_eq!(matcher.query(), "shufle");
        assert_eq!(matcher.distance("shuffle"), 1);
        assert_eq!(matcher.distance("skip"), 5);
        assert!(matcher.is_match("shuffle", 1));
        assert!(!matcher.is_match("nowplaying", 3));

        let bounded = LevenshteinMatcher::new(
            "ply".to_string(),
            DistanceMetric::BoundedLevenshtein { max: 2 },
        );
        assert_eq!(bounded.distance("play"), 1);
        assert_eq!(bounded.distance("pause"), 3);
    }
}
