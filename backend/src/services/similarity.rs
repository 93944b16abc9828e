//! Closest-match fuzzy string lookup
//!
//! Explicit normalized-edit-distance similarity with a fixed cutoff,
//! returning the single best candidate or none.

/// Similarity cutoff shared by the disease and food matchers
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// Levenshtein edit distance between two strings, by chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Single-row dynamic programming
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Normalized similarity in [0, 1]: 1.0 means identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - edit_distance(a, b) as f64 / max_len as f64
}

/// Return the single best candidate with similarity at or above `cutoff`.
///
/// Ties keep the earliest candidate, matching the stable ordering of the
/// underlying dataset.
pub fn closest_match<'a, I>(query: &str, candidates: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let score = similarity(query, candidate);
        if score < cutoff {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate, score)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("appel", "apple"), 2);
    }

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(similarity("apple", "apple"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert!(similarity("apple", "zzzzz") < 0.2);
    }

    #[test]
    fn test_appel_matches_apple_at_cutoff() {
        // "appel" vs "apple": distance 2 over length 5 → similarity 0.6,
        // exactly at the cutoff, so it must match.
        assert!(similarity("appel", "apple") >= DEFAULT_CUTOFF);
        let keys = ["banana", "apple", "orange"];
        assert_eq!(
            closest_match("appel", keys.iter().copied(), DEFAULT_CUTOFF),
            Some("apple")
        );
    }

    #[test]
    fn test_below_cutoff_returns_none() {
        let keys = ["banana", "apple", "orange"];
        assert_eq!(closest_match("xyzzy", keys.iter().copied(), DEFAULT_CUTOFF), None);
    }

    #[test]
    fn test_best_single_candidate_wins() {
        let keys = ["apples", "apple"];
        assert_eq!(
            closest_match("apple", keys.iter().copied(), DEFAULT_CUTOFF),
            Some("apple")
        );
    }

    #[test]
    fn test_tie_keeps_first_candidate() {
        // "cab" is distance 1 from both candidates
        let tied = ["cat", "car"];
        assert_eq!(closest_match("cab", tied.iter().copied(), DEFAULT_CUTOFF), Some("cat"));
    }
}
