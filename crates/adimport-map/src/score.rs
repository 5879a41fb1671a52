//! String normalization and similarity scoring for header matching.
//!
//! Uses normalized Levenshtein distance: edit distance scaled by the longer
//! input, so the score always lands in [0.0, 1.0] regardless of length.

use rapidfuzz::distance::levenshtein;

/// Normalize a header or field name for comparison.
///
/// Lowercases and removes whitespace and underscores outright, so
/// "Campaign Name", "campaign_name", and "campaignname" all compare equal.
/// Other punctuation is kept; it still counts toward edit distance.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Similarity between two normalized strings.
///
/// `(longest - levenshtein) / longest`, where `longest` is the longer
/// character count. Two empty strings are identical, hence 1.0; one empty
/// string against a non-empty one is 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let longest = len_a.max(len_b);
    if longest == 0 {
        return 1.0;
    }
    let distance = levenshtein::distance(a.chars(), b.chars());
    (longest - distance) as f64 / longest as f64
}

/// Convenience wrapper: normalize both sides, then score.
pub fn header_similarity(header: &str, field: &str) -> f64 {
    similarity(&normalize(header), &normalize(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_case_whitespace_and_underscores() {
        assert_eq!(normalize("Campaign Name"), "campaignname");
        assert_eq!(normalize("campaign_name"), "campaignname");
        assert_eq!(normalize("  Daily  Budget "), "dailybudget");
        assert_eq!(normalize("media-url"), "media-url");
    }

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("budget", "budget"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("", "budget"), 0.0);
    }

    #[test]
    fn score_is_the_normalized_edit_distance() {
        // distance 1 over length 6
        let score = similarity("budget", "budged");
        assert!((score - 5.0 / 6.0).abs() < 1e-12);

        // "campaignname" vs "name": distance 8 over length 12
        let score = similarity("campaignname", "name");
        assert!((score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn length_mismatch_dominates_short_substrings() {
        // A short exact substring of a long header still scores low.
        assert!(header_similarity("campaign_name", "name") < 0.5);
        // Near-identical headers score high.
        assert!(header_similarity("Campaign Name", "campaign_name") == 1.0);
    }

    #[test]
    fn single_edit_on_two_chars_scores_exactly_half() {
        assert_eq!(similarity("ab", "ax"), 0.5);
    }
}
