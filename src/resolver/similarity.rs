//! String similarity scoring
//!
//! Scores are integers in `[0, 100]`. The base measure is indel similarity,
//! `2 * LCS / (len_a + len_b)`, the same quantity a sequence matcher ratio
//! reports.

/// Strategy for scoring a query against a candidate label
pub trait SimilarityScorer: Send + Sync {
    /// Similarity in `[0, 100]`
    fn score(&self, query: &str, candidate: &str) -> u8;
}

/// Best of plain, token-sorted and partial ratios, with the latter two
/// scaled down
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedRatio;

impl SimilarityScorer for WeightedRatio {
    fn score(&self, query: &str, candidate: &str) -> u8 {
        let a = normalize(query);
        let b = normalize(candidate);
        if a.is_empty() || b.is_empty() {
            return 0;
        }

        let base = ratio(&a, &b) as f64;
        let sorted = token_sort_ratio(&a, &b) as f64 * 0.95;

        let (short, long) = if a.chars().count() <= b.chars().count() {
            (&a, &b)
        } else {
            (&b, &a)
        };
        let len_ratio = long.chars().count() as f64 / short.chars().count() as f64;
        let partial = if len_ratio >= 1.5 {
            partial_ratio(short, long) as f64 * 0.9
        } else {
            0.0
        };

        base.max(sorted).max(partial).round() as u8
    }
}

/// Lowercase, replace non-alphanumerics with spaces, collapse whitespace
pub fn normalize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Indel similarity of two strings, `[0, 100]`
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

fn ratio_chars(a: &[char], b: &[char]) -> u8 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    let lcs = lcs_length(a, b);
    (200.0 * lcs as f64 / total as f64).round() as u8
}

/// Ratio after sorting whitespace-separated tokens
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sort_tokens(a), &sort_tokens(b))
}

/// Best ratio of `short` against every window of `long` with the same length
pub fn partial_ratio(short: &str, long: &str) -> u8 {
    let short: Vec<char> = short.chars().collect();
    let long: Vec<char> = long.chars().collect();
    if short.len() > long.len() {
        return ratio_chars(&long, &short);
    }
    long.windows(short.len().max(1))
        .map(|window| ratio_chars(&short, window))
        .max()
        .unwrap_or(0)
}

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Longest common subsequence length, two-row DP
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
