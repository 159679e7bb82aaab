//! Fuzzy name matching for "did you mean" hints.
//!
//! Similarity is the Ratcliff/Obershelp ratio `2 * M / T`, where `M` counts
//! characters in recursively found longest common blocks and `T` is the
//! combined length.

/// Similarity ratio in `[0.0, 1.0]` between two strings.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, k) = longest_block(a, b);
    if k == 0 {
        return 0;
    }
    k + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + k..], &b[j + k..])
}

/// Earliest longest common block as `(start_a, start_b, len)`.
fn longest_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            let k = curr[j + 1];
            if k > best.2 {
                best = (i + 1 - k, j + 1 - k, k);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}

/// Up to `limit` candidates whose similarity to `word` is at least `cutoff`.
///
/// Comparison ignores case. Best matches come first; ties are ordered by name.
/// A candidate equal to `word` is never suggested.
pub fn close_matches<'a, I>(word: &str, candidates: I, limit: usize, cutoff: f64) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let word = word.to_uppercase();
    let mut scored: Vec<(f64, String)> = candidates
        .into_iter()
        .map(str::to_uppercase)
        .filter(|candidate| *candidate != word)
        .map(|candidate| (similarity(&word, &candidate), candidate))
        .filter(|(score, _)| *score >= cutoff)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    scored.dedup_by(|a, b| a.1 == b.1);
    scored.truncate(limit);
    scored.into_iter().map(|(_, name)| name).collect()
}
