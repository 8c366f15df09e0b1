//! Character n-gram comparison of single (already normalized) words.

/// Tanimoto coefficient over the character n-grams of `a` and `b`.
///
/// Every n-gram of `a` consumes the first unused equal n-gram of `b`, so a
/// repeated n-gram is only counted as often as it occurs on both sides.
/// Words shorter than `n` have no n-grams and score 0.
pub fn tanimoto(a: &str, b: &str, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len() < n || b.len() < n {
        return 0.0;
    }

    let a_grams: Vec<&[char]> = a.windows(n).collect();
    let b_grams: Vec<&[char]> = b.windows(n).collect();
    let mut used = vec![false; b_grams.len()];
    let mut equal = 0usize;

    for gram in &a_grams {
        let hit = b_grams
            .iter()
            .enumerate()
            .find(|(j, other)| !used[*j] && *other == gram)
            .map(|(j, _)| j);
        if let Some(j) = hit {
            used[j] = true;
            equal += 1;
        }
    }

    let union = a_grams.len() + b_grams.len() - equal;
    equal as f64 / union as f64
}

/// Whether two normalized words are close enough to count as the same word.
pub fn words_fuzzy_equal(a: &str, b: &str, n: usize, threshold: f64) -> bool {
    if a == b {
        return true;
    }
    tanimoto(a, b, n) >= threshold
}
