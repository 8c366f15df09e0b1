/// Drop every character that is not a Unicode letter or digit and lowercase
/// the rest.
pub fn normalize(s: &str) -> String {
    let mut normalized = String::with_capacity(s.len());

    for ch in s.chars().filter(|ch| ch.is_alphanumeric()) {
        // some letters lowercase into a base letter plus a combining mark
        normalized.extend(ch.to_lowercase().filter(|lower| lower.is_alphanumeric()));
    }

    normalized
}

/// Split a subject name into normalized words.
///
/// Splits strictly on `' '`, keeps tokens whose raw length (in characters)
/// is at least `min_len`, and normalizes each of them. Order is preserved.
pub fn words(s: &str, min_len: usize) -> Vec<String> {
    s.split(' ')
        .filter(|token| token.chars().count() >= min_len)
        .map(normalize)
        .collect()
}
