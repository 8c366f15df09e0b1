use super::ParseError;

/// 1-based index of a spreadsheet column letter: `A` is 1, `Z` is 26,
/// `AA` is 27.
pub fn column_index(letters: &str) -> Result<usize, ParseError> {
    let trimmed = letters.trim();
    if trimmed.is_empty() || trimmed.len() > 3 {
        return Err(ParseError::InvalidColumn(letters.to_string()));
    }

    trimmed.chars().try_fold(0usize, |acc, ch| {
        if ch.is_ascii_alphabetic() {
            Ok(acc * 26 + (ch.to_ascii_uppercase() as usize - 'A' as usize + 1))
        } else {
            Err(ParseError::InvalidColumn(letters.to_string()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_to_indices() {
        assert_eq!(column_index("A"), Ok(1));
        assert_eq!(column_index("z"), Ok(26));
        assert_eq!(column_index("AA"), Ok(27));
        assert_eq!(column_index("BG"), Ok(59));
        assert_eq!(column_index("XFD"), Ok(16384));
    }

    #[test]
    fn rejects_non_letters() {
        assert!(column_index("").is_err());
        assert!(column_index("A1").is_err());
        assert!(column_index("ABCD").is_err());
    }
}
