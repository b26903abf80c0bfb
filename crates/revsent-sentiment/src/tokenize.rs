/// Characters treated as word separators. Apostrophes and hyphens are kept so
/// contractions (`don't`) and compounds (`well-made`) stay single tokens.
const PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '?', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '_', '`',
    '"', '~', '(', ')',
];

/// Split review text into lower-case word tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits() {
        assert_eq!(tokenize("Great Product"), ["great", "product"]);
    }

    #[test]
    fn punctuation_separates_words() {
        assert_eq!(
            tokenize("Great!!!Amazing, (really)."),
            ["great", "amazing", "really"]
        );
    }

    #[test]
    fn keeps_apostrophes_and_hyphens() {
        assert_eq!(
            tokenize("Don't buy this well-made junk"),
            ["don't", "buy", "this", "well-made", "junk"]
        );
    }

    #[test]
    fn collapses_whitespace_and_newlines() {
        assert_eq!(tokenize("  good \n\n\t bad  "), ["good", "bad"]);
    }

    #[test]
    fn empty_and_punctuation_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("?!...").is_empty());
    }
}
