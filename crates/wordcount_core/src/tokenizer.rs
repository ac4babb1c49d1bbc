use std::collections::HashMap;

use crate::contract::FrequentWords;
use crate::stopwords::StopWords;

/// Characters that split words. Runs of separators produce no tokens.
pub const SEPARATORS: [char; 20] = [
    ' ', '\t', '\n', '.', ',', '!', '?', ';', ':', '(', ')', '\'', '"', '\u{201C}', '\u{201D}',
    '\u{2018}', '\u{2019}', '\u{2026}', '\u{2014}', '#',
];

pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Splits already-lowercased text into non-empty tokens.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|token| !token.is_empty())
}

/// Lowercases `text` and counts every token that is not a stopword.
pub fn count_words(text: &str, stop_words: &StopWords) -> HashMap<String, u64> {
    let lowered = text.to_lowercase();
    let mut counts: HashMap<String, u64> = HashMap::new();
    for token in tokenize(&lowered) {
        if stop_words.contains(token) {
            continue;
        }
        *counts.entry(token.to_string()).or_default() += 1;
    }
    counts
}

/// Counts words and keeps only those appearing at least `threshold` times.
pub fn frequent_words(text: &str, stop_words: &StopWords, threshold: u64) -> FrequentWords {
    count_words(text, stop_words)
        .into_iter()
        .filter(|(_, count)| *count >= threshold)
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::contract::FREQUENCY_THRESHOLD;

    use super::*;

    fn english() -> StopWords {
        StopWords::from_words(["the", "on", "a"])
    }

    #[test]
    fn splits_on_punctuation_and_typographic_marks() {
        let tokens: Vec<&str> =
            tokenize("hello, world!\t\u{201C}quoted\u{201D}\u{2014}dash\u{2026}end#tag (x)").collect();
        assert_eq!(
            tokens,
            vec!["hello", "world", "quoted", "dash", "end", "tag", "x"]
        );
    }

    #[test]
    fn hyphens_and_digits_stay_inside_tokens() {
        let tokens: Vec<&str> = tokenize("well-known 2024 e-mail").collect();
        assert_eq!(tokens, vec!["well-known", "2024", "e-mail"]);
    }

    #[test]
    fn stopwords_are_removed_regardless_of_case() {
        let counts = count_words("The THE the Cat cat", &english());
        assert_eq!(counts.get("the"), None);
        assert_eq!(counts.get("cat"), Some(&2));
    }

    #[test]
    fn threshold_drops_rare_words() {
        let text = format!("{}{}", "cat ".repeat(10), "dog ".repeat(9));
        let words = frequent_words(&text, &english(), FREQUENCY_THRESHOLD);

        assert_eq!(words.len(), 1);
        assert_eq!(words.get("cat"), Some(&10));
        assert!(words.values().all(|count| *count >= FREQUENCY_THRESHOLD));
    }

    #[test]
    fn counting_is_deterministic() {
        let text = "the cat sat on the mat. ".repeat(20);
        let first = frequent_words(&text, &english(), FREQUENCY_THRESHOLD);
        let second = frequent_words(&text, &english(), FREQUENCY_THRESHOLD);

        assert_eq!(first, second);
        assert_eq!(
            first,
            FrequentWords::from([
                ("cat".to_string(), 20),
                ("mat".to_string(), 20),
                ("sat".to_string(), 20),
            ])
        );
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(frequent_words("", &english(), FREQUENCY_THRESHOLD).is_empty());
        assert!(frequent_words(" .,;: ", &english(), 1).is_empty());
    }
}
