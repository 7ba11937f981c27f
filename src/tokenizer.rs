//! Tokenization and sentence segmentation.
//!
//! Text is lowercased and split on whitespace. Apostrophes stay inside words
//! so contractions survive ("don't"). Punctuation attaches to the word before
//! it ("sat." is one token); punctuation with no word in front becomes a token
//! of its own.

/// Split `text` into lowercase tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current_word = String::new();

    for ch in text.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !current_word.is_empty() {
                tokens.push(std::mem::take(&mut current_word));
            }
        } else if ch.is_alphanumeric() || ch == '\'' {
            current_word.push(ch);
        } else if !current_word.is_empty() {
            current_word.push(ch);
            tokens.push(std::mem::take(&mut current_word));
        } else {
            tokens.push(ch.to_string());
        }
    }

    if !current_word.is_empty() {
        tokens.push(current_word);
    }

    tokens
}

/// Split `text` into trimmed, non-empty sentences on `.`, `!` and `?`.
///
/// The terminal punctuation itself is dropped.
pub fn segment_sentences(text: &str) -> Vec<&str> {
    text.split(|c: char| c == '.' || c == '!' || c == '?')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// True if the token closes a sentence.
pub fn is_sentence_ender(token: &str) -> bool {
    token.ends_with('.') || token.ends_with('!') || token.ends_with('?')
}

/// True if the token ends in a pause mark (`,` `;` `:`).
pub fn is_pause(token: &str) -> bool {
    token.ends_with(',') || token.ends_with(';') || token.ends_with(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_attaches_to_previous_word() {
        assert_eq!(tokenize("Hello, World!"), vec!["hello,", "world!"]);
    }

    #[test]
    fn test_leading_punctuation_is_own_token() {
        assert_eq!(tokenize("\"quoted\" - dash"), vec!["\"", "quoted\"", "-", "dash"]);
    }

    #[test]
    fn test_contractions_survive() {
        assert_eq!(tokenize("Don't STOP"), vec!["don't", "stop"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
    }

    #[test]
    fn test_rejoin_reproduces_sentence() {
        let sentence = "the quick fox, it said, jumped over the dog!";
        assert_eq!(tokenize(sentence).join(" ").trim(), sentence);
    }

    #[test]
    fn test_segment_sentences() {
        let sentences = segment_sentences("  The cat sat. The cat ran!  Why?  ..  ");
        assert_eq!(sentences, vec!["The cat sat", "The cat ran", "Why"]);
        assert!(segment_sentences("...!?").is_empty());
    }

    #[test]
    fn test_token_classes() {
        assert!(is_sentence_ender("ran."));
        assert!(is_sentence_ender("why?"));
        assert!(!is_sentence_ender("sat,"));
        assert!(is_pause("sat,"));
        assert!(is_pause("note:"));
        assert!(!is_pause("cat"));
    }
}
