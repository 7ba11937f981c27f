//! Word normalization and the question-word filter.
//!
//! Every index key (word -> contexts, context windows, TF-IDF terms) goes
//! through [`extract_word`]. Apostrophes inside a word are kept, matching the
//! tokenizer, so "don't" and "dont" are different words everywhere. Quote
//! marks around a word are not part of it: "'hello'" is "hello".

/// Interrogatives kept out of n-gram training and TF-IDF weighting. A
/// downstream responder treats these as wildcards in user queries.
pub const QUESTION_WORDS: &[&str] = &[
    "who", "what", "where", "when", "why", "how", "which", "whose", "whom",
];

/// Lowercase alphanumeric-and-apostrophe core of a token, without leading or
/// trailing apostrophes.
pub fn extract_word(token: &str) -> String {
    let word: String = token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '\'')
        .flat_map(char::to_lowercase)
        .collect();
    word.trim_matches('\'').to_string()
}

pub fn is_question_word(word: &str) -> bool {
    QUESTION_WORDS.contains(&word.to_lowercase().as_str())
}

/// Normalized form of `token` if it should be counted as a term: non-empty
/// and not a question word.
pub fn term(token: &str) -> Option<String> {
    let word = extract_word(token);
    if word.is_empty() || is_question_word(&word) {
        None
    } else {
        Some(word)
    }
}
