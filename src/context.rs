//! Sentence-level contexts and the per-word indices built over them.

use crate::normalize::extract_word;
use crate::tokenizer::{segment_sentences, tokenize};
use ahash::AHashMap;

/// One stored sentence. Its position in [`ContextIndex::contexts`] is its id.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub tokens: Vec<String>,
    pub text: String,
}

/// Raw tokens before and after one occurrence of a word, within its sentence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContextWindow {
    pub before: Vec<String>,
    pub after: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ContextIndex {
    contexts: Vec<Context>,
    /// Word -> context ids, one entry per occurrence.
    word_to_contexts: AHashMap<String, Vec<usize>>,
    /// Word -> one window per occurrence.
    context_windows: AHashMap<String, Vec<ContextWindow>>,
}

impl ContextIndex {
    /// Segment `text` into sentences and index every word occurrence.
    pub fn build(text: &str, window_radius: usize) -> Self {
        let mut index = Self::default();

        for sentence in segment_sentences(text) {
            let tokens = tokenize(sentence);
            if tokens.is_empty() {
                continue;
            }

            let context_idx = index.contexts.len();
            for (pos, token) in tokens.iter().enumerate() {
                let word = extract_word(token);
                if word.is_empty() {
                    continue;
                }

                let start = pos.saturating_sub(window_radius);
                let end = pos.saturating_add(1).saturating_add(window_radius).min(tokens.len());
                let window = ContextWindow {
                    before: tokens[start..pos].to_vec(),
                    after: tokens[pos + 1..end].to_vec(),
                };

                index
                    .word_to_contexts
                    .entry(word.clone())
                    .or_default()
                    .push(context_idx);
                index.context_windows.entry(word).or_default().push(window);
            }

            index.contexts.push(Context {
                tokens,
                text: sentence.to_string(),
            });
        }

        index
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Context ids containing `word` (already normalized), in insertion order.
    pub fn contexts_of(&self, word: &str) -> &[usize] {
        self.word_to_contexts
            .get(word)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn windows_of(&self, word: &str) -> &[ContextWindow] {
        self.context_windows
            .get(word)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn word_to_contexts(&self) -> &AHashMap<String, Vec<usize>> {
        &self.word_to_contexts
    }

    pub fn context_windows(&self) -> &AHashMap<String, Vec<ContextWindow>> {
        &self.context_windows
    }
}
