//! TF-IDF over sentence contexts.
//!
//! A "document" is one [`Context`]. Question words and tokens with no word
//! characters are not terms.
//!
//! ```text
//! idf(w)      = ln(total_sentences / (1 + df(w)))
//! tf(w, s)    = count(w in s) / terms(s)
//! tfidf(w, s) = tf(w, s) * idf(w)
//! ```
//!
//! With the `1 +` in the denominator a word present in every sentence gets a
//! negative IDF.

use crate::context::Context;
use crate::normalize::term;
use crate::similarity::SparseVector;
use ahash::{AHashMap, AHashSet};

#[derive(Debug, Default)]
pub struct TfIdfIndex {
    document_frequency: AHashMap<String, usize>,
    idf_scores: AHashMap<String, f64>,
    /// One vector per context, same indices.
    vectors: Vec<SparseVector>,
    total_sentences: usize,
}

impl TfIdfIndex {
    pub fn build(contexts: &[Context]) -> Self {
        let mut index = Self {
            total_sentences: contexts.len(),
            ..Self::default()
        };
        if contexts.is_empty() {
            return index;
        }

        for context in contexts {
            let words: AHashSet<String> = context.tokens.iter().filter_map(|t| term(t)).collect();
            for word in words {
                *index.document_frequency.entry(word).or_insert(0) += 1;
            }
        }

        let total = index.total_sentences as f64;
        for (word, &df) in &index.document_frequency {
            index
                .idf_scores
                .insert(word.clone(), (total / (1.0 + df as f64)).ln());
        }

        index.vectors = contexts
            .iter()
            .map(|context| index.vectorize(&context.tokens))
            .collect();

        index
    }

    /// TF-IDF vector for arbitrary tokens using the trained IDF table.
    ///
    /// Unknown words get weight 0. No terms means an empty vector.
    pub fn vectorize<S: AsRef<str>>(&self, tokens: &[S]) -> SparseVector {
        let mut term_frequency: AHashMap<String, usize> = AHashMap::new();
        let mut total_terms = 0usize;
        for token in tokens {
            if let Some(word) = term(token.as_ref()) {
                *term_frequency.entry(word).or_insert(0) += 1;
                total_terms += 1;
            }
        }

        if total_terms == 0 {
            return SparseVector::new();
        }

        term_frequency
            .into_iter()
            .map(|(word, count)| {
                let tf = count as f64 / total_terms as f64;
                let weight = tf * self.idf(&word);
                (word, weight)
            })
            .collect()
    }

    /// IDF of a normalized word, 0 if never seen.
    pub fn idf(&self, word: &str) -> f64 {
        self.idf_scores.get(word).copied().unwrap_or(0.0)
    }

    pub fn document_frequency(&self, word: &str) -> usize {
        self.document_frequency.get(word).copied().unwrap_or(0)
    }

    pub fn idf_scores(&self) -> &AHashMap<String, f64> {
        &self.idf_scores
    }

    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    pub fn vector(&self, context_idx: usize) -> Option<&SparseVector> {
        self.vectors.get(context_idx)
    }

    pub fn total_sentences(&self) -> usize {
        self.total_sentences
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
