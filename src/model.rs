//! The trained language model and its query surface.
//!
//! `train` rebuilds everything from one text: sentence contexts with their
//! word indices, n-gram tables over the whole filtered token stream, then
//! TF-IDF vectors over the contexts. All queries are read-only and return
//! empty or neutral values on an untrained model.

use crate::config::ModelConfig;
use crate::context::{Context, ContextIndex, ContextWindow};
use crate::error::Result;
use crate::ngram::{Continuations, NgramKey, NgramModel, NgramTable};
use crate::normalize::{extract_word, is_question_word};
use crate::similarity::{cosine_similarity, SparseVector};
use crate::tfidf::TfIdfIndex;
use crate::tokenizer::tokenize;
use ahash::AHashMap;
use log::info;

/// IDF at which a candidate gets the full rarity boost.
const IDF_SATURATION: f64 = 6.0;
/// Share of the rarity boost in the relevance multiplier.
const IDF_BOOST: f64 = 0.5;
const MIN_TEMPERATURE: f64 = 0.01;

/// Everything derived from one training call. Replaced as a unit.
///
/// Built without touching any model, so the expensive part of training can
/// run outside a lock; [`LanguageModel::install`] then swaps it in.
#[derive(Debug, Default)]
pub struct TrainedState {
    text: String,
    contexts: ContextIndex,
    ngrams: NgramModel,
    tfidf: TfIdfIndex,
}

impl TrainedState {
    pub fn build(config: &ModelConfig, text: &str) -> Self {
        let contexts = ContextIndex::build(text, config.window_radius);

        let tokens: Vec<String> = tokenize(text)
            .into_iter()
            .filter(|token| !is_question_word(&extract_word(token)))
            .collect();
        let ngrams = NgramModel::train(
            &tokens,
            &config.ngram_orders,
            config.resolved_primary_order(),
        );

        let tfidf = TfIdfIndex::build(contexts.contexts());

        Self {
            text: text.to_string(),
            contexts,
            ngrams,
            tfidf,
        }
    }
}

#[derive(Debug)]
pub struct LanguageModel {
    config: ModelConfig,
    /// Order -> normalized blending weight.
    weights: AHashMap<usize, f64>,
    state: TrainedState,
}

impl Default for LanguageModel {
    fn default() -> Self {
        Self::from_validated(ModelConfig::default())
    }
}

impl LanguageModel {
    /// Build an untrained model. Fails if the n-gram layout is inconsistent.
    pub fn new(config: ModelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Untrained model over the given n-gram orders and weights.
    pub fn with_ngrams(orders: Vec<usize>, weights: Vec<f64>) -> Result<Self> {
        Self::new(ModelConfig::with_ngrams(orders, weights))
    }

    fn from_validated(config: ModelConfig) -> Self {
        let weights = config.normalized_weights();
        Self {
            config,
            weights,
            state: TrainedState::default(),
        }
    }

    /// Rebuild all indices and tables from `text`, discarding prior state.
    pub fn train(&mut self, text: &str) {
        let state = TrainedState::build(&self.config, text);
        self.install(state);
    }

    /// Replace the trained state with one built by [`TrainedState::build`].
    pub fn install(&mut self, state: TrainedState) {
        info!(
            "Trained on {} contexts, {} tokens, vocabulary {}",
            state.contexts.len(),
            state.ngrams.total_unigrams(),
            state.ngrams.vocabulary().len()
        );
        self.state = state;
    }

    /// Contexts ranked by cosine similarity to `query_words`.
    ///
    /// Only positive scores are kept, highest first (equal scores by context
    /// id), capped at `max_similar_contexts`.
    pub fn find_similar_contexts<S: AsRef<str>>(&self, query_words: &[S]) -> Vec<(usize, f64)> {
        let tfidf = &self.state.tfidf;
        if tfidf.is_empty() || query_words.is_empty() {
            return Vec::new();
        }

        let query = tfidf.vectorize(query_words);
        let mut similarities: Vec<(usize, f64)> = tfidf
            .vectors()
            .iter()
            .enumerate()
            .map(|(idx, vector)| (idx, cosine_similarity(&query, vector)))
            .filter(|&(_, score)| score > 0.0)
            .collect();

        similarities.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        similarities.truncate(self.config.max_similar_contexts);
        similarities
    }

    /// Multiplier in `[1.0, ~3.5]` for how well `candidate_word` fits
    /// `context_words`. Neutral (1.0) without context or training data.
    pub fn compute_relevance<S: AsRef<str>>(&self, candidate_word: &str, context_words: &[S]) -> f64 {
        if context_words.is_empty() || self.state.tfidf.is_empty() {
            return 1.0;
        }
        let context_vector = self.state.tfidf.vectorize(context_words);
        self.compute_relevance_with_vector(candidate_word, &context_vector)
    }

    /// Relevance against a prebuilt context vector (see [`Self::term_vector`]).
    ///
    /// `(1 + avg_similarity) * (1 + 0.5 * normalized_idf)` where the average
    /// runs over the positive similarities between `context_vector` and the
    /// first `relevance_sample` contexts containing the candidate.
    pub fn compute_relevance_with_vector(&self, candidate_word: &str, context_vector: &SparseVector) -> f64 {
        let word = extract_word(candidate_word);
        let tfidf = &self.state.tfidf;

        let (total, matched) = self
            .state
            .contexts
            .contexts_of(&word)
            .iter()
            .take(self.config.relevance_sample)
            .filter_map(|&idx| tfidf.vector(idx))
            .map(|vector| cosine_similarity(context_vector, vector))
            .filter(|&similarity| similarity > 0.0)
            .fold((0.0, 0usize), |(sum, n), similarity| (sum + similarity, n + 1));

        let avg_similarity = if matched > 0 { total / matched as f64 } else { 0.0 };
        let normalized_idf = (tfidf.idf(&word) / IDF_SATURATION).clamp(0.0, 1.0);

        (1.0 + avg_similarity) * (1.0 + IDF_BOOST * normalized_idf)
    }

    /// TF-IDF vector for arbitrary words against the trained IDF table.
    pub fn term_vector<S: AsRef<str>>(&self, words: &[S]) -> SparseVector {
        self.state.tfidf.vectorize(words)
    }

    /// Continuations of the last `order - 1` tokens of `context`.
    pub fn continuations(&self, order: usize, context: &[String]) -> Option<&Continuations> {
        self.state.ngrams.continuations(order, context)
    }

    /// Continuations across all orders, scored by `count * weight`.
    pub fn weighted_continuations(&self, context: &[String]) -> Vec<(String, f64)> {
        self.state.ngrams.weighted_continuations(context, &self.weights)
    }

    pub fn backoff_probability(&self, word: &str, context: &[String]) -> f64 {
        self.state.ngrams.backoff_probability(word, context)
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn ngram_orders(&self) -> &[usize] {
        &self.config.ngram_orders
    }

    pub fn ngram_weights(&self) -> &AHashMap<usize, f64> {
        &self.weights
    }

    pub fn primary_order(&self) -> Option<usize> {
        self.config.resolved_primary_order()
    }

    pub fn temperature(&self) -> f64 {
        self.config.temperature
    }

    pub fn set_temperature(&mut self, temperature: f64) {
        self.config.temperature = temperature.max(MIN_TEMPERATURE);
    }

    /// 0 means no limit.
    pub fn top_k(&self) -> usize {
        self.config.top_k
    }

    pub fn set_top_k(&mut self, top_k: usize) {
        self.config.top_k = top_k;
    }

    pub fn training_text(&self) -> &str {
        &self.state.text
    }

    pub fn vocabulary(&self) -> &[String] {
        self.state.ngrams.vocabulary()
    }

    pub fn unigram_counts(&self) -> &AHashMap<String, u64> {
        self.state.ngrams.unigram_counts()
    }

    pub fn total_unigrams(&self) -> u64 {
        self.state.ngrams.total_unigrams()
    }

    pub fn ngram_contexts(&self, order: usize) -> Option<&NgramTable> {
        self.state.ngrams.table(order)
    }

    /// Prefix table of the primary order.
    pub fn primary_ngram_contexts(&self) -> Option<&NgramTable> {
        self.state.ngrams.primary_table()
    }

    /// Flat counts of full primary-order n-grams.
    pub fn ngram_counts(&self) -> &AHashMap<NgramKey, u64> {
        self.state.ngrams.primary_counts()
    }

    pub fn contexts(&self) -> &[Context] {
        self.state.contexts.contexts()
    }

    pub fn total_sentences(&self) -> usize {
        self.state.tfidf.total_sentences()
    }

    /// Context ids where `word` occurs, one per occurrence.
    pub fn word_contexts(&self, word: &str) -> &[usize] {
        self.state.contexts.contexts_of(&extract_word(word))
    }

    pub fn word_to_contexts(&self) -> &AHashMap<String, Vec<usize>> {
        self.state.contexts.word_to_contexts()
    }

    pub fn context_windows(&self, word: &str) -> &[ContextWindow] {
        self.state.contexts.windows_of(&extract_word(word))
    }

    pub fn document_frequency(&self, word: &str) -> usize {
        self.state.tfidf.document_frequency(&extract_word(word))
    }

    pub fn idf(&self, word: &str) -> f64 {
        self.state.tfidf.idf(&extract_word(word))
    }

    pub fn idf_scores(&self) -> &AHashMap<String, f64> {
        self.state.tfidf.idf_scores()
    }

    pub fn tfidf_vectors(&self) -> &[SparseVector] {
        self.state.tfidf.vectors()
    }
}
